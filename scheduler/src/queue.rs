//! The two collections the scheduling engine moves processes between.
//!
//! Both hold slots, indices into the process table owned by the run.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::Pid;

/// FIFO of processes eligible for dispatch.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    slots: VecDeque<usize>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue::default()
    }

    pub fn enqueue(&mut self, slot: usize) {
        self.slots.push_back(slot);
    }

    /// Pops the front of the queue, `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<usize> {
        self.slots.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Front to back.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }
}

/// Processes with I/O in flight, min-ordered on (completion, pid).
#[derive(Debug, Default)]
pub struct IoSet {
    heap: BinaryHeap<Reverse<(usize, Pid, usize)>>,
}

impl IoSet {
    pub fn new() -> Self {
        IoSet::default()
    }

    pub fn schedule(&mut self, slot: usize, pid: Pid, completion: usize) {
        self.heap.push(Reverse((completion, pid, slot)));
    }

    /// Removes every entry due at or before `now` and returns
    /// `(slot, completion)` pairs by ascending completion time, ties
    /// broken by PID.
    pub fn drain_due(&mut self, now: usize) -> Vec<(usize, usize)> {
        let mut due = Vec::new();
        while let Some(Reverse((completion, _, slot))) = self.heap.peek().copied() {
            if completion > now {
                break;
            }
            self.heap.pop();
            due.push((slot, completion));
        }
        due
    }

    /// The earliest completion time, `None` when nothing is in flight.
    pub fn earliest_completion(&self) -> Option<usize> {
        self.heap.peek().map(|Reverse((completion, _, _))| *completion)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `(pid, completion)` pairs sorted by completion, then PID.
    pub fn iter_sorted(&self) -> Vec<(Pid, usize)> {
        let mut entries = self
            .heap
            .iter()
            .map(|Reverse((completion, pid, _))| (*pid, *completion))
            .collect::<Vec<_>>();
        entries.sort_by_key(|&(pid, completion)| (completion, pid));
        entries
    }
}
