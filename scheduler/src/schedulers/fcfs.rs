use std::collections::HashSet;
use std::num::NonZeroUsize;

use log::{debug, info, trace};

use crate::error::{PlanViolation, SimulationError};
use crate::process::{Pcb, ProcessSpec};
use crate::queue::{IoSet, ReadyQueue};
use crate::SchedulingDecision::{Done, Idle, Run};
use crate::{BurstOutcome, Pid, Process, Scheduler, SchedulingDecision};

/// First-Come-First-Served, non-preemptive scheduling of one CPU.
///
/// Every process enters the ready queue at time 0 in input order and
/// afterwards only when its I/O completes. A dispatched process keeps the
/// CPU for its whole burst.
pub struct Fcfs {
    processes: Vec<Pcb>,
    ready_queue: ReadyQueue,
    io: IoSet,
    clock: usize,
    cpu_busy: usize,
    completed: Vec<Pid>,
}

impl Fcfs {
    pub fn new(specs: &[ProcessSpec]) -> Result<Self, SimulationError> {
        if specs.is_empty() {
            return Err(SimulationError::EmptyInput);
        }

        let mut seen = HashSet::new();
        let mut processes = Vec::with_capacity(specs.len());
        // The clock never passes the sum of every duration in the workload.
        let mut horizon = 0usize;
        for spec in specs {
            let pcb = Pcb::new(spec)?;
            if !seen.insert(pcb.pid()) {
                return Err(SimulationError::DuplicatePid(pcb.pid()));
            }
            horizon = spec
                .total()
                .and_then(|total| horizon.checked_add(total))
                .ok_or(SimulationError::InvalidPlan {
                    pid: spec.id,
                    violation: PlanViolation::Overflow,
                })?;
            processes.push(pcb);
        }

        let mut ready_queue = ReadyQueue::new();
        for slot in 0..processes.len() {
            ready_queue.enqueue(slot);
        }

        Ok(Fcfs {
            processes,
            ready_queue,
            io: IoSet::new(),
            clock: 0,
            cpu_busy: 0,
            completed: Vec::new(),
        })
    }

    /// PIDs in the order the processes completed.
    pub fn completed(&self) -> &[Pid] {
        &self.completed
    }

    pub fn processes(&self) -> &[Pcb] {
        &self.processes
    }

    fn wake_due(&mut self) {
        for (slot, completion) in self.io.drain_due(self.clock) {
            let process = &mut self.processes[slot];
            trace!("t={} P{} finished I/O at {}", self.clock, process.pid(), completion);
            process.wake(completion);
            self.ready_queue.enqueue(slot);
        }
    }

    fn dispatch(&mut self, slot: usize) -> SchedulingDecision {
        let start = self.clock;
        let process = &mut self.processes[slot];
        let pid = process.pid();

        let burst = process.dispatch(start);
        self.clock += burst;
        self.cpu_busy += burst;

        let outcome = match process.finish_burst(self.clock) {
            Some(until) => {
                self.io.schedule(slot, pid, until);
                BurstOutcome::Io { until }
            }
            None => {
                info!("Process P{} has completed its total execution at {}", pid, self.clock);
                self.completed.push(pid);
                BurstOutcome::Exit
            }
        };

        let burst = NonZeroUsize::new(burst).expect("burst plans hold positive durations");
        let decision = Run {
            pid,
            start,
            burst,
            outcome,
        };
        debug!("t={} {}", start, decision);
        decision
    }
}

impl Scheduler for Fcfs {
    fn next(&mut self) -> SchedulingDecision {
        self.wake_due();

        if let Some(slot) = self.ready_queue.dequeue() {
            return self.dispatch(slot);
        }

        if let Some(until) = self.io.earliest_completion() {
            let from = self.clock;
            self.clock = until;
            let decision = Idle { from, until };
            debug!("t={} {}", from, decision);
            return decision;
        }

        Done
    }

    fn clock(&self) -> usize {
        self.clock
    }

    fn cpu_busy(&self) -> usize {
        self.cpu_busy
    }

    fn ready(&self) -> Vec<Pid> {
        self.ready_queue
            .iter()
            .map(|slot| self.processes[slot].pid())
            .collect()
    }

    fn in_io(&self) -> Vec<(Pid, usize)> {
        self.io.iter_sorted()
    }

    fn list(&self) -> Vec<&dyn Process> {
        self.processes
            .iter()
            .map(|process| process as &dyn Process)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProcessState, Timings};
    use pretty_assertions::assert_eq;

    fn pid(n: usize) -> Pid {
        Pid::new(n).unwrap()
    }

    fn burst(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn drive(fcfs: &mut Fcfs) -> Vec<SchedulingDecision> {
        let mut decisions = vec![];
        loop {
            let decision = fcfs.next();
            decisions.push(decision);
            if decision == Done {
                return decisions;
            }
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(Fcfs::new(&[]), Err(SimulationError::EmptyInput)));
    }

    #[test]
    fn rejects_duplicate_pids() {
        let specs = [
            ProcessSpec::new(1, vec![2], vec![]),
            ProcessSpec::new(1, vec![3], vec![]),
        ];
        assert!(matches!(
            Fcfs::new(&specs),
            Err(SimulationError::DuplicatePid(pid)) if pid == 1
        ));
    }

    #[test]
    fn rejects_workloads_past_the_clock() {
        let specs = [
            ProcessSpec::new(1, vec![usize::MAX], vec![]),
            ProcessSpec::new(2, vec![1], vec![]),
        ];
        assert!(matches!(
            Fcfs::new(&specs),
            Err(SimulationError::InvalidPlan {
                pid: 2,
                violation: PlanViolation::Overflow,
            })
        ));

        let specs = [
            ProcessSpec::new(1, vec![usize::MAX - 3], vec![]),
            ProcessSpec::new(2, vec![1, 1], vec![1]),
        ];
        let mut fcfs = Fcfs::new(&specs).unwrap();
        while fcfs.next() != Done {}
        assert_eq!(fcfs.clock(), usize::MAX);
    }

    #[test]
    fn initial_queue_follows_input_order() {
        let specs = [
            ProcessSpec::new(3, vec![2], vec![]),
            ProcessSpec::new(1, vec![3], vec![]),
            ProcessSpec::new(2, vec![1], vec![]),
        ];
        let fcfs = Fcfs::new(&specs).unwrap();
        assert_eq!(fcfs.ready(), vec![pid(3), pid(1), pid(2)]);
        assert_eq!(fcfs.clock(), 0);
    }

    #[test]
    fn single_process_with_io() {
        let mut fcfs = Fcfs::new(&[ProcessSpec::new(1, vec![4, 3], vec![10])]).unwrap();

        assert_eq!(
            drive(&mut fcfs),
            vec![
                Run {
                    pid: pid(1),
                    start: 0,
                    burst: burst(4),
                    outcome: BurstOutcome::Io { until: 14 },
                },
                Idle { from: 4, until: 14 },
                Run {
                    pid: pid(1),
                    start: 14,
                    burst: burst(3),
                    outcome: BurstOutcome::Exit,
                },
                Done,
            ]
        );
        assert_eq!(fcfs.clock(), 17);
        assert_eq!(fcfs.cpu_busy(), 7);
        assert_eq!(
            fcfs.processes()[0].timings(),
            Timings {
                waiting: 0,
                response: Some(0),
                turnaround: Some(17),
            }
        );
    }

    #[test]
    fn io_completion_waits_behind_running_burst() {
        // P1's I/O completes at 3 while P2 holds the CPU until 11.
        let specs = [
            ProcessSpec::new(1, vec![1, 1], vec![2]),
            ProcessSpec::new(2, vec![10], vec![]),
        ];
        let mut fcfs = Fcfs::new(&specs).unwrap();

        let decisions = drive(&mut fcfs);
        assert_eq!(
            decisions[2],
            Run {
                pid: pid(1),
                start: 11,
                burst: burst(1),
                outcome: BurstOutcome::Exit,
            }
        );
        assert_eq!(fcfs.completed(), &[pid(2), pid(1)]);
        assert_eq!(
            fcfs.processes()[0].timings(),
            Timings {
                waiting: 8,
                response: Some(0),
                turnaround: Some(12),
            }
        );
    }

    #[test]
    fn idle_jump_lands_on_earliest_completion() {
        let specs = [
            ProcessSpec::new(2, vec![1, 1], vec![4]),
            ProcessSpec::new(1, vec![3, 1], vec![2]),
        ];
        let mut fcfs = Fcfs::new(&specs).unwrap();

        // P2 runs 0..1 and is in I/O until 5, P1 runs 1..4 and is in I/O until 6.
        fcfs.next();
        fcfs.next();
        assert_eq!(fcfs.in_io(), vec![(pid(2), 5), (pid(1), 6)]);
        assert_eq!(fcfs.next(), Idle { from: 4, until: 5 });
        assert_eq!(fcfs.clock(), 5);
        assert_eq!(fcfs.processes()[0].state(), ProcessState::Io { until: 5 });
    }

    #[test]
    fn simultaneous_io_completions_wake_by_pid() {
        let specs = [
            ProcessSpec::new(2, vec![1, 1], vec![4]),
            ProcessSpec::new(1, vec![2, 1], vec![2]),
        ];
        let mut fcfs = Fcfs::new(&specs).unwrap();

        // Both I/Os complete at 5.
        fcfs.next();
        fcfs.next();
        assert_eq!(fcfs.next(), Idle { from: 3, until: 5 });
        assert_eq!(
            fcfs.next(),
            Run {
                pid: pid(1),
                start: 5,
                burst: burst(1),
                outcome: BurstOutcome::Exit,
            }
        );
        assert_eq!(fcfs.ready(), vec![pid(2)]);
        assert_eq!(fcfs.processes()[1].timings().waiting, 1);
    }

    #[test]
    fn done_is_idempotent() {
        let mut fcfs = Fcfs::new(&[ProcessSpec::new(1, vec![1], vec![])]).unwrap();
        drive(&mut fcfs);
        assert_eq!(fcfs.next(), Done);
        assert_eq!(fcfs.clock(), 1);
    }
}
