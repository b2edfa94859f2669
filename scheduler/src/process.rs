use serde::{Deserialize, Serialize};

use crate::error::{PlanViolation, SimulationError};
use crate::{Pid, Process, ProcessState, Timings};

/// A process as described by the workload: its id and its burst plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: usize,

    /// CPU burst durations, in execution order.
    pub bursts: Vec<usize>,

    /// I/O durations, one after every burst except the last.
    #[serde(default)]
    pub io: Vec<usize>,
}

impl ProcessSpec {
    pub fn new(id: usize, bursts: Vec<usize>, io: Vec<usize>) -> Self {
        ProcessSpec { id, bursts, io }
    }

    /// Sum of every burst and I/O duration, `None` on overflow.
    pub fn total(&self) -> Option<usize> {
        self.bursts
            .iter()
            .chain(&self.io)
            .try_fold(0usize, |total, &duration| total.checked_add(duration))
    }

    fn validate(&self) -> Result<Pid, PlanViolation> {
        let pid = Pid::new(self.id).ok_or(PlanViolation::ZeroPid)?;
        if self.bursts.is_empty() {
            return Err(PlanViolation::NoBursts);
        }
        if self.io.len() != self.bursts.len() - 1 {
            return Err(PlanViolation::IoCount {
                bursts: self.bursts.len(),
                io: self.io.len(),
            });
        }
        if let Some(index) = self.bursts.iter().position(|&burst| burst == 0) {
            return Err(PlanViolation::ZeroBurst { index });
        }
        if let Some(index) = self.io.iter().position(|&io| io == 0) {
            return Err(PlanViolation::ZeroIo { index });
        }
        self.total().ok_or(PlanViolation::Overflow)?;
        Ok(pid)
    }
}

/// The Process Control Block: the immutable plan of a process and the
/// metrics one run records for it.
///
/// Only the scheduling engine mutates the timing fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Pcb {
    pid: Pid,
    bursts: Vec<usize>,
    io: Vec<usize>,
    next_burst: usize,
    last_event: usize,
    waiting: usize,
    response: Option<usize>,
    turnaround: Option<usize>,
    state: ProcessState,
}

impl Pcb {
    pub fn new(spec: &ProcessSpec) -> Result<Self, SimulationError> {
        let pid = spec
            .validate()
            .map_err(|violation| SimulationError::InvalidPlan {
                pid: spec.id,
                violation,
            })?;

        Ok(Pcb {
            pid,
            bursts: spec.bursts.clone(),
            io: spec.io.clone(),
            next_burst: 0,
            last_event: 0,
            waiting: 0,
            response: None,
            turnaround: None,
            state: ProcessState::Ready,
        })
    }

    pub fn last_event(&self) -> usize {
        self.last_event
    }

    pub fn is_complete(&self) -> bool {
        self.next_burst == self.bursts.len()
    }

    /// Records a dispatch at `now` and returns the burst to execute.
    ///
    /// Panics if the process is already complete.
    pub(crate) fn dispatch(&mut self, now: usize) -> usize {
        assert!(
            !self.is_complete(),
            "process {} dispatched after completion",
            self.pid
        );
        if self.response.is_none() {
            self.response = Some(now);
        }
        self.waiting += now.saturating_sub(self.last_event);
        self.bursts[self.next_burst]
    }

    /// Ends the current burst at `now`. Returns the I/O completion time, or
    /// `None` if that was the last burst.
    pub(crate) fn finish_burst(&mut self, now: usize) -> Option<usize> {
        self.next_burst += 1;
        if self.is_complete() {
            self.turnaround = Some(now);
            self.state = ProcessState::Done;
            None
        } else {
            let until = now + self.io[self.next_burst - 1];
            self.last_event = now;
            self.state = ProcessState::Io { until };
            Some(until)
        }
    }

    /// I/O finished at `completion`, the process is ready again.
    pub(crate) fn wake(&mut self, completion: usize) {
        self.last_event = completion;
        self.state = ProcessState::Ready;
    }
}

impl Process for Pcb {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn timings(&self) -> Timings {
        Timings {
            waiting: self.waiting,
            response: self.response,
            turnaround: self.turnaround,
        }
    }

    fn cpu_total(&self) -> usize {
        self.bursts.iter().sum()
    }

    fn io_total(&self) -> usize {
        self.io.iter().sum()
    }

    fn next_burst(&self) -> Option<usize> {
        self.bursts.get(self.next_burst).copied()
    }

    fn extra(&self) -> String {
        format!("burst={}/{}", self.next_burst, self.bursts.len())
    }
}
