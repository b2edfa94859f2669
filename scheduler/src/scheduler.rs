use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use serde::Serialize;

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns `None` for 0, which is never a valid PID.
    pub fn new(pid: usize) -> Option<Pid> {
        NonZeroUsize::new(pid).map(Pid)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happened to a process when its CPU burst ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BurstOutcome {
    /// The process left the CPU for I/O that completes at `until`.
    Io { until: usize },

    /// That was the last burst, the process is complete.
    Exit,
}

/// The action taken by the scheduler at one decision point.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingDecision {
    /// The process with PID `pid` was dispatched at `start` and ran
    /// its next burst of `burst` time units to the end.
    Run {
        pid: Pid,
        start: usize,
        burst: NonZeroUsize,
        outcome: BurstOutcome,
    },

    /// The ready queue was empty while I/O was still in flight, the
    /// clock jumped from `from` straight to the earliest I/O completion.
    Idle { from: usize, until: usize },

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run {
                pid,
                start,
                burst,
                outcome,
            } => {
                write!(f, "Run {} at {} for {} units", pid, start, burst)?;
                match outcome {
                    BurstOutcome::Io { until } => write!(f, ", I/O until {}", until),
                    BurstOutcome::Exit => write!(f, ", exit"),
                }
            }
            SchedulingDecision::Idle { from, until } => {
                write!(f, "Idle from {} until {}", from, until)
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The trait that any scheduler has to implement.
///
/// A scheduler owns its clock and the processes of exactly one run.
pub trait Scheduler {
    /// Takes the next decision and advances the clock accordingly.
    fn next(&mut self) -> SchedulingDecision;

    /// Current value of the virtual clock.
    fn clock(&self) -> usize;

    /// Total time the CPU spent executing bursts so far.
    fn cpu_busy(&self) -> usize;

    /// PIDs in the ready queue, front first.
    fn ready(&self) -> Vec<Pid>;

    /// Processes doing I/O, paired with their completion time.
    fn in_io(&self) -> Vec<(Pid, usize)>;

    /// Returns the list of processes, in input order.
    fn list(&self) -> Vec<&dyn Process>;
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process is in the ready queue.
    Ready,

    /// The process is doing I/O.
    Io {
        /// Completion time of the I/O.
        until: usize,
    },

    /// All bursts have executed.
    Done,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Io { until } => write!(f, "IO {}", until),
            ProcessState::Done => write!(f, "DONE"),
        }
    }
}

/// Timing metrics of a process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timings {
    /// Time spent in the ready queue.
    pub waiting: usize,

    /// Clock time of the first dispatch, `None` until then.
    pub response: Option<usize>,

    /// Completion time, `None` until the process is complete.
    pub turnaround: Option<usize>,
}

/// The read-only view of a Process Control Block (PCB).
pub trait Process {
    /// Return the PID of the process.
    fn pid(&self) -> Pid;

    /// Return the state of the process.
    fn state(&self) -> ProcessState;

    /// Returns the process timings.
    fn timings(&self) -> Timings;

    /// Sum of all CPU bursts in the plan.
    fn cpu_total(&self) -> usize;

    /// Sum of all I/O durations in the plan.
    fn io_total(&self) -> usize;

    /// Length of the next burst, `None` once complete.
    fn next_burst(&self) -> Option<usize>;

    /// Returns details information
    fn extra(&self) -> String;
}
