use std::error::Error;
use std::fmt::{self, Display};

use crate::Pid;

/// Why a burst plan was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlanViolation {
    /// The process id is 0.
    ZeroPid,

    /// The plan has no CPU burst.
    NoBursts,

    /// I/O must follow every burst except the last one.
    IoCount { bursts: usize, io: usize },

    /// The CPU burst at `index` has zero length.
    ZeroBurst { index: usize },

    /// The I/O at `index` has zero length.
    ZeroIo { index: usize },

    /// The durations add up to more than the clock can hold.
    Overflow,
}

impl Display for PlanViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanViolation::ZeroPid => write!(f, "pid must be positive"),
            PlanViolation::NoBursts => write!(f, "no CPU bursts"),
            PlanViolation::IoCount { bursts, io } => write!(
                f,
                "{} CPU bursts need {} I/O durations, got {}",
                bursts,
                bursts.saturating_sub(1),
                io
            ),
            PlanViolation::ZeroBurst { index } => write!(f, "CPU burst {} is zero", index),
            PlanViolation::ZeroIo { index } => write!(f, "I/O duration {} is zero", index),
            PlanViolation::Overflow => write!(f, "total duration overflows the clock"),
        }
    }
}

/// Everything that can go wrong before a run starts.
///
/// Once a scheduler has been built the run itself cannot fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A process has a malformed burst plan. `pid` is the raw id as given.
    InvalidPlan {
        pid: usize,
        violation: PlanViolation,
    },

    /// No processes were given.
    EmptyInput,

    /// Two processes share the same PID.
    DuplicatePid(Pid),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidPlan { pid, violation } => {
                write!(f, "invalid plan for process {}: {}", pid, violation)
            }
            SimulationError::EmptyInput => write!(f, "no processes to simulate"),
            SimulationError::DuplicatePid(pid) => write!(f, "duplicate pid {}", pid),
        }
    }
}

impl Error for SimulationError {}
