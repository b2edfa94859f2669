//! A scheduler library.
//!
//! This library provides the process model, the ready queue and I/O set,
//! and the scheduling engine of a discrete-event simulator for one CPU.
//! Processes alternate CPU bursts with I/O, every process arrives at
//! time 0, and the engine advances a virtual clock from one decision
//! point to the next.
//!

mod error;
mod metrics;
mod process;
mod queue;
mod scheduler;
mod schedulers;

pub use crate::error::{PlanViolation, SimulationError};
pub use crate::metrics::{ProcessMetrics, Report, Summary};
pub use crate::process::{Pcb, ProcessSpec};
pub use crate::queue::{IoSet, ReadyQueue};
pub use crate::scheduler::{
    BurstOutcome, Pid, Process, ProcessState, Scheduler, SchedulingDecision, Timings,
};
pub use crate::schedulers::Fcfs;

/// Returns a structure that implements the `Scheduler` trait with a
/// First-Come-First-Served, non-preemptive policy.
///
/// * `processes` - the workload. Every process is placed in the ready
///                 queue at time 0, in this order.
///
/// Fails before anything runs if `processes` is empty, if a burst plan
/// is malformed or if two processes share a PID.
pub fn fcfs(processes: &[ProcessSpec]) -> Result<Fcfs, SimulationError> {
    Fcfs::new(processes)
}
