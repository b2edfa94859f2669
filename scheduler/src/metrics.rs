//! Per-process and aggregate metrics of a finished run.

use serde::Serialize;

use crate::error::SimulationError;
use crate::{Pid, Scheduler};

/// Final timings of one process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub waiting: usize,
    pub turnaround: usize,
    pub response: usize,

    /// Sum of the CPU bursts.
    pub cpu_total: usize,

    /// Sum of the I/O durations.
    pub io_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Final clock value.
    pub total_time: usize,
    pub cpu_busy: usize,
    pub idle_time: usize,

    /// Percentage of `total_time` the CPU executed bursts, 0 for an empty run.
    pub cpu_utilization: f64,
    pub mean_waiting: f64,
    pub mean_turnaround: f64,
    pub mean_response: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Completed processes, in input order.
    pub processes: Vec<ProcessMetrics>,
    pub summary: Summary,
}

impl Report {
    /// Reduces the final state of a scheduler to a report.
    ///
    /// Processes that never completed are left out.
    pub fn finalize(scheduler: &dyn Scheduler) -> Result<Report, SimulationError> {
        let processes = scheduler
            .list()
            .into_iter()
            .filter_map(|process| {
                let timings = process.timings();
                Some(ProcessMetrics {
                    pid: process.pid(),
                    waiting: timings.waiting,
                    turnaround: timings.turnaround?,
                    response: timings.response?,
                    cpu_total: process.cpu_total(),
                    io_total: process.io_total(),
                })
            })
            .collect::<Vec<_>>();

        if processes.is_empty() {
            return Err(SimulationError::EmptyInput);
        }

        let total_time = scheduler.clock();
        let cpu_busy = scheduler.cpu_busy();
        let cpu_utilization = if total_time == 0 {
            0.0
        } else {
            cpu_busy as f64 / total_time as f64 * 100.0
        };

        let mean = |field: fn(&ProcessMetrics) -> usize| {
            processes.iter().map(|p| field(p) as f64).sum::<f64>() / processes.len() as f64
        };

        let summary = Summary {
            total_time,
            cpu_busy,
            idle_time: total_time - cpu_busy,
            cpu_utilization,
            mean_waiting: mean(|p| p.waiting),
            mean_turnaround: mean(|p| p.turnaround),
            mean_response: mean(|p| p.response),
        };

        Ok(Report { processes, summary })
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|metrics| metrics.pid == pid)
    }
}
