//! A processor simulation library
//!
//! This drives a scheduler from the [`scheduler`] crate to completion,
//! hands every decision to an [`Observer`] and reduces the final state
//! to a [`Report`].

use std::collections::HashMap;
use std::fmt::{self, Display};

use log::{debug, info};

use scheduler::{
    Pid, ProcessSpec, ProcessState, Report, Scheduler, SchedulingDecision, SimulationError,
    Timings,
};

/// Running iteration log
#[derive(Debug, Clone)]
pub struct Log {
    /// The decision taken by the scheduler.
    pub decision: SchedulingDecision,

    /// The clock after the decision.
    pub clock: usize,

    /// The ready queue after the decision, paired with the length of
    /// each process's next burst.
    pub ready: Vec<(Pid, usize)>,

    /// Processes doing I/O, paired with the time left until completion.
    pub in_io: Vec<(Pid, usize)>,

    /// Processes whose I/O completed while the CPU was busy. They join
    /// the ready queue at the next decision point.
    pub io_finished: Vec<Pid>,

    /// The list of processes and their corresponding states
    /// returned by the scheduler.
    pub processes: HashMap<Pid, ProcessInfo>,
}

impl Log {
    fn capture(decision: SchedulingDecision, scheduler: &dyn Scheduler) -> Log {
        let clock = scheduler.clock();
        let mut processes = HashMap::new();
        for process in scheduler.list() {
            processes.insert(
                process.pid(),
                ProcessInfo::new(
                    process.pid(),
                    process.state(),
                    process.timings(),
                    process.next_burst(),
                    process.extra(),
                    clock,
                ),
            );
        }
        let ready = scheduler
            .ready()
            .into_iter()
            .map(|pid| {
                let burst = processes
                    .get(&pid)
                    .and_then(|info| info.next_burst)
                    .unwrap_or_default();
                (pid, burst)
            })
            .collect();
        let (finished, pending): (Vec<_>, Vec<_>) = scheduler
            .in_io()
            .into_iter()
            .partition(|&(_, until)| until <= clock);
        let in_io = pending
            .into_iter()
            .map(|(pid, until)| (pid, until - clock))
            .collect();
        let io_finished = finished.into_iter().map(|(pid, _)| pid).collect();

        Log {
            decision,
            clock,
            ready,
            in_io,
            io_finished,
            processes,
        }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.decision)?;
        writeln!(f, "Clock: {}", self.clock)?;
        writeln!(f, "Ready Queue: {}", pairs(&self.ready))?;
        writeln!(f, "Processes in I/O: {}", pairs(&self.in_io))?;
        if !self.io_finished.is_empty() {
            let pids = self
                .io_finished
                .iter()
                .map(|pid| format!("P{}", pid))
                .collect::<Vec<_>>();
            writeln!(f, "I/O finished: [{}]", pids.join(", "))?;
        }
        writeln!(f, "PID\tSTATE\tWAIT\tRESP\tTURN\tEXTRA")?;
        let mut pids = self.processes.keys().collect::<Vec<&Pid>>();
        pids.sort();
        for pid in pids.into_iter() {
            writeln!(f, "{}", self.processes[pid])?;
        }
        Ok(())
    }
}

fn pairs(entries: &[(Pid, usize)]) -> String {
    let entries = entries
        .iter()
        .map(|(pid, n)| format!("(P{}, {})", pid, n))
        .collect::<Vec<_>>();
    format!("[{}]", entries.join(", "))
}

impl PartialEq<Log> for Log {
    fn eq(&self, other: &Log) -> bool {
        self.decision == other.decision
            && self.clock == other.clock
            && self.ready == other.ready
            && self.in_io == other.in_io
            && self.io_finished == other.io_finished
            && self.processes == other.processes
    }
}

/// Information about a process state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    /// The process timings.
    pub timings: Timings,

    /// Length of the next burst, `None` once complete.
    pub next_burst: Option<usize>,

    /// Extra details about the process
    pub extra: String,

    /// The process is still marked as doing I/O but its I/O already
    /// completed.
    pub io_finished: bool,
}

impl ProcessInfo {
    fn new(
        pid: Pid,
        state: ProcessState,
        timings: Timings,
        next_burst: Option<usize>,
        extra: String,
        clock: usize,
    ) -> ProcessInfo {
        ProcessInfo {
            pid,
            state,
            timings,
            next_burst,
            extra,
            io_finished: matches!(state, ProcessState::Io { until } if until <= clock),
        }
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.io_finished {
            format!("{} done", self.state)
        } else {
            self.state.to_string()
        };
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            state,
            self.timings.waiting,
            or_dash(self.timings.response),
            or_dash(self.timings.turnaround),
            self.extra
        )
    }
}

/// Receives one [`Log`] per scheduling decision, including the final
/// [`SchedulingDecision::Done`].
pub trait Observer {
    fn observe(&mut self, log: &Log);
}

/// Silent runs.
impl Observer for () {
    fn observe(&mut self, _log: &Log) {}
}

/// Keeps every log of a run.
#[derive(Debug, Default)]
pub struct Recorder {
    pub logs: Vec<Log>,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder::default()
    }

    pub fn into_logs(self) -> Vec<Log> {
        self.logs
    }
}

impl Observer for Recorder {
    fn observe(&mut self, log: &Log) {
        self.logs.push(log.clone());
    }
}

/// Forwards every log to the `log` facade at debug level.
#[derive(Debug, Default)]
pub struct Tracer;

impl Observer for Tracer {
    fn observe(&mut self, log: &Log) {
        debug!("\n{}", log);
    }
}

/// The processor simulator.
pub struct Processor<S: Scheduler> {
    scheduler: S,
}

impl<S: Scheduler> Processor<S> {
    /// Run a scheduler until it has nothing left to schedule.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    /// * `observer` - called after every decision.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::{Processor, Recorder};
    /// use scheduler::ProcessSpec;
    ///
    /// let fcfs = scheduler::fcfs(&[ProcessSpec::new(1, vec![4, 3], vec![10])]).unwrap();
    /// let mut recorder = Recorder::new();
    /// let report = Processor::run(fcfs, &mut recorder).unwrap();
    ///
    /// assert_eq!(report.summary.total_time, 17);
    /// assert_eq!(recorder.logs.len(), 4);
    /// ```
    pub fn run<O>(scheduler: S, observer: &mut O) -> Result<Report, SimulationError>
    where
        O: Observer + ?Sized,
    {
        let mut processor = Processor { scheduler };
        processor.drive(observer);

        let report = Report::finalize(&processor.scheduler)?;
        info!(
            "Simulation finished at {}, CPU utilization {:.2}%",
            report.summary.total_time, report.summary.cpu_utilization
        );
        Ok(report)
    }

    fn drive<O>(&mut self, observer: &mut O)
    where
        O: Observer + ?Sized,
    {
        loop {
            let before = self.scheduler.clock();
            let decision = self.scheduler.next();
            assert!(
                self.scheduler.clock() >= before,
                "clock went back from {} to {}",
                before,
                self.scheduler.clock()
            );

            observer.observe(&Log::capture(decision, &self.scheduler));
            if decision == SchedulingDecision::Done {
                break;
            }
        }
    }
}

/// Simulate a workload under FCFS without observing it.
pub fn simulate(processes: &[ProcessSpec]) -> Result<Report, SimulationError> {
    simulate_with(processes, &mut ())
}

/// Simulate a workload under FCFS, passing every decision to `observer`.
///
/// Each call builds fresh process control blocks, runs never share state.
pub fn simulate_with<O>(processes: &[ProcessSpec], observer: &mut O) -> Result<Report, SimulationError>
where
    O: Observer + ?Sized,
{
    let fcfs = scheduler::fcfs(processes)?;
    Processor::run(fcfs, observer)
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs collected by a [`Recorder`].
///
/// ## Example
///
/// ```rust
/// use processor::{format_logs, simulate_with, Recorder};
/// use scheduler::ProcessSpec;
///
/// let mut recorder = Recorder::new();
/// simulate_with(&[ProcessSpec::new(1, vec![7], vec![])], &mut recorder).unwrap();
///
/// println!("{}", format_logs(&recorder.logs));
/// ```
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        fmt::write(
            &mut s,
            format_args!("===== Iteration: {} =====\n{}\n", iteration + 1, log),
        )
        .unwrap();
    }
    s
}
