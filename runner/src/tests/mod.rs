use std::env;
use std::fs;

use processor::{format_logs, simulate_with, Log, Recorder};
use scheduler::{ProcessSpec, Report};

mod errors;

static SCHEDULER: &str = "fcfs";

fn output_path(folder: &str, name: &str) -> String {
    format!(
        "{}/../outputs/{SCHEDULER}/{folder}/{name}.log",
        env!("CARGO_MANIFEST_DIR")
    )
}

fn write_logs(folder: &str, name: &str, logs: &str) {
    fs::create_dir_all(format!(
        "{}/../outputs/{SCHEDULER}/{folder}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    fs::write(output_path(folder, name), logs).unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    fs::read_to_string(output_path(folder, name)).unwrap()
}

/// Compares the trace of a run with the reference output, or rewrites the
/// reference when `WRITE_OUTPUT` is set.
fn run(folder: &str, name: &str, logs: &[Log]) {
    let output = format_logs(logs);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// Simulates a workload, keeping every log.
fn simulate(processes: &[ProcessSpec]) -> (Report, Vec<Log>) {
    let mut recorder = Recorder::new();
    let report = simulate_with(processes, &mut recorder).unwrap();
    (report, recorder.into_logs())
}

fn spec(id: usize, bursts: &[usize], io: &[usize]) -> ProcessSpec {
    ProcessSpec::new(id, bursts.to_vec(), io.to_vec())
}
