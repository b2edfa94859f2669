use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use processor::{format_logs, simulate_with, Observer, Recorder, Tracer};

mod report;
mod workload;

/// Simulates First-Come-First-Served scheduling of processes that
/// alternate CPU bursts with I/O on a single CPU.
#[derive(Debug, Parser)]
struct Opts {
    /// JSON workload: an array of `{ "id", "bursts", "io" }` processes.
    /// The built-in sample workload is used when omitted.
    #[clap(short = 'w', long, env = "FCFS_WORKLOAD")]
    workload: Option<PathBuf>,

    /// Print the report as JSON.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,

    /// Print the status of the simulation after every decision.
    #[clap(short = 't', long, action = clap::ArgAction::SetTrue)]
    trace: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let processes = workload::load(opts.workload.as_deref())?;
    info!("Loaded {} processes", processes.len());

    let mut recorder = Recorder::new();
    let mut tracer = Tracer;
    let observer: &mut dyn Observer = if opts.trace {
        &mut recorder
    } else {
        &mut tracer
    };
    let report = simulate_with(&processes, observer).context("Simulation rejected the workload")?;

    if opts.trace {
        print!("{}", format_logs(&recorder.logs));
    }
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
