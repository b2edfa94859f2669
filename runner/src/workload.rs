use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use scheduler::ProcessSpec;

/// The workload used when none is given on the command line.
pub const SAMPLE: &str = include_str!("../workloads/sample.json");

/// Either a bare array of processes or an object with a `processes` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Workload {
    List(Vec<ProcessSpec>),
    Table { processes: Vec<ProcessSpec> },
}

pub fn parse(input: &str) -> Result<Vec<ProcessSpec>> {
    let workload: Workload = serde_json::from_str(input).context("Malformed workload")?;
    Ok(match workload {
        Workload::List(processes) | Workload::Table { processes } => processes,
    })
}

pub fn load(path: Option<&Path>) -> Result<Vec<ProcessSpec>> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read workload {}", path.display()))?;
            parse(&content).with_context(|| format!("Failed to parse workload {}", path.display()))
        }
        None => parse(SAMPLE),
    }
}
