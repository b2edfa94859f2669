use pretty_assertions::assert_eq;
use processor::simulate;
use scheduler::{Pid, PlanViolation, SimulationError};

use super::spec;
use crate::workload;

#[test]
pub fn empty_input() {
    assert_eq!(simulate(&[]), Err(SimulationError::EmptyInput));
    assert_eq!(
        simulate(&workload::parse("[]").unwrap()),
        Err(SimulationError::EmptyInput)
    );
}

#[test]
pub fn invalid_plan() {
    assert_eq!(
        simulate(&[spec(1, &[3], &[]), spec(2, &[4, 4], &[])]),
        Err(SimulationError::InvalidPlan {
            pid: 2,
            violation: PlanViolation::IoCount { bursts: 2, io: 0 },
        })
    );
    assert_eq!(
        simulate(&[spec(3, &[], &[])]),
        Err(SimulationError::InvalidPlan {
            pid: 3,
            violation: PlanViolation::NoBursts,
        })
    );
}

#[test]
pub fn duplicate_pid() {
    assert_eq!(
        simulate(&[spec(1, &[3], &[]), spec(1, &[4], &[])]),
        Err(SimulationError::DuplicatePid(Pid::new(1).unwrap()))
    );
}

#[test]
pub fn error_messages() {
    assert_eq!(
        SimulationError::InvalidPlan {
            pid: 2,
            violation: PlanViolation::IoCount { bursts: 3, io: 1 },
        }
        .to_string(),
        "invalid plan for process 2: 3 CPU bursts need 2 I/O durations, got 1"
    );
    assert_eq!(
        SimulationError::EmptyInput.to_string(),
        "no processes to simulate"
    );
}

#[test]
pub fn durations_past_the_clock() {
    let processes = workload::parse(&format!(
        r#"[{{ "id": 1, "bursts": [{}] }}, {{ "id": 2, "bursts": [1] }}]"#,
        usize::MAX
    ))
    .unwrap();
    assert_eq!(
        simulate(&processes),
        Err(SimulationError::InvalidPlan {
            pid: 2,
            violation: PlanViolation::Overflow,
        })
    );
}
