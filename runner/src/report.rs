use std::fmt::Write;

use scheduler::Report;

/// Renders a report as a table of processes followed by the totals.
pub fn render(report: &Report) -> String {
    let mut s = String::new();
    writeln!(s, "PID\tWAIT\tTURN\tRESP").unwrap();
    for process in &report.processes {
        writeln!(
            s,
            "P{}\t{}\t{}\t{}",
            process.pid, process.waiting, process.turnaround, process.response
        )
        .unwrap();
    }

    let summary = &report.summary;
    writeln!(s).unwrap();
    writeln!(s, "Total simulation time: {}", summary.total_time).unwrap();
    writeln!(s, "CPU busy time: {}", summary.cpu_busy).unwrap();
    writeln!(s, "CPU idle time: {}", summary.idle_time).unwrap();
    writeln!(s, "CPU utilization: {:.2}%", summary.cpu_utilization).unwrap();
    writeln!(s, "Average waiting time: {:.2}", summary.mean_waiting).unwrap();
    writeln!(s, "Average turnaround time: {:.2}", summary.mean_turnaround).unwrap();
    writeln!(s, "Average response time: {:.2}", summary.mean_response).unwrap();
    s
}
