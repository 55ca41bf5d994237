use std::fmt::Write;

use serde::Serialize;

use crate::metrics::{ProbeFailure, Snapshot};

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_capacity(used_gb: f64, total_gb: f64) -> String {
    format!("{used_gb:.2} GB Used / {total_gb:.2} GB Total")
}

/// Headless output format for `--once`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    snapshot: &'a Snapshot,
    error: Option<&'a ProbeFailure>,
}

pub fn render_report(
    snapshot: &Snapshot,
    error: Option<&ProbeFailure>,
    format: ReportFormat,
) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(snapshot, error)),
        ReportFormat::Json => serde_json::to_string_pretty(&Report { snapshot, error }),
    }
}

pub fn render_text(snapshot: &Snapshot, error: Option<&ProbeFailure>) -> String {
    let mut out = String::new();
    for (index, usage) in snapshot.cpu_usage_per_thread.iter().enumerate() {
        let _ = writeln!(out, "CPU Core {index} Usage: {}", format_percent(*usage));
    }
    let _ = writeln!(
        out,
        "CPU Average Usage: {} ({} threads)",
        format_percent(snapshot.cpu_usage_average),
        snapshot.thread_count()
    );
    let _ = writeln!(
        out,
        "Memory Usage: {} ({})",
        format_percent(snapshot.memory_usage_percent),
        format_capacity(snapshot.memory_used_gb, snapshot.memory_total_gb)
    );
    let _ = writeln!(
        out,
        "Disk Usage (/): {} ({})",
        format_percent(snapshot.disk_usage_percent),
        format_capacity(snapshot.disk_used_gb, snapshot.disk_total_gb)
    );
    if let Some(error) = error {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::metrics::SourceError;

    fn sample() -> Snapshot {
        Snapshot {
            cpu_usage_per_thread: vec![12.0, 88.5],
            cpu_usage_average: 50.25,
            memory_usage_percent: 50.0,
            memory_total_gb: 16.0,
            memory_used_gb: 8.0,
            disk_usage_percent: 25.0,
            disk_total_gb: 500.0,
            disk_used_gb: 125.0,
        }
    }

    #[test]
    fn percent_and_capacity_use_two_decimals() {
        assert_eq!(format_percent(7.0), "7.00%");
        assert_eq!(format_capacity(3.5, 16.0), "3.50 GB Used / 16.00 GB Total");
    }

    #[test]
    fn text_report_lists_every_core() {
        assert_snapshot!(render_text(&sample(), None).trim_end(), @r"
        CPU Core 0 Usage: 12.00%
        CPU Core 1 Usage: 88.50%
        CPU Average Usage: 50.25% (2 threads)
        Memory Usage: 50.00% (8.00 GB Used / 16.00 GB Total)
        Disk Usage (/): 25.00% (125.00 GB Used / 500.00 GB Total)
        ");
    }

    #[test]
    fn text_report_appends_error_line() {
        let failure = ProbeFailure::disk(SourceError::unavailable("statfs failed"));
        let report = render_text(&sample(), Some(&failure));
        assert!(report.ends_with("Error: Disk probe failed: statfs failed\n"));
    }

    #[test]
    fn json_report_has_snapshot_and_null_error() {
        let json = render_report(&sample(), None, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["error"].is_null());
        assert_eq!(value["snapshot"]["memory_total_gb"], 16.0);
        assert_eq!(value["snapshot"]["cpu_usage_per_thread"][1], 88.5);
    }

    #[test]
    fn json_report_carries_failure() {
        let failure = ProbeFailure::cpu(SourceError::unavailable("no counters"));
        let json = render_report(&Snapshot::default(), Some(&failure), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["error"]["subsystem"], "cpu");
        assert_eq!(value["error"]["message"], "no counters");
        assert_eq!(value["snapshot"]["cpu_usage_per_thread"], serde_json::json!([]));
    }
}
