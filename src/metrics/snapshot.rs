use serde::{Deserialize, Serialize};

/// One point-in-time measurement of CPU, memory and root disk usage.
///
/// Every field is always present. Fields of a failed probe hold zero (or an
/// empty per-thread list) instead of being omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub cpu_usage_per_thread: Vec<f64>,
    pub cpu_usage_average: f64,
    pub memory_usage_percent: f64,
    pub memory_total_gb: f64,
    pub memory_used_gb: f64,
    pub disk_usage_percent: f64,
    pub disk_total_gb: f64,
    pub disk_used_gb: f64,
}

impl Snapshot {
    pub fn thread_count(&self) -> usize {
        self.cpu_usage_per_thread.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_field_names() {
        let snapshot = Snapshot {
            cpu_usage_per_thread: vec![12.5, 50.0],
            cpu_usage_average: 31.25,
            ..Snapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();

        for key in [
            "cpu_usage_per_thread",
            "cpu_usage_average",
            "memory_usage_percent",
            "memory_total_gb",
            "memory_used_gb",
            "disk_usage_percent",
            "disk_total_gb",
            "disk_used_gb",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
        assert_eq!(json["cpu_usage_per_thread"][1], 50.0);
    }

    #[test]
    fn default_snapshot_is_zeroed_and_complete() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.thread_count(), 0);
        assert_eq!(snapshot.cpu_usage_average, 0.0);
        assert_eq!(snapshot.disk_used_gb, 0.0);
    }
}
