use super::cpu::{self, CPU_SAMPLE_INTERVAL};
use super::error::ProbeFailure;
use super::snapshot::Snapshot;
use super::source::{HostSource, SysinfoHost};
use super::{disk, memory};

/// Keeps the first recorded failure. Later failures are logged and dropped.
#[derive(Debug, Default)]
pub struct FailureSlot {
    first: Option<ProbeFailure>,
}

impl FailureSlot {
    pub fn record(&mut self, failure: ProbeFailure) {
        if let Some(first) = &self.first {
            tracing::warn!(
                subsystem = %failure.subsystem,
                error = %failure,
                first = %first.subsystem,
                "probe failed after an earlier failure, not surfaced"
            );
            return;
        }
        tracing::warn!(subsystem = %failure.subsystem, error = %failure, "probe failed");
        self.first = Some(failure);
    }

    /// Unwraps a probe result, recording the failure and substituting the
    /// default value.
    pub fn recover<T: Default>(&mut self, result: Result<T, ProbeFailure>) -> T {
        result.unwrap_or_else(|failure| {
            self.record(failure);
            T::default()
        })
    }

    pub fn into_first(self) -> Option<ProbeFailure> {
        self.first
    }
}

/// Samples CPU, memory and disk into a [`Snapshot`].
pub struct Collector<H = SysinfoHost> {
    host: H,
}

impl Default for Collector<SysinfoHost> {
    fn default() -> Self {
        Self::new(SysinfoHost::new())
    }
}

impl<H: HostSource> Collector<H> {
    pub fn new(host: H) -> Self {
        Collector { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Runs the CPU, memory and disk probes in that order and assembles a
    /// snapshot.
    ///
    /// Blocks for [`CPU_SAMPLE_INTERVAL`]. Always returns a fully shaped
    /// snapshot; the error, if any, is the first probe failure in
    /// CPU, memory, disk order.
    pub fn collect_snapshot(&mut self) -> (Snapshot, Option<ProbeFailure>) {
        let _span = tracing::debug_span!("collector.collect_snapshot").entered();
        let mut failures = FailureSlot::default();

        let cpu = cpu::probe(&mut self.host, CPU_SAMPLE_INTERVAL);
        let cpu_usage_per_thread = failures.recover(cpu.per_thread);
        let cpu_usage_average = failures.recover(cpu.average);

        let memory = failures.recover(memory::probe(&mut self.host));
        let disk = failures.recover(disk::probe(&mut self.host));

        let snapshot = Snapshot {
            cpu_usage_per_thread,
            cpu_usage_average,
            memory_usage_percent: memory.usage_percent,
            memory_total_gb: memory.total_gb,
            memory_used_gb: memory.used_gb,
            disk_usage_percent: disk.usage_percent,
            disk_total_gb: disk.total_gb,
            disk_used_gb: disk.used_gb,
        };
        tracing::debug!(
            threads = snapshot.thread_count(),
            cpu_average = %format!("{:.2}", snapshot.cpu_usage_average),
            memory_percent = %format!("{:.2}", snapshot.memory_usage_percent),
            disk_percent = %format!("{:.2}", snapshot.disk_usage_percent),
            "snapshot collected"
        );

        (snapshot, failures.into_first())
    }
}
