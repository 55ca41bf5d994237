use super::error::{ProbeFailure, SourceError};
use super::source::HostSource;
use super::units::{bytes_to_gib, usage_percent};

/// Physical RAM usage in percent and GiB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryUsage {
    pub usage_percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

/// Single synchronous read of physical RAM, no retry.
pub fn probe<H: HostSource + ?Sized>(host: &mut H) -> Result<MemoryUsage, ProbeFailure> {
    let stats = host.virtual_memory().map_err(ProbeFailure::memory)?;
    if stats.total_bytes == 0 {
        return Err(ProbeFailure::memory(SourceError::unavailable(
            "host reports zero physical memory",
        )));
    }

    let mut used_bytes = stats.used_bytes;
    if used_bytes > stats.total_bytes {
        tracing::debug!(
            used_bytes,
            total_bytes = stats.total_bytes,
            "used memory exceeds total, clamping"
        );
        used_bytes = stats.total_bytes;
    }

    let usage = MemoryUsage {
        usage_percent: usage_percent(used_bytes, stats.total_bytes),
        total_gb: bytes_to_gib(stats.total_bytes),
        used_gb: bytes_to_gib(used_bytes),
    };
    tracing::debug!(
        usage_percent = %format!("{:.2}", usage.usage_percent),
        "memory usage"
    );
    Ok(usage)
}
