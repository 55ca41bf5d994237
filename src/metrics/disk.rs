use std::path::Path;

use super::error::{ProbeFailure, SourceError};
use super::source::HostSource;
use super::units::{bytes_to_gib, usage_percent};

/// Path sampled by the disk probe. Not resolved per platform: where `/`
/// cannot be read the probe reports a failure.
pub const ROOT_MOUNT: &str = "/";

/// Filesystem usage in percent and GiB.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiskUsage {
    pub usage_percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

pub fn probe<H: HostSource + ?Sized>(host: &mut H) -> Result<DiskUsage, ProbeFailure> {
    probe_mount(host, Path::new(ROOT_MOUNT))
}

fn probe_mount<H: HostSource + ?Sized>(
    host: &mut H,
    mount: &Path,
) -> Result<DiskUsage, ProbeFailure> {
    let stats = host.filesystem_usage(mount).map_err(ProbeFailure::disk)?;
    if stats.total_bytes == 0 {
        return Err(ProbeFailure::disk(SourceError::EmptyFilesystem(
            mount.to_path_buf(),
        )));
    }
    let used_bytes = stats.used_bytes.min(stats.total_bytes);
    // Reserved blocks count toward neither side of the percentage.
    let usable_bytes = used_bytes.saturating_add(stats.available_bytes);

    let usage = DiskUsage {
        usage_percent: usage_percent(used_bytes, usable_bytes),
        total_gb: bytes_to_gib(stats.total_bytes),
        used_gb: bytes_to_gib(used_bytes),
    };
    tracing::debug!(
        mount = %mount.display(),
        usage_percent = %format!("{:.2}", usage.usage_percent),
        "disk usage"
    );
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::metrics::error::Subsystem;
    use crate::metrics::fake::ScriptedHost;
    use crate::metrics::source::FilesystemStats;

    const GIB: u64 = 1 << 30;

    #[test]
    fn samples_root_mount_only() {
        let mut host = ScriptedHost::healthy();
        probe(&mut host).unwrap();
        assert_eq!(host.mounts_queried(), &[PathBuf::from("/")]);
    }

    #[test]
    fn reports_half_used_disk() {
        let mut host = ScriptedHost::healthy().with_filesystem(500 * GIB, 250 * GIB);
        let usage = probe(&mut host).unwrap();

        assert_eq!(usage.total_gb, 500.0);
        assert_eq!(usage.used_gb, 250.0);
        assert!((usage.usage_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn percent_excludes_reserved_blocks() {
        let stats = FilesystemStats::from_blocks(100, 50, 45, 4096);
        let mut host = ScriptedHost::healthy().with_filesystem_stats(stats);
        let usage = probe(&mut host).unwrap();

        assert_eq!(usage.used_gb, bytes_to_gib(50 * 4096));
        assert_eq!(usage.total_gb, bytes_to_gib(100 * 4096));
        assert!((usage.usage_percent - 52.63).abs() < 0.01);
    }

    #[test]
    fn fully_reserved_filesystem_reads_as_idle() {
        let stats = FilesystemStats::from_blocks(100, 100, 0, 4096);
        let mut host = ScriptedHost::healthy().with_filesystem_stats(stats);
        let usage = probe(&mut host).unwrap();

        assert_eq!(usage.used_gb, 0.0);
        assert_eq!(usage.usage_percent, 0.0);
    }

    #[test]
    fn missing_mount_is_tagged_disk() {
        let mut host =
            ScriptedHost::healthy().failing_disk(SourceError::NotMounted(PathBuf::from("/")));
        let failure = probe(&mut host).unwrap_err();
        assert_eq!(failure.subsystem, Subsystem::Disk);
    }

    #[test]
    fn zero_capacity_filesystem_is_a_failure() {
        let mut host = ScriptedHost::healthy().with_filesystem(0, 0);
        let failure = probe(&mut host).unwrap_err();
        assert_eq!(
            failure.cause,
            SourceError::EmptyFilesystem(PathBuf::from("/"))
        );
    }
}
