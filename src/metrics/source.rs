use std::path::Path;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use super::error::SourceError;

/// Physical RAM byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Byte counts for one mounted filesystem.
///
/// `used_bytes` counts blocks actually in use. Blocks reserved for the
/// superuser are neither used nor available, so `used_bytes +
/// available_bytes` may be less than `total_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilesystemStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    /// Bytes an unprivileged user can still allocate.
    pub available_bytes: u64,
}

impl FilesystemStats {
    /// Builds byte counts from a `statvfs` block report.
    pub fn from_blocks(
        blocks: u64,
        blocks_free: u64,
        blocks_available: u64,
        fragment_size: u64,
    ) -> Self {
        FilesystemStats {
            total_bytes: blocks.saturating_mul(fragment_size),
            used_bytes: blocks
                .saturating_sub(blocks_free)
                .saturating_mul(fragment_size),
            available_bytes: blocks_available.saturating_mul(fragment_size),
        }
    }
}

/// Read-only host facilities the probes sample from.
///
/// CPU utilization is measured between two counter reads: callers
/// `refresh_cpu`, `wait` for the window, `refresh_cpu` again, then read
/// `per_processor_usage` and `aggregate_usage`. The two readings are
/// independent computations over the same window.
pub trait HostSource {
    fn refresh_cpu(&mut self) -> Result<(), SourceError>;

    /// Blocks the caller for the sampling window.
    fn wait(&mut self, window: Duration) {
        std::thread::sleep(window);
    }

    /// Utilization per logical processor, ordered by processor index.
    fn per_processor_usage(&self) -> Result<Vec<f64>, SourceError>;

    /// Utilization over the combined counters of all processors.
    /// `Ok(None)` means the host produced no reading for the window.
    fn aggregate_usage(&self) -> Result<Option<f64>, SourceError>;

    fn virtual_memory(&mut self) -> Result<MemoryStats, SourceError>;

    fn filesystem_usage(&mut self, mount: &Path) -> Result<FilesystemStats, SourceError>;
}

/// [`HostSource`] backed by `sysinfo`, with filesystem usage read through
/// `statvfs` on unix.
///
/// Reports raw counts only. Zero totals are judged by the probes.
pub struct SysinfoHost {
    sys: System,
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoHost {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        SysinfoHost { sys }
    }

    pub fn logical_processors(&self) -> usize {
        self.sys.cpus().len()
    }
}

impl HostSource for SysinfoHost {
    fn refresh_cpu(&mut self) -> Result<(), SourceError> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(SourceError::unavailable("host reports no logical processors"));
        }
        Ok(())
    }

    fn per_processor_usage(&self) -> Result<Vec<f64>, SourceError> {
        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return Err(SourceError::unavailable("host reports no logical processors"));
        }
        Ok(cpus.iter().map(|cpu| f64::from(cpu.cpu_usage())).collect())
    }

    fn aggregate_usage(&self) -> Result<Option<f64>, SourceError> {
        if self.sys.cpus().is_empty() {
            return Ok(None);
        }
        Ok(Some(f64::from(self.sys.global_cpu_usage())))
    }

    fn virtual_memory(&mut self) -> Result<MemoryStats, SourceError> {
        self.sys
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        Ok(MemoryStats {
            total_bytes: self.sys.total_memory(),
            used_bytes: self.sys.used_memory(),
        })
    }

    #[cfg(unix)]
    fn filesystem_usage(&mut self, mount: &Path) -> Result<FilesystemStats, SourceError> {
        use nix::errno::Errno;

        let vfs = nix::sys::statvfs::statvfs(mount).map_err(|errno| match errno {
            Errno::ENOENT => SourceError::NotMounted(mount.to_path_buf()),
            other => SourceError::unavailable(format!("statvfs {}: {other}", mount.display())),
        })?;

        Ok(FilesystemStats::from_blocks(
            u64::from(vfs.blocks()),
            u64::from(vfs.blocks_free()),
            u64::from(vfs.blocks_available()),
            u64::from(vfs.fragment_size()),
        ))
    }

    #[cfg(not(unix))]
    fn filesystem_usage(&mut self, mount: &Path) -> Result<FilesystemStats, SourceError> {
        let disks = sysinfo::Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount)
            .ok_or_else(|| SourceError::NotMounted(mount.to_path_buf()))?;

        let total_bytes = disk.total_space();
        let available_bytes = disk.available_space();
        Ok(FilesystemStats {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(available_bytes),
            available_bytes,
        })
    }
}
