use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::SourceError;
use super::source::{FilesystemStats, HostSource, MemoryStats};

const GIB: u64 = 1 << 30;

/// Scripted [`HostSource`] for tests and headless demos. Never blocks:
/// `wait` only records the requested window.
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    refresh: Result<(), SourceError>,
    per_processor: Result<Vec<f64>, SourceError>,
    aggregate: Result<Option<f64>, SourceError>,
    memory: Result<MemoryStats, SourceError>,
    filesystem: Result<FilesystemStats, SourceError>,
    waits: Vec<Duration>,
    cpu_refreshes: usize,
    mounts_queried: Vec<PathBuf>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::healthy()
    }
}

impl ScriptedHost {
    /// Four logical processors, 16 GiB RAM half used, 500 GiB disk half used.
    pub fn healthy() -> Self {
        Self {
            refresh: Ok(()),
            per_processor: Ok(vec![10.0, 20.0, 30.0, 40.0]),
            aggregate: Ok(Some(25.0)),
            memory: Ok(MemoryStats {
                total_bytes: 16 * GIB,
                used_bytes: 8 * GIB,
            }),
            filesystem: Ok(FilesystemStats {
                total_bytes: 500 * GIB,
                used_bytes: 250 * GIB,
                available_bytes: 250 * GIB,
            }),
            waits: Vec::new(),
            cpu_refreshes: 0,
            mounts_queried: Vec::new(),
        }
    }

    pub fn with_cores(mut self, usage: Vec<f64>) -> Self {
        self.per_processor = Ok(usage);
        self
    }

    pub fn with_aggregate(mut self, usage: Option<f64>) -> Self {
        self.aggregate = Ok(usage);
        self
    }

    pub fn with_memory(mut self, total_bytes: u64, used_bytes: u64) -> Self {
        self.memory = Ok(MemoryStats {
            total_bytes,
            used_bytes,
        });
        self
    }

    /// Filesystem without reserved blocks: whatever is not used is available.
    pub fn with_filesystem(mut self, total_bytes: u64, used_bytes: u64) -> Self {
        self.filesystem = Ok(FilesystemStats {
            total_bytes,
            used_bytes,
            available_bytes: total_bytes.saturating_sub(used_bytes),
        });
        self
    }

    pub fn with_filesystem_stats(mut self, stats: FilesystemStats) -> Self {
        self.filesystem = Ok(stats);
        self
    }

    /// Fails the counter read that opens the CPU window.
    pub fn failing_cpu(mut self, cause: SourceError) -> Self {
        self.refresh = Err(cause);
        self
    }

    pub fn failing_per_processor(mut self, cause: SourceError) -> Self {
        self.per_processor = Err(cause);
        self
    }

    pub fn failing_aggregate(mut self, cause: SourceError) -> Self {
        self.aggregate = Err(cause);
        self
    }

    pub fn failing_memory(mut self, cause: SourceError) -> Self {
        self.memory = Err(cause);
        self
    }

    pub fn failing_disk(mut self, cause: SourceError) -> Self {
        self.filesystem = Err(cause);
        self
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn cpu_refreshes(&self) -> usize {
        self.cpu_refreshes
    }

    pub fn mounts_queried(&self) -> &[PathBuf] {
        &self.mounts_queried
    }
}

impl HostSource for ScriptedHost {
    fn refresh_cpu(&mut self) -> Result<(), SourceError> {
        self.cpu_refreshes += 1;
        self.refresh.clone()
    }

    fn wait(&mut self, window: Duration) {
        self.waits.push(window);
    }

    fn per_processor_usage(&self) -> Result<Vec<f64>, SourceError> {
        self.per_processor.clone()
    }

    fn aggregate_usage(&self) -> Result<Option<f64>, SourceError> {
        self.aggregate.clone()
    }

    fn virtual_memory(&mut self) -> Result<MemoryStats, SourceError> {
        self.memory.clone()
    }

    fn filesystem_usage(&mut self, mount: &Path) -> Result<FilesystemStats, SourceError> {
        self.mounts_queried.push(mount.to_path_buf());
        self.filesystem.clone()
    }
}
