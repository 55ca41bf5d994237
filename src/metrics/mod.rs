//! Host metrics sampling: three independent probes combined into one
//! [`Snapshot`] with first-error-wins failure reporting.

pub mod collector;
pub mod cpu;
pub mod disk;
pub mod error;
pub mod fake;
pub mod memory;
pub mod snapshot;
pub mod source;
pub mod units;

pub use collector::Collector;
pub use cpu::CPU_SAMPLE_INTERVAL;
pub use disk::ROOT_MOUNT;
pub use error::{ProbeFailure, SourceError, Subsystem};
pub use snapshot::Snapshot;
pub use source::{HostSource, SysinfoHost};
