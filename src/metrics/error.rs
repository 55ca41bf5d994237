use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Host subsystem a probe reads from. Declaration order is collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Cpu,
    Memory,
    Disk,
}

impl Subsystem {
    pub fn label(self) -> &'static str {
        match self {
            Subsystem::Cpu => "CPU",
            Subsystem::Memory => "Memory",
            Subsystem::Disk => "Disk",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error reported by a [`HostSource`](super::source::HostSource) facility.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("{0}")]
    Unavailable(String),

    #[error("no filesystem mounted at {}", .0.display())]
    NotMounted(PathBuf),

    #[error("filesystem at {} reports zero capacity", .0.display())]
    EmptyFilesystem(PathBuf),
}

impl SourceError {
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        SourceError::Unavailable(msg.into())
    }
}

/// One failed probe. Recovery is always the documented default value for
/// the subsystem's snapshot fields.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{subsystem} probe failed: {cause}")]
pub struct ProbeFailure {
    pub subsystem: Subsystem,
    #[source]
    pub cause: SourceError,
}

impl ProbeFailure {
    pub fn new(subsystem: Subsystem, cause: SourceError) -> Self {
        Self { subsystem, cause }
    }

    pub fn cpu(cause: SourceError) -> Self {
        Self::new(Subsystem::Cpu, cause)
    }

    pub fn memory(cause: SourceError) -> Self {
        Self::new(Subsystem::Memory, cause)
    }

    pub fn disk(cause: SourceError) -> Self {
        Self::new(Subsystem::Disk, cause)
    }
}

impl Serialize for ProbeFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ProbeFailure", 2)?;
        state.serialize_field("subsystem", &self.subsystem)?;
        state.serialize_field("message", &self.cause.to_string())?;
        state.end()
    }
}
