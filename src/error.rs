// Provider and snapshot errors

use thiserror::Error;

/// Failure of a single provider read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The backend itself failed (lock poisoned, blocking task lost).
    #[error("provider backend: {0}")]
    Backend(String),
    /// The host reports nothing for this read.
    #[error("not supported on this host: {0}")]
    Unsupported(&'static str),
}

/// Failure of a whole snapshot. No partial snapshot is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("reading CPU descriptor failed: {0}")]
    Static(#[source] ProviderError),
    #[error("reading CPU load failed: {0}")]
    Load(#[source] ProviderError),
    #[error("invalid CPU descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("snapshot cancelled")]
    Cancelled,
}

impl SnapshotError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            SnapshotError::Cancelled => 130,
            _ => 1,
        }
    }
}
