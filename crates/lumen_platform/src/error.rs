//! Platform error types

use thiserror::Error;

/// Host capability errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The host does not expose the capability at all
    #[error("Capability not available: {0}")]
    Unavailable(String),

    /// The capability exists but could not be queried
    #[error("Capability query failed: {0}")]
    QueryFailed(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
