//! Error types for entity records.

use thiserror::Error;

/// Errors that can occur when working with entity records.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] pkvault_common::Error),

    /// Buffer length matches neither the stored nor the party size.
    #[error("invalid {format} size: expected {stored} or {party} bytes, got {actual}")]
    InvalidSize {
        format: &'static str,
        stored: usize,
        party: usize,
        actual: usize,
    },

    /// A format descriptor is internally inconsistent.
    #[error("invalid {format} layout: {reason}")]
    InvalidLayout {
        format: &'static str,
        reason: String,
    },
}

/// Result type for entity operations.
pub type Result<T> = std::result::Result<T, Error>;
