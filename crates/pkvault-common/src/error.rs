//! Error types for pkvault-common.

use thiserror::Error;

/// Common error type for pkvault operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A field does not fit inside the buffer it addresses.
    #[error("field at {offset:#06x} ({width} bytes) exceeds buffer of {len} bytes")]
    FieldOutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
