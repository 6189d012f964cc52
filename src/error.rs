// In: src/error.rs

//! This module defines the single, unified error type for the entire rowstream library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

use crate::result::capability::{Capability, FetchDirection};

/// The boxed error type an engine hands back from a failed fetch.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum RowStreamError {
    // =========================================================================
    // === Cursor & Addressing Errors
    // =========================================================================
    #[error("ResultSet was closed")]
    StreamClosed,

    #[error("Column index {index} out of bounds (column count: {column_count})")]
    IndexOutOfRange { index: usize, column_count: usize },

    #[error("Could not find column with label {0}")]
    ColumnNotFound(String),

    /// Raised when a column is read before the first successful `next()` or
    /// after the stream has been exhausted.
    #[error("No current row: call next() before reading columns")]
    NoCurrentRow,

    // =========================================================================
    // === Decoding & Conversion Errors
    // =========================================================================
    #[error("Not implemented type: {0}")]
    UnsupportedType(String),

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(Capability),

    #[error("Cannot convert '{value}' to {target}")]
    ConversionFailure { value: String, target: &'static str },

    #[error("Blob range {pos}..+{len} exceeds blob of {size} bytes")]
    BlobRangeOutOfBounds { pos: u64, len: usize, size: usize },

    /// The engine delivered a chunk whose layout contradicts its declared types.
    #[error("Malformed chunk: {0}")]
    MalformedChunk(String),

    // =========================================================================
    // === Configuration Errors
    // =========================================================================
    #[error("Fetch size has to be >= 0, got {0}")]
    InvalidFetchSize(i64),

    #[error("Fetch direction {0:?} is not supported on a forward-only result")]
    InvalidFetchDirection(FetchDirection),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// A fetch failure reported by the engine, passed through unchanged.
    #[error("Engine fetch failed: {0}")]
    Engine(#[source] EngineError),

    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the underlying I/O subsystem (e.g. opening a log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a `StreamConfig`.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl RowStreamError {
    /// Shorthand used by the coercer when a boxed value cannot be converted.
    pub(crate) fn conversion(value: impl ToString, target: &'static str) -> Self {
        RowStreamError::ConversionFailure {
            value: value.to_string(),
            target,
        }
    }
}
