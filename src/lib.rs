//! This file is the root of the `rowstream` Rust crate.
//!
//! `rowstream` is the decoding core of a client-side result adapter: it walks
//! chunked, columnar query results produced by an embedded analytical engine
//! and exposes them through a forward-only, row-oriented, typed accessor API.
//!
//! Its responsibilities here are strictly limited to:
//! 1.  Declaring all the top-level modules of the library.
//! 2.  Re-exporting the types most callers need.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod coerce;
pub mod config;
pub mod cursor;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod null_handling;
pub mod observability;
pub mod result;
pub mod traits;
pub mod types;
pub mod vector;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{open_record_batch_stream, RecordBatchSource};
pub use config::StreamConfig;
pub use cursor::ChunkCursor;
pub use engine::{ChunkSource, MemorySource};
pub use error::{EngineError, RowStreamError};
pub use result::{
    Capability, ColumnIndex, ColumnMeta, Concurrency, FetchDirection, FromColumn, ResultMetadata,
    ResultStream, ResultType,
};
pub use types::{Blob, BlobReader, DeclaredType, EngineType, Value};
pub use vector::{Chunk, ColumnData, ColumnVector, VarValue};
