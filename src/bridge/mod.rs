// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the boundary between Arrow data and the engine's chunk layout.
// It lets any `RecordBatchReader` stand in for the engine behind a `ResultStream`.
//
// Data Flow:
//
//   1. [RecordBatchSource]          -> Wraps a RecordBatchReader as a ChunkSource
//         |
//         `-> on each fetch, pulls the next non-empty RecordBatch
//
//   2. [arrow_impl]                 -> Converts each `&dyn Array` into a ColumnVector
//         |
//         `-> primitive bytes, boxed strings/binaries, temporal text, or Opaque
//
//   3. [ChunkCursor / ResultStream] -> Typed, row-oriented access over the chunks
//
// ====================================================================================
pub(crate) mod arrow_impl;
pub mod record_batch_source;

use std::sync::Arc;

use arrow::record_batch::RecordBatchReader;

use crate::config::StreamConfig;
use crate::error::RowStreamError;
use crate::result::ResultStream;

pub use record_batch_source::RecordBatchSource;

/// Opens a `ResultStream` over an Arrow reader, deriving the column metadata
/// from the reader's schema.
pub fn open_record_batch_stream<R: RecordBatchReader>(
    reader: R,
    config: Arc<StreamConfig>,
) -> Result<ResultStream<RecordBatchSource<R>>, RowStreamError> {
    let source = RecordBatchSource::new(reader);
    let metadata = Arc::new(source.metadata());
    ResultStream::open(source, metadata, config)
}
