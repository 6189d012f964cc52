// In: src/bridge/record_batch_source.rs

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatchReader;

use crate::bridge::arrow_impl;
use crate::engine::ChunkSource;
use crate::error::EngineError;
use crate::result::ResultMetadata;
use crate::vector::Chunk;

/// Serves the batches of an Arrow `RecordBatchReader` as chunks.
///
/// Zero-row batches in the middle of the stream are skipped, since an empty
/// chunk would end it. The reader is dropped on `release`.
pub struct RecordBatchSource<R: RecordBatchReader> {
    reader: Option<R>,
    schema: SchemaRef,
    fetch_size: i64,
    batches_read: usize,
}

impl<R: RecordBatchReader> RecordBatchSource<R> {
    pub fn new(reader: R) -> Self {
        let schema = reader.schema();
        Self {
            reader: Some(reader),
            schema,
            fetch_size: 0,
            batches_read: 0,
        }
    }

    /// Sets the value reported as the engine's batch size.
    pub fn with_fetch_size(mut self, fetch_size: i64) -> Self {
        self.fetch_size = fetch_size;
        self
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Column metadata derived from the reader's schema.
    pub fn metadata(&self) -> ResultMetadata {
        ResultMetadata::from_schema(&self.schema)
    }

    pub fn batches_read(&self) -> usize {
        self.batches_read
    }
}

impl<R: RecordBatchReader> ChunkSource for RecordBatchSource<R> {
    fn fetch_next_chunk(&mut self) -> Result<Chunk, EngineError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(Chunk::empty());
        };
        for batch in reader {
            let batch = batch?;
            self.batches_read += 1;
            if batch.num_rows() == 0 {
                log::trace!("Skipping empty record batch #{}.", self.batches_read);
                continue;
            }
            return Ok(arrow_impl::record_batch_to_chunk(&batch)?);
        }
        Ok(Chunk::empty())
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            log::debug!(
                "Released record batch reader after {} batch(es).",
                self.batches_read
            );
        }
    }

    fn configured_fetch_size(&self) -> i64 {
        self.fetch_size
    }
}
