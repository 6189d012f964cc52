// In: src/result/mod.rs

//! The row-oriented, typed accessor API over a chunk stream.
//!
//! `ResultStream` pairs a `ChunkCursor` with query-scoped metadata and exposes
//! per-column getters addressed by 1-based ordinal or by name. Every getter
//! checks, in order: closed, column bounds, current row, null indicator. Only
//! then is the cell decoded.

pub mod capability;
pub mod from_column;
pub mod metadata;


use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::StreamConfig;
use crate::cursor::ChunkCursor;
use crate::engine::ChunkSource;
use crate::error::RowStreamError;
use crate::observability;
use crate::types::{Blob, Value};
use crate::vector::ColumnVector;

pub use capability::{Capability, Concurrency, FetchDirection, ResultType};
pub use from_column::FromColumn;
pub use metadata::{ColumnMeta, ResultMetadata};

//==================================================================================
// 1. Column Addressing
//==================================================================================

/// Anything a getter can address a column by.
pub trait ColumnIndex {
    /// Resolves to a 1-based ordinal. Bounds are checked by the caller.
    fn resolve(&self, metadata: &ResultMetadata) -> Result<usize, RowStreamError>;
}

impl ColumnIndex for usize {
    fn resolve(&self, _metadata: &ResultMetadata) -> Result<usize, RowStreamError> {
        Ok(*self)
    }
}

impl ColumnIndex for &str {
    fn resolve(&self, metadata: &ResultMetadata) -> Result<usize, RowStreamError> {
        metadata.find_column(self)
    }
}

impl ColumnIndex for String {
    fn resolve(&self, metadata: &ResultMetadata) -> Result<usize, RowStreamError> {
        metadata.find_column(self)
    }
}

//==================================================================================
// 2. ResultStream
//==================================================================================

pub struct ResultStream<S: ChunkSource> {
    metadata: Arc<ResultMetadata>,
    cursor: ChunkCursor<S>,
    config: Arc<StreamConfig>,
    /// Set by the most recent getter, whatever its column.
    was_null: bool,
    fetch_size: i64,
    fetch_direction: FetchDirection,
}

impl<S: ChunkSource> ResultStream<S> {
    /// Takes ownership of the engine stream.
    pub fn open(
        source: S,
        metadata: Arc<ResultMetadata>,
        config: Arc<StreamConfig>,
    ) -> Result<Self, RowStreamError> {
        config.validate()?;
        if config.verbose_logging {
            observability::enable_verbose_logging(None)?;
        }
        log::debug!(
            "Opening result stream over {} column(s).",
            metadata.column_count()
        );
        Ok(Self {
            metadata,
            cursor: ChunkCursor::new(source),
            fetch_size: config.fetch_size,
            fetch_direction: config.fetch_direction,
            config,
            was_null: false,
        })
    }

    /// Moves to the next row. `Ok(false)` once there are no more rows, or after
    /// `close`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool, RowStreamError> {
        self.cursor.advance()
    }

    /// Releases the engine stream. Safe to call any number of times.
    pub fn close(&mut self) {
        self.cursor.close();
    }

    pub fn is_closed(&self) -> bool {
        self.cursor.is_closed()
    }

    /// Whether the most recent getter read a null.
    pub fn was_null(&self) -> Result<bool, RowStreamError> {
        self.ensure_open()?;
        Ok(self.was_null)
    }

    pub fn metadata(&self) -> Result<&Arc<ResultMetadata>, RowStreamError> {
        self.ensure_open()?;
        Ok(&self.metadata)
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// The 1-based ordinal of the first column named exactly `name`.
    pub fn find_column(&self, name: &str) -> Result<usize, RowStreamError> {
        self.ensure_open()?;
        self.metadata.find_column(name)
    }

    /// Total rows advanced over so far.
    pub fn row_number(&self) -> u64 {
        self.cursor.rows_consumed()
    }

    fn ensure_open(&self) -> Result<(), RowStreamError> {
        if self.is_closed() {
            return Err(RowStreamError::StreamClosed);
        }
        Ok(())
    }

    /// Resolves the addressed cell, or `None` when it is null. Updates the
    /// null flag on every call that gets past the position checks.
    fn cell<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<(&ColumnVector, usize)>, RowStreamError> {
        self.ensure_open()?;
        let ordinal = index.resolve(&self.metadata)?;
        let column_count = self.metadata.column_count();
        if ordinal == 0 || ordinal > column_count {
            return Err(RowStreamError::IndexOutOfRange {
                index: ordinal,
                column_count,
            });
        }
        let (chunk, row) = self.cursor.current()?;
        let column = chunk.column(ordinal - 1).ok_or_else(|| {
            RowStreamError::MalformedChunk(format!(
                "chunk has {} column(s), metadata declares {}",
                chunk.column_count(),
                column_count
            ))
        })?;
        self.was_null = column.is_null(row);
        Ok((!self.was_null).then_some((column, row)))
    }

    //==============================================================================
    // 3. Getters
    //==============================================================================

    /// Reads the addressed column of the current row as `T`.
    pub fn get<T: FromColumn, I: ColumnIndex>(&mut self, index: I) -> Result<T, RowStreamError> {
        match self.cell(index)? {
            Some((column, row)) => T::from_cell(column, row),
            None => Ok(T::null_sentinel()),
        }
    }

    pub fn get_bool<I: ColumnIndex>(&mut self, index: I) -> Result<bool, RowStreamError> {
        self.get(index)
    }

    pub fn get_i8<I: ColumnIndex>(&mut self, index: I) -> Result<i8, RowStreamError> {
        self.get(index)
    }

    pub fn get_i16<I: ColumnIndex>(&mut self, index: I) -> Result<i16, RowStreamError> {
        self.get(index)
    }

    pub fn get_i32<I: ColumnIndex>(&mut self, index: I) -> Result<i32, RowStreamError> {
        self.get(index)
    }

    pub fn get_i64<I: ColumnIndex>(&mut self, index: I) -> Result<i64, RowStreamError> {
        self.get(index)
    }

    /// HUGEINT, and UBIGINT promoted.
    pub fn get_i128<I: ColumnIndex>(&mut self, index: I) -> Result<i128, RowStreamError> {
        self.get(index)
    }

    pub fn get_f32<I: ColumnIndex>(&mut self, index: I) -> Result<f32, RowStreamError> {
        self.get(index)
    }

    pub fn get_f64<I: ColumnIndex>(&mut self, index: I) -> Result<f64, RowStreamError> {
        self.get(index)
    }

    pub fn get_string<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<String>, RowStreamError> {
        self.get(index)
    }

    pub fn get_date<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<NaiveDate>, RowStreamError> {
        self.get(index)
    }

    pub fn get_time<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<NaiveTime>, RowStreamError> {
        self.get(index)
    }

    pub fn get_timestamp<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<NaiveDateTime>, RowStreamError> {
        self.get(index)
    }

    pub fn get_blob<I: ColumnIndex>(&mut self, index: I) -> Result<Option<Blob>, RowStreamError> {
        self.get(index)
    }

    /// The cell's natural boxed value.
    pub fn get_value<I: ColumnIndex>(
        &mut self,
        index: I,
    ) -> Result<Option<Value>, RowStreamError> {
        self.get(index)
    }

    //==============================================================================
    // 4. Fetch Controls
    //==============================================================================

    /// Recorded only; the engine decides chunk sizes.
    pub fn set_fetch_size(&mut self, rows: i64) -> Result<(), RowStreamError> {
        self.ensure_open()?;
        if rows < 0 {
            return Err(RowStreamError::InvalidFetchSize(rows));
        }
        self.fetch_size = rows;
        Ok(())
    }

    /// The engine's configured batch size.
    pub fn fetch_size(&self) -> Result<i64, RowStreamError> {
        self.cursor
            .configured_fetch_size()
            .ok_or(RowStreamError::StreamClosed)
    }

    /// The size last accepted by `set_fetch_size` (or from the config).
    pub fn requested_fetch_size(&self) -> i64 {
        self.fetch_size
    }

    pub fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<(), RowStreamError> {
        self.ensure_open()?;
        if !direction.is_supported() {
            return Err(RowStreamError::InvalidFetchDirection(direction));
        }
        self.fetch_direction = direction;
        Ok(())
    }

    pub fn fetch_direction(&self) -> Result<FetchDirection, RowStreamError> {
        self.ensure_open()?;
        Ok(self.fetch_direction)
    }

    pub fn result_type(&self) -> Result<ResultType, RowStreamError> {
        self.ensure_open()?;
        Ok(ResultType::ForwardOnly)
    }

    pub fn concurrency(&self) -> Result<Concurrency, RowStreamError> {
        self.ensure_open()?;
        Ok(Concurrency::ReadOnly)
    }

    //==============================================================================
    // 5. Unsupported Capabilities
    //==============================================================================

    pub fn previous(&mut self) -> Result<bool, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::ScrollBackward))
    }

    pub fn absolute(&mut self, _row: i64) -> Result<bool, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::AbsolutePositioning))
    }

    pub fn relative(&mut self, _rows: i64) -> Result<bool, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::RelativePositioning))
    }

    pub fn first(&mut self) -> Result<bool, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::AbsolutePositioning))
    }

    pub fn last(&mut self) -> Result<bool, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::AbsolutePositioning))
    }

    pub fn before_first(&mut self) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::AbsolutePositioning))
    }

    pub fn after_last(&mut self) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::AbsolutePositioning))
    }

    pub fn update_value<I: ColumnIndex>(
        &mut self,
        _index: I,
        _value: Value,
    ) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::RowUpdate))
    }

    pub fn insert_row(&mut self) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::RowInsertion))
    }

    pub fn delete_row(&mut self) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::RowDeletion))
    }

    pub fn character_stream<I: ColumnIndex>(
        &mut self,
        _index: I,
    ) -> Result<Box<dyn std::io::Read>, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::CharacterStreams))
    }
}
