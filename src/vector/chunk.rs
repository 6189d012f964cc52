//! One batch of rows delivered together by the engine.

use crate::error::RowStreamError;
use crate::vector::column::ColumnVector;

/// An ordered set of equally long columns. A chunk with zero rows marks the
/// end of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    columns: Vec<ColumnVector>,
    row_count: usize,
}

impl Chunk {
    /// Assembles a chunk, rejecting columns of differing lengths.
    pub fn new(columns: Vec<ColumnVector>) -> Result<Self, RowStreamError> {
        let row_count = columns.first().map_or(0, ColumnVector::row_count);
        if let Some((idx, col)) = columns
            .iter()
            .enumerate()
            .find(|(_, col)| col.row_count() != row_count)
        {
            return Err(RowStreamError::MalformedChunk(format!(
                "column {} has {} rows, expected {}",
                idx,
                col.row_count(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    /// The end-of-stream marker.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The column at the 0-based position `idx`.
    pub fn column(&self, idx: usize) -> Option<&ColumnVector> {
        self.columns.get(idx)
    }

    pub fn columns(&self) -> &[ColumnVector] {
        &self.columns
    }
}
