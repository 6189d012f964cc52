// In: src/cursor/mod.rs

//! The forward-only row iteration state machine.
//!
//! ```text
//! Unstarted ──advance──▶ Active ◀──(fetch boundary)──▶ Active
//!                          │
//!                          └──empty chunk──▶ Exhausted
//! any state ──close──▶ Closed
//! ```
//!
//! The cursor owns the engine stream and releases it exactly once, either on
//! an explicit `close` or when dropped.

use crate::engine::ChunkSource;
use crate::error::RowStreamError;
use crate::vector::Chunk;

#[cfg(test)]
mod tests;

#[derive(Debug)]
enum CursorState {
    Unstarted,
    /// `row` is always in `[0, chunk.row_count())`.
    Active { chunk: Chunk, row: usize },
    Exhausted,
    Closed,
}

/// Holds the current chunk and row offset over a `ChunkSource`.
pub struct ChunkCursor<S: ChunkSource> {
    source: Option<S>,
    state: CursorState,
    chunks_fetched: u64,
    rows_consumed: u64,
}

impl<S: ChunkSource> ChunkCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            state: CursorState::Unstarted,
            chunks_fetched: 0,
            rows_consumed: 0,
        }
    }

    /// Moves to the next row, fetching a new chunk when the current one is
    /// used up. Returns `Ok(false)` once the stream is exhausted or closed, and
    /// keeps doing so on every later call without touching the engine.
    ///
    /// Engine fetch failures propagate unchanged and leave the state as it was.
    pub fn advance(&mut self) -> Result<bool, RowStreamError> {
        match &mut self.state {
            CursorState::Exhausted | CursorState::Closed => return Ok(false),
            CursorState::Active { chunk, row } if *row + 1 < chunk.row_count() => {
                *row += 1;
                self.rows_consumed += 1;
                return Ok(true);
            }
            _ => {}
        }

        let source = match self.source.as_mut() {
            Some(source) => source,
            None => {
                self.state = CursorState::Closed;
                return Ok(false);
            }
        };

        let chunk = source.fetch_next_chunk().map_err(RowStreamError::Engine)?;
        if chunk.is_empty() {
            log::debug!(
                "End of stream after {} chunk(s), {} row(s).",
                self.chunks_fetched,
                self.rows_consumed
            );
            // Drops the previous chunk and its value arena in full.
            self.state = CursorState::Exhausted;
            return Ok(false);
        }

        self.chunks_fetched += 1;
        log::debug!(
            "Fetched chunk #{}: {} row(s) x {} column(s).",
            self.chunks_fetched,
            chunk.row_count(),
            chunk.column_count()
        );
        self.state = CursorState::Active { chunk, row: 0 };
        self.rows_consumed += 1;
        Ok(true)
    }

    /// The chunk and row offset the cursor is positioned on.
    pub fn current(&self) -> Result<(&Chunk, usize), RowStreamError> {
        match &self.state {
            CursorState::Active { chunk, row } => Ok((chunk, *row)),
            CursorState::Closed => Err(RowStreamError::StreamClosed),
            CursorState::Unstarted | CursorState::Exhausted => Err(RowStreamError::NoCurrentRow),
        }
    }

    /// Releases the engine stream and moves to `Closed`. Further calls do
    /// nothing.
    pub fn close(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            log::info!(
                "Result stream closed after {} row(s) in {} chunk(s).",
                self.rows_consumed,
                self.chunks_fetched
            );
        }
        self.state = CursorState::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, CursorState::Closed)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }

    /// Total successful `advance` calls so far.
    pub fn rows_consumed(&self) -> u64 {
        self.rows_consumed
    }

    /// The engine's advisory batch size, or `None` once closed.
    pub fn configured_fetch_size(&self) -> Option<i64> {
        self.source.as_ref().map(ChunkSource::configured_fetch_size)
    }
}

impl<S: ChunkSource> Drop for ChunkCursor<S> {
    fn drop(&mut self) {
        self.close();
    }
}
