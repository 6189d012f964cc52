// In: src/engine.rs

//! The contract between the cursor and whatever produces chunks.
//!
//! The engine is an opaque collaborator: it hands out chunks on demand and owns
//! the resources behind the stream until `release` is called. The cursor calls
//! `release` exactly once.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::EngineError;
use crate::vector::Chunk;

/// A pull-based producer of chunks for one executed query.
pub trait ChunkSource {
    /// Returns the next chunk. A chunk with zero rows marks the end of the
    /// stream, and every later call must return an empty chunk again.
    fn fetch_next_chunk(&mut self) -> Result<Chunk, EngineError>;

    /// Frees engine-side resources for this stream.
    fn release(&mut self);

    /// The engine's advisory batch size. Reporting only.
    fn configured_fetch_size(&self) -> i64;
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn fetch_next_chunk(&mut self) -> Result<Chunk, EngineError> {
        (**self).fetch_next_chunk()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn configured_fetch_size(&self) -> i64 {
        (**self).configured_fetch_size()
    }
}

//==================================================================================
// In-memory source
//==================================================================================

/// A queue of pre-built chunks.
///
/// Empty chunks placed in the queue are delivered as-is, so a caller can end
/// the stream early. Once the queue drains every fetch yields `Chunk::empty()`.
#[derive(Debug, Default)]
pub struct MemorySource {
    chunks: VecDeque<Chunk>,
    fetch_size: i64,
    fetches: usize,
    releases: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn new(chunks: impl IntoIterator<Item = Chunk>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the value reported by `configured_fetch_size`.
    pub fn with_fetch_size(mut self, fetch_size: i64) -> Self {
        self.fetch_size = fetch_size;
        self
    }

    /// A shared counter of `release` calls that outlives the source itself.
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }

    /// How many times a chunk (empty or not) has been requested.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl ChunkSource for MemorySource {
    fn fetch_next_chunk(&mut self) -> Result<Chunk, EngineError> {
        self.fetches += 1;
        Ok(self.chunks.pop_front().unwrap_or_default())
    }

    fn release(&mut self) {
        self.chunks.clear();
        self.releases.fetch_add(1, Ordering::SeqCst);
    }

    fn configured_fetch_size(&self) -> i64 {
        self.fetch_size
    }
}
