//==================================================================================
// Unit Tests for the ChunkCursor
//==================================================================================

use std::sync::atomic::Ordering;

use crate::cursor::ChunkCursor;
use crate::engine::{ChunkSource, MemorySource};
use crate::error::{EngineError, RowStreamError};
use crate::types::EngineType;
use crate::vector::{Chunk, ColumnVector};

// Test Helpers
fn int_chunk(values: &[i32]) -> Chunk {
    let values: Vec<Option<i32>> = values.iter().copied().map(Some).collect();
    Chunk::new(vec![ColumnVector::from_values(EngineType::Integer, &values).unwrap()]).unwrap()
}

/// A source whose first fetch fails.
struct FailingSource;

impl ChunkSource for FailingSource {
    fn fetch_next_chunk(&mut self) -> Result<Chunk, EngineError> {
        Err("connection reset".into())
    }
    fn release(&mut self) {}
    fn configured_fetch_size(&self) -> i64 {
        0
    }
}

#[test]
fn test_two_chunks_yield_five_rows_then_false_forever() {
    let source = MemorySource::new(vec![int_chunk(&[1, 2, 3]), int_chunk(&[4, 5])]);
    let mut cursor = ChunkCursor::new(source);

    let mut seen = Vec::new();
    while cursor.advance().unwrap() {
        let (chunk, row) = cursor.current().unwrap();
        let bytes = chunk.column(0).unwrap().fixed_bytes().unwrap();
        seen.push(i32::from_le_bytes(bytes[row * 4..row * 4 + 4].try_into().unwrap()));
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    assert_eq!(cursor.rows_consumed(), 5);

    for _ in 0..10 {
        assert!(!cursor.advance().unwrap());
    }
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.rows_consumed(), 5);
}

#[test]
fn test_empty_stream_never_yields() {
    let mut cursor = ChunkCursor::new(MemorySource::new(vec![]));
    assert!(!cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
}

#[test]
fn test_early_empty_chunk_ends_the_stream() {
    let source = MemorySource::new(vec![int_chunk(&[1]), Chunk::empty(), int_chunk(&[2])]);
    let mut cursor = ChunkCursor::new(source);
    assert!(cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
    assert!(!cursor.advance().unwrap());
}

#[test]
fn test_no_current_row_before_first_advance_and_after_exhaustion() {
    let mut cursor = ChunkCursor::new(MemorySource::new(vec![int_chunk(&[7])]));
    assert!(matches!(cursor.current(), Err(RowStreamError::NoCurrentRow)));
    assert!(cursor.advance().unwrap());
    assert_eq!(cursor.current().unwrap().1, 0);
    assert!(!cursor.advance().unwrap());
    assert!(matches!(cursor.current(), Err(RowStreamError::NoCurrentRow)));
}

#[test]
fn test_close_is_idempotent_and_releases_once() {
    let source = MemorySource::new(vec![int_chunk(&[1, 2])]);
    let releases = source.release_counter();
    let mut cursor = ChunkCursor::new(source);
    assert!(cursor.advance().unwrap());

    cursor.close();
    assert!(cursor.is_closed());
    cursor.close();
    assert!(cursor.is_closed());
    assert_eq!(releases.load(Ordering::SeqCst), 1);

    assert!(!cursor.advance().unwrap());
    assert!(matches!(cursor.current(), Err(RowStreamError::StreamClosed)));
    assert_eq!(cursor.configured_fetch_size(), None);

    drop(cursor);
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_drop_releases_the_stream() {
    let source = MemorySource::new(vec![int_chunk(&[1])]);
    let releases = source.release_counter();
    {
        let _cursor = ChunkCursor::new(source);
    }
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_engine_failure_propagates() {
    let mut cursor = ChunkCursor::new(FailingSource);
    match cursor.advance() {
        Err(RowStreamError::Engine(inner)) => assert_eq!(inner.to_string(), "connection reset"),
        other => panic!("expected engine error, got {:?}", other),
    }
    assert!(!cursor.is_closed());
}
