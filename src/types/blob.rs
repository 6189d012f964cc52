//! Read-only access to a BLOB cell.
//!
//! A `Blob` shares the chunk's byte region rather than copying it, so it stays
//! valid after the cursor has moved on and the chunk has been replaced.

use std::io::{self, Read, Write};
use std::sync::Arc;

use crate::error::RowStreamError;
use crate::result::capability::Capability;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Arc<[u8]>,
}

impl Blob {
    pub fn new(bytes: Arc<[u8]>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The whole region as a borrowed slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a consumable stream over the full byte range.
    pub fn binary_stream(&self) -> BlobReader {
        BlobReader {
            bytes: Arc::clone(&self.bytes),
            pos: 0,
        }
    }

    /// Copies `len` bytes starting at the 0-based offset `pos`.
    pub fn get_bytes(&self, pos: u64, len: usize) -> Result<Vec<u8>, RowStreamError> {
        let out_of_bounds = || RowStreamError::BlobRangeOutOfBounds {
            pos,
            len,
            size: self.len(),
        };
        let start = usize::try_from(pos).map_err(|_| out_of_bounds())?;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.len())
            .ok_or_else(out_of_bounds)?;
        Ok(self.bytes[start..end].to_vec())
    }

    /// Releases nothing; the region is freed with its last reference.
    pub fn free(&self) {}

    pub fn set_bytes(&mut self, _pos: u64, _bytes: &[u8]) -> Result<usize, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::BlobMutation))
    }

    pub fn truncate(&mut self, _len: u64) -> Result<(), RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::BlobMutation))
    }

    pub fn writer(&mut self, _pos: u64) -> Result<Box<dyn Write>, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::BlobMutation))
    }

    pub fn position(&self, _pattern: &[u8], _start: u64) -> Result<u64, RowStreamError> {
        Err(RowStreamError::UnsupportedOperation(Capability::BlobSearch))
    }
}

/// A `Read` over a blob's bytes. Reading past the end yields `Ok(0)`.
#[derive(Debug)]
pub struct BlobReader {
    bytes: Arc<[u8]>,
    pos: usize,
}

impl Read for BlobReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.bytes[self.pos..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}
