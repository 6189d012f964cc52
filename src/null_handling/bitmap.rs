//! The null indicator: one bit per row, set when the row's value is absent.
//!
//! Arrow tracks *validity* (set = present); the engine's chunk contract tracks
//! *nullness* (set = absent). Conversions between the two live here and
//! nowhere else.

use arrow::array::Array;
use arrow::buffer::NullBuffer;
use bitvec::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullIndicator {
    bits: BitVec,
}

//==================================================================================
// 1. Constructors
//==================================================================================

impl NullIndicator {
    /// A column with `len` rows and no nulls.
    pub fn all_valid(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, len),
        }
    }

    /// Builds from one flag per row, `true` meaning the value is absent.
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            bits: flags.iter().copied().collect(),
        }
    }

    /// Inverts an Arrow validity buffer into a null indicator.
    pub fn from_null_buffer(nulls: &NullBuffer) -> Self {
        Self {
            bits: nulls.iter().map(|valid| !valid).collect(),
        }
    }

    /// Reads the logical nulls of any Arrow array.
    pub fn from_arrow(array: &dyn Array) -> Self {
        match array.logical_nulls() {
            Some(nulls) => Self::from_null_buffer(&nulls),
            None => Self::all_valid(array.len()),
        }
    }
}

//==================================================================================
// 2. Queries
//==================================================================================

impl NullIndicator {
    /// Whether the value at `row` is absent. Rows past the end read as present;
    /// the subsequent value read reports the overrun.
    pub fn is_null(&self, row: usize) -> bool {
        self.bits.get(row).map(|bit| *bit).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.bits.count_ones()
    }
}
