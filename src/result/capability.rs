// In: src/result/capability.rs

//! The fixed set of result-set capabilities this adapter deliberately does not
//! provide, plus the small enums describing the cursor's fetch contract.
//!
//! Instead of a long tail of stub methods, every absent capability is named
//! here once and reported through `RowStreamError::UnsupportedOperation`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability the forward-only, read-only cursor does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Moving back one row (`previous`).
    ScrollBackward,
    /// Jumping to an absolute row, including `first`/`last`/`before_first`/`after_last`.
    AbsolutePositioning,
    /// Moving by a signed row delta.
    RelativePositioning,
    /// Writing a value into the current row.
    RowUpdate,
    RowInsertion,
    RowDeletion,
    /// Streaming character (`Reader`-style) access to text values.
    CharacterStreams,
    /// Positional writes, truncation, or output streams on a BLOB.
    BlobMutation,
    /// Pattern search inside a BLOB.
    BlobSearch,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ScrollBackward => "scroll backward",
            Capability::AbsolutePositioning => "absolute positioning",
            Capability::RelativePositioning => "relative positioning",
            Capability::RowUpdate => "row update",
            Capability::RowInsertion => "row insertion",
            Capability::RowDeletion => "row deletion",
            Capability::CharacterStreams => "character streams",
            Capability::BlobMutation => "blob mutation",
            Capability::BlobSearch => "blob search",
        };
        f.write_str(name)
    }
}

/// The fetch direction hint. Only `Forward` and `Unknown` are accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchDirection {
    #[default]
    Forward,
    Reverse,
    Unknown,
}

impl FetchDirection {
    pub fn is_supported(&self) -> bool {
        matches!(self, FetchDirection::Forward | FetchDirection::Unknown)
    }
}

/// Scrollability of the result. This adapter is always `ForwardOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    ForwardOnly,
}

/// Updatability of the result. This adapter is always `ReadOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    ReadOnly,
}
