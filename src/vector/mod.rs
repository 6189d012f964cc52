//! In-memory chunk layout: the engine hands over `Chunk`s, each a set of
//! `ColumnVector`s holding either a fixed-width byte buffer or a per-row value
//! arena, plus a null indicator.

pub mod chunk;
pub mod column;

pub use chunk::Chunk;
pub use column::{ColumnData, ColumnVector, VarValue};
