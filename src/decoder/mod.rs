// In: src/decoder/mod.rs

//! Typed binary extraction from a `ColumnVector`.
//!
//! None of these functions look at the null indicator; callers check it first
//! and only decode rows that carry a value.

pub mod fixed;
pub mod natural;
pub mod variable;

pub use fixed::{
    decode_bool, decode_f32, decode_f64, decode_i128, decode_i16, decode_i32, decode_i64,
    decode_i8,
};
pub use natural::decode_value;
pub use variable::{decode_blob, decode_text, textual_cell};

/// The outcome of a fast-path decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The column's declared type is the accessor's native type (or the
    /// unsigned type that promotes into it).
    Native(T),
    /// Some other recognised type; the caller falls back to coercion.
    Foreign,
}
