//! Pure, stateless byte kernels used by the scalar decoder.
//!
//! Nothing in here knows about cursors, chunks, or declared types; each kernel
//! takes bytes in and hands a fixed-size array or scalar back.

pub mod hugeint;
pub mod widen;

pub use hugeint::{hugeint_from_le, HUGEINT_WIDTH};
pub use widen::{read_le_array, zero_extend_le};
