//! Per-row nullability for a single column of a single chunk.

pub mod bitmap;

pub use bitmap::NullIndicator;
