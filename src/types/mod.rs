//! This module defines the core, strongly-typed data representations used
//! throughout the crate.
//!
//! It includes the canonical `EngineType` enum, which replaces string-based
//! type dispatch, the boxed `Value` a cell decodes to, and the read-only `Blob`
//! handle for binary cells.

pub mod blob;
pub mod engine_type;
pub mod value;

// Re-export the main type(s) for easier access.
pub use blob::{Blob, BlobReader};
pub use engine_type::{DeclaredType, EngineType, Layout};
pub use value::Value;
