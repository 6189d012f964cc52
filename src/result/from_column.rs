// In: src/result/from_column.rs

//! The per-target-type glue between a cell and a typed getter.
//!
//! Every target type provides its null sentinel and a decode path: the
//! decoder's fast path when the column's declared type matches, otherwise the
//! natural `Value` run through the coercer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::coerce;
use crate::decoder::{self, Decoded};
use crate::error::RowStreamError;
use crate::types::{Blob, Value};
use crate::vector::ColumnVector;

/// A type a getter can produce from one cell.
pub trait FromColumn: Sized {
    /// Name used in `ConversionFailure` errors.
    const TARGET: &'static str;

    /// Returned for rows whose null indicator is set.
    fn null_sentinel() -> Self;

    /// Decodes a non-null cell.
    fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError>;
}

/// The cell's natural value, logged as a fallback.
fn natural(column: &ColumnVector, row: usize, target: &str) -> Result<Option<Value>, RowStreamError> {
    log::trace!(
        "Coercing {} column row {} to {}.",
        column.declared(),
        row,
        target
    );
    decoder::decode_value(column, row)
}

/// Converts through the natural value; temporal text that did not parse fails
/// with the raw text.
fn coerced<T>(
    column: &ColumnVector,
    row: usize,
    target: &'static str,
    convert: fn(&Value) -> Result<T, RowStreamError>,
) -> Result<T, RowStreamError> {
    match natural(column, row, target)? {
        Some(value) => {
            log::trace!("Converting {} value to {}.", value.kind(), target);
            convert(&value)
        }
        None => Err(RowStreamError::conversion(
            decoder::textual_cell(column, row)?,
            target,
        )),
    }
}

//==================================================================================
// 1. Scalar Targets
//==================================================================================

macro_rules! impl_from_column_scalar {
    ($T:ty, $label:literal, $sentinel:expr, $decode:path, $coerce:path) => {
        impl FromColumn for $T {
            const TARGET: &'static str = $label;

            fn null_sentinel() -> Self {
                $sentinel
            }

            fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError> {
                match $decode(column, row)? {
                    Decoded::Native(v) => Ok(v),
                    Decoded::Foreign => coerced(column, row, Self::TARGET, $coerce),
                }
            }
        }
    };
}

impl_from_column_scalar!(bool, "bool", false, decoder::decode_bool, coerce::to_bool);
impl_from_column_scalar!(i8, "i8", 0, decoder::decode_i8, coerce::to_i8);
impl_from_column_scalar!(i16, "i16", 0, decoder::decode_i16, coerce::to_i16);
impl_from_column_scalar!(i32, "i32", 0, decoder::decode_i32, coerce::to_i32);
impl_from_column_scalar!(i64, "i64", 0, decoder::decode_i64, coerce::to_i64);
impl_from_column_scalar!(i128, "i128", 0, decoder::decode_i128, coerce::to_i128);
impl_from_column_scalar!(f32, "f32", f32::NAN, decoder::decode_f32, coerce::to_f32);
impl_from_column_scalar!(f64, "f64", f64::NAN, decoder::decode_f64, coerce::to_f64);

//==================================================================================
// 2. Object Targets (null sentinel is `None`)
//==================================================================================

impl FromColumn for Option<String> {
    const TARGET: &'static str = "string";

    fn null_sentinel() -> Self {
        None
    }

    fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError> {
        if let Decoded::Native(text) = decoder::decode_text(column, row)? {
            return Ok(Some(text.to_owned()));
        }
        // Temporal and interval cells already arrive as the engine's text.
        if column.declared().require()?.is_textual() {
            return Ok(Some(decoder::textual_cell(column, row)?.to_owned()));
        }
        coerced(column, row, Self::TARGET, coerce::to_text).map(Some)
    }
}

impl FromColumn for Option<Blob> {
    const TARGET: &'static str = "blob";

    fn null_sentinel() -> Self {
        None
    }

    fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError> {
        match decoder::decode_blob(column, row)? {
            Decoded::Native(blob) => Ok(Some(blob)),
            Decoded::Foreign => coerced(column, row, Self::TARGET, coerce::to_blob).map(Some),
        }
    }
}

impl FromColumn for Option<Value> {
    const TARGET: &'static str = "object";

    fn null_sentinel() -> Self {
        None
    }

    fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError> {
        decoder::decode_value(column, row)
    }
}

macro_rules! impl_from_column_temporal {
    ($T:ty, $label:literal, $coerce:path) => {
        /// Lenient: text that does not parse yields `None`.
        impl FromColumn for Option<$T> {
            const TARGET: &'static str = $label;

            fn null_sentinel() -> Self {
                None
            }

            fn from_cell(column: &ColumnVector, row: usize) -> Result<Self, RowStreamError> {
                Ok(natural(column, row, Self::TARGET)?
                    .as_ref()
                    .and_then($coerce))
            }
        }
    };
}

impl_from_column_temporal!(NaiveDate, "date", coerce::to_date);
impl_from_column_temporal!(NaiveTime, "time", coerce::to_time);
impl_from_column_temporal!(NaiveDateTime, "timestamp", coerce::to_timestamp);
