// In: src/coerce.rs

//! Cross-type fallback conversions.
//!
//! When a typed accessor does not match a column's declared type, the cell is
//! first decoded to its natural `Value` and then converted here:
//!
//! - numeric targets narrow or widen numeric values with `as` semantics
//!   (two's-complement truncation for integers, saturation for floats);
//! - every other source is rendered to text and parsed;
//! - temporal targets parse leniently and report failure as `None`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_traits::AsPrimitive;

use crate::error::RowStreamError;
use crate::types::{Blob, Value};

//==================================================================================
// 1. Temporal Text Parsing (lenient)
//==================================================================================

pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `%.f` also accepts a missing fraction.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, TIME_FORMAT).ok()
}

pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

//==================================================================================
// 2. Numeric Targets
//==================================================================================

macro_rules! numeric_target {
    ($name:ident, $T:ty, $label:literal) => {
        #[doc = concat!("Converts a boxed value to `", stringify!($T), "`.")]
        pub fn $name(value: &Value) -> Result<$T, RowStreamError> {
            match value {
                Value::TinyInt(v) => Ok(v.as_()),
                Value::SmallInt(v) => Ok(v.as_()),
                Value::Integer(v) => Ok(v.as_()),
                Value::BigInt(v) => Ok(v.as_()),
                Value::HugeInt(v) => Ok(v.as_()),
                Value::Float(v) => Ok(v.as_()),
                Value::Double(v) => Ok(v.as_()),
                Value::Blob(_) => Err(RowStreamError::conversion(value, $label)),
                other => {
                    let text = other.to_string();
                    text.parse::<$T>()
                        .map_err(|_| RowStreamError::conversion(text, $label))
                }
            }
        }
    };
}

numeric_target!(to_i8, i8, "i8");
numeric_target!(to_i16, i16, "i16");
numeric_target!(to_i32, i32, "i32");
numeric_target!(to_i64, i64, "i64");
numeric_target!(to_i128, i128, "i128");
numeric_target!(to_f32, f32, "f32");
numeric_target!(to_f64, f64, "f64");

//==================================================================================
// 3. Non-numeric Targets
//==================================================================================

/// Numbers are `true` only when their byte value is exactly 1 (floats truncate
/// through `i32` first); text must be `true` or `false` in any case.
pub fn to_bool(value: &Value) -> Result<bool, RowStreamError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Float(v) => Ok((*v as i32) as i8 == 1),
        Value::Double(v) => Ok((*v as i32) as i8 == 1),
        v if v.is_numeric() => Ok(to_i8(v)? == 1),
        Value::Blob(_) => Err(RowStreamError::conversion(value, "bool")),
        other => {
            let text = other.to_string();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(RowStreamError::conversion(text, "bool"))
            }
        }
    }
}

pub fn to_text(value: &Value) -> Result<String, RowStreamError> {
    match value {
        Value::Blob(_) => Err(RowStreamError::conversion(value, "string")),
        other => Ok(other.to_string()),
    }
}

pub fn to_blob(value: &Value) -> Result<Blob, RowStreamError> {
    match value {
        Value::Blob(blob) => Ok(blob.clone()),
        other => Err(RowStreamError::conversion(other, "blob")),
    }
}

pub fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Blob(_) => None,
        other => parse_date(&other.to_string()),
    }
}

pub fn to_time(value: &Value) -> Option<NaiveTime> {
    match value {
        Value::Time(t) => Some(*t),
        Value::Blob(_) => None,
        other => parse_time(&other.to_string()),
    }
}

pub fn to_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Blob(_) => None,
        other => parse_timestamp(&other.to_string()),
    }
}
