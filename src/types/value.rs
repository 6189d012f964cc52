//! The natural, boxed representation of a single decoded cell.
//!
//! `Value` is what the object-style accessor returns and what the coercer
//! converts from when a typed accessor does not match the column's type.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::types::blob::Blob;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    TinyInt(i8),
    /// SMALLINT, or UTINYINT promoted.
    SmallInt(i16),
    /// INTEGER, or USMALLINT promoted.
    Integer(i32),
    /// BIGINT, or UINTEGER promoted.
    BigInt(i64),
    /// HUGEINT, or UBIGINT promoted.
    HugeInt(i128),
    Float(f32),
    /// DOUBLE and DECIMAL.
    Double(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Intervals are only ever exposed as the engine's text rendering.
    Interval(String),
    Blob(Blob),
}

impl Value {
    /// Returns `true` for the variants that carry a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::TinyInt(_)
                | Value::SmallInt(_)
                | Value::Integer(_)
                | Value::BigInt(_)
                | Value::HugeInt(_)
                | Value::Float(_)
                | Value::Double(_)
        )
    }

    /// A short name for log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::TinyInt(_) => "tinyint",
            Value::SmallInt(_) => "smallint",
            Value::Integer(_) => "integer",
            Value::BigInt(_) => "bigint",
            Value::HugeInt(_) => "hugeint",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::Interval(_) => "interval",
            Value::Blob(_) => "blob",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::HugeInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) | Value::Interval(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Blob(b) => write!(f, "<blob: {} bytes>", b.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_engine_text() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-02-29");
        let ts = date.and_hms_opt(13, 5, 9).unwrap();
        assert_eq!(Value::Timestamp(ts).to_string(), "2024-02-29 13:05:09");
        assert_eq!(Value::HugeInt(-5).to_string(), "-5");
        assert_eq!(Value::Interval("1 month".into()).to_string(), "1 month");
    }

    #[test]
    fn test_numeric_classification() {
        assert!(Value::Double(1.0).is_numeric());
        assert!(!Value::Boolean(true).is_numeric());
        assert!(!Value::Text("1".into()).is_numeric());
        assert_eq!(Value::SmallInt(1).kind(), "smallint");
    }
}
