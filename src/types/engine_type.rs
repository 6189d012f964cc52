//! This module defines the canonical, type-safe representation of the engine's
//! column types.

use crate::error::RowStreamError;
use arrow_schema::{DataType as ArrowDataType, IntervalUnit, TimeUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a column of a given type is laid out inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A contiguous little-endian buffer of `row_count * width` bytes.
    Fixed(usize),
    /// One boxed value per row (text or bytes).
    Variable,
}

/// The closed set of column types the engine produces.
///
/// This enum replaces string comparisons on type names; every dispatch on a
/// column's type is a single exhaustive `match` over it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    HugeInt,
    Float,
    Double,
    /// Delivered by the engine already cast to an 8-byte double.
    Decimal { width: u8, scale: u8 },
    Varchar,
    /// Delivered as text (`YYYY-MM-DD`).
    Date,
    /// Delivered as text (`HH:MM:SS[.ffffff]`).
    Time,
    /// Delivered as text (`YYYY-MM-DD HH:MM:SS[.ffffff]`).
    Timestamp,
    /// Delivered as text, exposed as text only.
    Interval,
    Blob,
}

impl EngineType {
    /// Parses the engine's type name, e.g. `"INTEGER"` or `"DECIMAL(18,3)"`.
    pub fn from_type_name(name: &str) -> Result<Self, RowStreamError> {
        let ty = match name {
            "BOOLEAN" => Self::Boolean,
            "TINYINT" => Self::TinyInt,
            "SMALLINT" => Self::SmallInt,
            "INTEGER" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "UTINYINT" => Self::UTinyInt,
            "USMALLINT" => Self::USmallInt,
            "UINTEGER" => Self::UInteger,
            "UBIGINT" => Self::UBigInt,
            "HUGEINT" => Self::HugeInt,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "VARCHAR" => Self::Varchar,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "INTERVAL" => Self::Interval,
            "BLOB" => Self::Blob,
            other if other.starts_with("DECIMAL") => parse_decimal(other)?,
            other => return Err(RowStreamError::UnsupportedType(other.to_string())),
        };
        Ok(ty)
    }

    /// Returns the in-chunk layout of this type.
    pub fn layout(&self) -> Layout {
        match self {
            Self::Boolean | Self::TinyInt | Self::UTinyInt => Layout::Fixed(1),
            Self::SmallInt | Self::USmallInt => Layout::Fixed(2),
            Self::Integer | Self::UInteger | Self::Float => Layout::Fixed(4),
            Self::BigInt | Self::UBigInt | Self::Double | Self::Decimal { .. } => Layout::Fixed(8),
            Self::HugeInt => Layout::Fixed(16),
            Self::Varchar
            | Self::Date
            | Self::Time
            | Self::Timestamp
            | Self::Interval
            | Self::Blob => Layout::Variable,
        }
    }

    /// Returns `true` for types whose cells are text in the chunk.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Varchar | Self::Date | Self::Time | Self::Timestamp | Self::Interval
        )
    }

    /// Converts an Arrow `DataType` into an `EngineType`.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, RowStreamError> {
        match arrow_type {
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Int8 => Ok(Self::TinyInt),
            ArrowDataType::Int16 => Ok(Self::SmallInt),
            ArrowDataType::Int32 => Ok(Self::Integer),
            ArrowDataType::Int64 => Ok(Self::BigInt),
            ArrowDataType::UInt8 => Ok(Self::UTinyInt),
            ArrowDataType::UInt16 => Ok(Self::USmallInt),
            ArrowDataType::UInt32 => Ok(Self::UInteger),
            ArrowDataType::UInt64 => Ok(Self::UBigInt),
            ArrowDataType::Float32 => Ok(Self::Float),
            ArrowDataType::Float64 => Ok(Self::Double),
            ArrowDataType::Decimal128(width, scale) if *scale >= 0 => Ok(Self::Decimal {
                width: *width,
                scale: *scale as u8,
            }),
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => Ok(Self::Varchar),
            ArrowDataType::Binary | ArrowDataType::LargeBinary => Ok(Self::Blob),
            ArrowDataType::Date32 | ArrowDataType::Date64 => Ok(Self::Date),
            ArrowDataType::Time32(_) | ArrowDataType::Time64(_) => Ok(Self::Time),
            ArrowDataType::Timestamp(_, _) => Ok(Self::Timestamp),
            ArrowDataType::Interval(_) => Ok(Self::Interval),
            dt => Err(RowStreamError::UnsupportedType(format!(
                "Cannot convert Arrow type {} to EngineType",
                dt
            ))),
        }
    }

    /// Converts an `EngineType` back into the closest Arrow `DataType`.
    pub fn to_arrow_type(&self) -> ArrowDataType {
        match self {
            Self::Boolean => ArrowDataType::Boolean,
            Self::TinyInt => ArrowDataType::Int8,
            Self::SmallInt => ArrowDataType::Int16,
            Self::Integer => ArrowDataType::Int32,
            Self::BigInt => ArrowDataType::Int64,
            Self::UTinyInt => ArrowDataType::UInt8,
            Self::USmallInt => ArrowDataType::UInt16,
            Self::UInteger => ArrowDataType::UInt32,
            Self::UBigInt => ArrowDataType::UInt64,
            // Arrow has no 128-bit integer; a scale-0 decimal holds the full range.
            Self::HugeInt => ArrowDataType::Decimal128(38, 0),
            Self::Float => ArrowDataType::Float32,
            Self::Double => ArrowDataType::Float64,
            Self::Decimal { width, scale } => ArrowDataType::Decimal128(*width, *scale as i8),
            Self::Varchar => ArrowDataType::Utf8,
            Self::Date => ArrowDataType::Date32,
            Self::Time => ArrowDataType::Time64(TimeUnit::Microsecond),
            Self::Timestamp => ArrowDataType::Timestamp(TimeUnit::Microsecond, None),
            Self::Interval => ArrowDataType::Interval(IntervalUnit::MonthDayNano),
            Self::Blob => ArrowDataType::Binary,
        }
    }
}

fn parse_decimal(name: &str) -> Result<EngineType, RowStreamError> {
    let unsupported = || RowStreamError::UnsupportedType(name.to_string());
    let Some(args) = name.strip_prefix("DECIMAL") else {
        return Err(unsupported());
    };
    if args.is_empty() {
        // Engine default precision.
        return Ok(EngineType::Decimal { width: 18, scale: 3 });
    }
    let inner = args
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(unsupported)?;
    let (width, scale) = inner.split_once(',').ok_or_else(unsupported)?;
    let width: u8 = width.trim().parse().map_err(|_| unsupported())?;
    let scale: u8 = scale.trim().parse().map_err(|_| unsupported())?;
    Ok(EngineType::Decimal { width, scale })
}

/// Provides the engine's canonical type name.
impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::UTinyInt => "UTINYINT",
            Self::USmallInt => "USMALLINT",
            Self::UInteger => "UINTEGER",
            Self::UBigInt => "UBIGINT",
            Self::HugeInt => "HUGEINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Decimal { width, scale } => return write!(f, "DECIMAL({},{})", width, scale),
            Self::Varchar => "VARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::Blob => "BLOB",
        };
        f.write_str(name)
    }
}

//==================================================================================
// Declared Type
//==================================================================================

/// A column's type exactly as the engine reported it, plus the recognised
/// `EngineType` when there is one.
///
/// A result can be opened over columns of a type this crate does not know; only
/// reading such a column fails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    name: String,
    engine_type: Option<EngineType>,
}

impl DeclaredType {
    /// Classifies an engine type name. Never fails.
    pub fn parse(name: &str) -> Self {
        Self {
            name: name.to_string(),
            engine_type: EngineType::from_type_name(name).ok(),
        }
    }

    /// A type name the crate does not recognise, e.g. one derived from an
    /// unmappable Arrow type.
    pub fn unrecognised(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine_type: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine_type(&self) -> Option<EngineType> {
        self.engine_type
    }

    /// Returns the recognised type or `UnsupportedType` naming the raw type string.
    pub fn require(&self) -> Result<EngineType, RowStreamError> {
        self.engine_type
            .ok_or_else(|| RowStreamError::UnsupportedType(self.name.clone()))
    }
}

impl From<EngineType> for DeclaredType {
    fn from(ty: EngineType) -> Self {
        Self {
            name: ty.to_string(),
            engine_type: Some(ty),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip_through_display() {
        let all = [
            EngineType::Boolean,
            EngineType::TinyInt,
            EngineType::SmallInt,
            EngineType::Integer,
            EngineType::BigInt,
            EngineType::UTinyInt,
            EngineType::USmallInt,
            EngineType::UInteger,
            EngineType::UBigInt,
            EngineType::HugeInt,
            EngineType::Float,
            EngineType::Double,
            EngineType::Decimal { width: 10, scale: 2 },
            EngineType::Varchar,
            EngineType::Date,
            EngineType::Time,
            EngineType::Timestamp,
            EngineType::Interval,
            EngineType::Blob,
        ];
        for ty in all {
            assert_eq!(EngineType::from_type_name(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_decimal_names() {
        assert_eq!(
            EngineType::from_type_name("DECIMAL(18,3)").unwrap(),
            EngineType::Decimal { width: 18, scale: 3 }
        );
        assert_eq!(
            EngineType::from_type_name("DECIMAL( 4, 1 )").unwrap(),
            EngineType::Decimal { width: 4, scale: 1 }
        );
        assert!(EngineType::from_type_name("DECIMAL(abc)").is_err());
        assert_eq!(
            EngineType::from_type_name("DECIMAL").unwrap().layout(),
            Layout::Fixed(8)
        );
    }

    #[test]
    fn test_unknown_name_is_unsupported() {
        let err = EngineType::from_type_name("LIST").unwrap_err();
        assert!(matches!(err, RowStreamError::UnsupportedType(name) if name == "LIST"));
    }

    #[test]
    fn test_layouts() {
        assert_eq!(EngineType::UTinyInt.layout(), Layout::Fixed(1));
        assert_eq!(EngineType::USmallInt.layout(), Layout::Fixed(2));
        assert_eq!(EngineType::UInteger.layout(), Layout::Fixed(4));
        assert_eq!(EngineType::UBigInt.layout(), Layout::Fixed(8));
        assert_eq!(EngineType::HugeInt.layout(), Layout::Fixed(16));
        assert_eq!(EngineType::Timestamp.layout(), Layout::Variable);
        assert_eq!(EngineType::Blob.layout(), Layout::Variable);
        assert!(EngineType::Interval.is_textual());
        assert!(!EngineType::Blob.is_textual());
    }

    #[test]
    fn test_arrow_mapping() {
        assert_eq!(
            EngineType::from_arrow_type(&ArrowDataType::UInt16).unwrap(),
            EngineType::USmallInt
        );
        assert_eq!(
            EngineType::from_arrow_type(&ArrowDataType::Timestamp(TimeUnit::Nanosecond, None))
                .unwrap(),
            EngineType::Timestamp
        );
        assert!(EngineType::from_arrow_type(&ArrowDataType::Null).is_err());
        assert_eq!(EngineType::Varchar.to_arrow_type(), ArrowDataType::Utf8);
    }

    #[test]
    fn test_declared_type_defers_the_failure() {
        let declared = DeclaredType::parse("MAP(VARCHAR, INTEGER)");
        assert_eq!(declared.engine_type(), None);
        assert_eq!(declared.name(), "MAP(VARCHAR, INTEGER)");
        let err = declared.require().unwrap_err();
        assert!(err.to_string().contains("MAP(VARCHAR, INTEGER)"));

        let declared = DeclaredType::from(EngineType::BigInt);
        assert_eq!(declared.require().unwrap(), EngineType::BigInt);
        assert_eq!(declared.name(), "BIGINT");
    }
}
