//! The object-style decode: every recognised type to its natural `Value`.

use crate::coerce::{parse_date, parse_time, parse_timestamp};
use crate::decoder::{fixed, variable, Decoded};
use crate::error::RowStreamError;
use crate::types::{EngineType, Value};
use crate::vector::ColumnVector;

/// Decodes the cell at `row` into its natural representation.
///
/// Returns `Ok(None)` only for temporal text that does not parse; the null
/// indicator is the caller's concern.
pub fn decode_value(column: &ColumnVector, row: usize) -> Result<Option<Value>, RowStreamError> {
    let engine_type = column.declared().require()?;
    let value = match engine_type {
        EngineType::Boolean => Value::Boolean(native(fixed::decode_bool(column, row)?, column)?),
        EngineType::TinyInt => Value::TinyInt(native(fixed::decode_i8(column, row)?, column)?),
        EngineType::SmallInt | EngineType::UTinyInt => {
            Value::SmallInt(native(fixed::decode_i16(column, row)?, column)?)
        }
        EngineType::Integer | EngineType::USmallInt => {
            Value::Integer(native(fixed::decode_i32(column, row)?, column)?)
        }
        EngineType::BigInt | EngineType::UInteger => {
            Value::BigInt(native(fixed::decode_i64(column, row)?, column)?)
        }
        EngineType::HugeInt | EngineType::UBigInt => {
            Value::HugeInt(native(fixed::decode_i128(column, row)?, column)?)
        }
        EngineType::Float => Value::Float(native(fixed::decode_f32(column, row)?, column)?),
        EngineType::Double | EngineType::Decimal { .. } => {
            Value::Double(native(fixed::decode_f64(column, row)?, column)?)
        }
        EngineType::Varchar => Value::Text(variable::textual_cell(column, row)?.to_owned()),
        EngineType::Interval => Value::Interval(variable::textual_cell(column, row)?.to_owned()),
        EngineType::Date => match parse_date(variable::textual_cell(column, row)?) {
            Some(date) => Value::Date(date),
            None => return Ok(None),
        },
        EngineType::Time => match parse_time(variable::textual_cell(column, row)?) {
            Some(time) => Value::Time(time),
            None => return Ok(None),
        },
        EngineType::Timestamp => match parse_timestamp(variable::textual_cell(column, row)?) {
            Some(ts) => Value::Timestamp(ts),
            None => return Ok(None),
        },
        EngineType::Blob => Value::Blob(native(variable::decode_blob(column, row)?, column)?),
    };
    Ok(Some(value))
}

fn native<T>(decoded: Decoded<T>, column: &ColumnVector) -> Result<T, RowStreamError> {
    match decoded {
        Decoded::Native(v) => Ok(v),
        Decoded::Foreign => Err(RowStreamError::UnsupportedType(
            column.declared().name().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_unsigned_types_box_into_the_wider_signed_variant() {
        let col = ColumnVector::from_values::<u8>(EngineType::UTinyInt, &[Some(200)]).unwrap();
        assert_eq!(decode_value(&col, 0).unwrap(), Some(Value::SmallInt(200)));

        let col = ColumnVector::from_values::<u16>(EngineType::USmallInt, &[Some(60_000)]).unwrap();
        assert_eq!(decode_value(&col, 0).unwrap(), Some(Value::Integer(60_000)));

        let col = ColumnVector::from_values::<u32>(EngineType::UInteger, &[Some(u32::MAX)]).unwrap();
        assert_eq!(decode_value(&col, 0).unwrap(), Some(Value::BigInt(u32::MAX as i64)));

        let col = ColumnVector::from_values::<u64>(EngineType::UBigInt, &[Some(u64::MAX)]).unwrap();
        assert_eq!(decode_value(&col, 0).unwrap(), Some(Value::HugeInt(u64::MAX as i128)));
    }

    #[test]
    fn test_decimal_boxes_as_double() {
        let col = ColumnVector::from_values::<f64>(
            EngineType::Decimal { width: 10, scale: 2 },
            &[Some(3.25)],
        )
        .unwrap();
        assert_eq!(decode_value(&col, 0).unwrap(), Some(Value::Double(3.25)));
    }

    #[test]
    fn test_temporal_text_is_parsed() {
        let col = ColumnVector::from_text(EngineType::Date, &[Some("2024-01-31"), Some("garbage")])
            .unwrap();
        assert_eq!(
            decode_value(&col, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).map(Value::Date)
        );
        assert_eq!(decode_value(&col, 1).unwrap(), None);

        let col = ColumnVector::from_text(EngineType::Time, &[Some("08:30:00")]).unwrap();
        assert_eq!(
            decode_value(&col, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).map(Value::Time)
        );
    }

    #[test]
    fn test_interval_stays_text() {
        let col = ColumnVector::from_text(EngineType::Interval, &[Some("1 day 02:00:00")]).unwrap();
        assert_eq!(
            decode_value(&col, 0).unwrap(),
            Some(Value::Interval("1 day 02:00:00".into()))
        );
    }

    #[test]
    fn test_unrecognised_type() {
        let col = ColumnVector::opaque("MAP(INT, INT)", crate::null_handling::NullIndicator::all_valid(1));
        assert!(matches!(
            decode_value(&col, 0),
            Err(RowStreamError::UnsupportedType(name)) if name == "MAP(INT, INT)"
        ));
    }
}
