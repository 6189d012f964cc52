// In: src/bridge/arrow_impl.rs

//! Concrete conversion from Arrow arrays into the engine's chunk layout.
//!
//! Arrow stores the same information the engine does, just shaped differently:
//! - primitive values are copied out as contiguous little-endian bytes;
//! - booleans are widened from bits to one byte per row;
//! - decimals are scaled into doubles;
//! - dates, times, timestamps and intervals become their text rendering;
//! - strings and binaries are boxed per row.
//!
//! Any Arrow type with no engine counterpart becomes an opaque column so that
//! the rest of the row stays readable.

use std::sync::Arc;

use arrow::array::{Array, AsArray, PrimitiveArray};
use arrow::datatypes::DataType as ArrowDataType;
use arrow::datatypes::*;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use crate::error::RowStreamError;
use crate::null_handling::NullIndicator;
use crate::types::EngineType;
use crate::vector::{Chunk, ColumnData, ColumnVector, VarValue};

/// Converts every column of a record batch.
pub(crate) fn record_batch_to_chunk(batch: &RecordBatch) -> Result<Chunk, RowStreamError> {
    let columns = batch
        .columns()
        .iter()
        .map(|array| array_to_column(array.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Chunk::new(columns)
}

/// Converts one Arrow array into a `ColumnVector`.
pub(crate) fn array_to_column(array: &dyn Array) -> Result<ColumnVector, RowStreamError> {
    let nulls = NullIndicator::from_arrow(array);
    let engine_type = match EngineType::from_arrow_type(array.data_type()) {
        Ok(ty) => ty,
        Err(_) => {
            log::debug!(
                "Arrow type {} has no engine counterpart; column is opaque.",
                array.data_type()
            );
            return Ok(ColumnVector::opaque(array.data_type().to_string(), nulls));
        }
    };

    let data = match array.data_type() {
        ArrowDataType::Boolean => {
            let bytes = array.as_boolean().values().iter().map(u8::from).collect();
            ColumnData::Fixed { width: 1, bytes }
        }
        ArrowDataType::Int8 => primitive_bytes::<Int8Type>(array),
        ArrowDataType::Int16 => primitive_bytes::<Int16Type>(array),
        ArrowDataType::Int32 => primitive_bytes::<Int32Type>(array),
        ArrowDataType::Int64 => primitive_bytes::<Int64Type>(array),
        ArrowDataType::UInt8 => primitive_bytes::<UInt8Type>(array),
        ArrowDataType::UInt16 => primitive_bytes::<UInt16Type>(array),
        ArrowDataType::UInt32 => primitive_bytes::<UInt32Type>(array),
        ArrowDataType::UInt64 => primitive_bytes::<UInt64Type>(array),
        ArrowDataType::Float32 => primitive_bytes::<Float32Type>(array),
        ArrowDataType::Float64 => primitive_bytes::<Float64Type>(array),
        ArrowDataType::Decimal128(_, scale) => decimal_to_double(array, *scale),

        ArrowDataType::Utf8 => boxed_rows(&nulls, array.len(), |row| {
            VarValue::Text(array.as_string::<i32>().value(row).into())
        }),
        ArrowDataType::LargeUtf8 => boxed_rows(&nulls, array.len(), |row| {
            VarValue::Text(array.as_string::<i64>().value(row).into())
        }),
        ArrowDataType::Binary => boxed_rows(&nulls, array.len(), |row| {
            VarValue::Bytes(Arc::from(array.as_binary::<i32>().value(row)))
        }),
        ArrowDataType::LargeBinary => boxed_rows(&nulls, array.len(), |row| {
            VarValue::Bytes(Arc::from(array.as_binary::<i64>().value(row)))
        }),

        ArrowDataType::Date32 => render_temporal::<Date32Type>(array, &nulls, |a, i| {
            a.value_as_date(i).map(|d| d.to_string())
        })?,
        ArrowDataType::Date64 => render_temporal::<Date64Type>(array, &nulls, |a, i| {
            a.value_as_date(i).map(|d| d.to_string())
        })?,
        ArrowDataType::Time32(TimeUnit::Second) => {
            render_temporal::<Time32SecondType>(array, &nulls, |a, i| {
                a.value_as_time(i).map(|t| t.to_string())
            })?
        }
        ArrowDataType::Time32(_) => {
            render_temporal::<Time32MillisecondType>(array, &nulls, |a, i| {
                a.value_as_time(i).map(|t| t.to_string())
            })?
        }
        ArrowDataType::Time64(TimeUnit::Nanosecond) => {
            render_temporal::<Time64NanosecondType>(array, &nulls, |a, i| {
                a.value_as_time(i).map(|t| t.to_string())
            })?
        }
        ArrowDataType::Time64(_) => {
            render_temporal::<Time64MicrosecondType>(array, &nulls, |a, i| {
                a.value_as_time(i).map(|t| t.to_string())
            })?
        }
        // Timezone-aware timestamps are rendered in UTC.
        ArrowDataType::Timestamp(TimeUnit::Second, _) => {
            render_temporal::<TimestampSecondType>(array, &nulls, |a, i| {
                a.value_as_datetime(i).map(|ts| ts.to_string())
            })?
        }
        ArrowDataType::Timestamp(TimeUnit::Millisecond, _) => {
            render_temporal::<TimestampMillisecondType>(array, &nulls, |a, i| {
                a.value_as_datetime(i).map(|ts| ts.to_string())
            })?
        }
        ArrowDataType::Timestamp(TimeUnit::Microsecond, _) => {
            render_temporal::<TimestampMicrosecondType>(array, &nulls, |a, i| {
                a.value_as_datetime(i).map(|ts| ts.to_string())
            })?
        }
        ArrowDataType::Timestamp(TimeUnit::Nanosecond, _) => {
            render_temporal::<TimestampNanosecondType>(array, &nulls, |a, i| {
                a.value_as_datetime(i).map(|ts| ts.to_string())
            })?
        }
        ArrowDataType::Interval(_) => {
            let formatter = ArrayFormatter::try_new(array, &FormatOptions::default())?;
            boxed_rows(&nulls, array.len(), |row| {
                VarValue::Text(formatter.value(row).to_string().into())
            })
        }
        dt => {
            return Err(RowStreamError::UnsupportedType(format!(
                "Arrow type {} maps to {} but has no conversion",
                dt, engine_type
            )))
        }
    };

    ColumnVector::new(engine_type.into(), nulls, data)
}

//==================================================================================
// Helpers
//==================================================================================

fn primitive_bytes<T>(array: &dyn Array) -> ColumnData
where
    T: ArrowPrimitiveType,
    T::Native: bytemuck::Pod,
{
    let values: &[T::Native] = array.as_primitive::<T>().values();
    ColumnData::Fixed {
        width: std::mem::size_of::<T::Native>(),
        bytes: bytemuck::cast_slice(values).to_vec(),
    }
}

fn decimal_to_double(array: &dyn Array, scale: i8) -> ColumnData {
    let divisor = 10f64.powi(i32::from(scale));
    let doubles: Vec<f64> = array
        .as_primitive::<Decimal128Type>()
        .values()
        .iter()
        .map(|v| *v as f64 / divisor)
        .collect();
    ColumnData::Fixed {
        width: 8,
        bytes: bytemuck::cast_slice(&doubles).to_vec(),
    }
}

/// One boxed value per non-null row.
fn boxed_rows(
    nulls: &NullIndicator,
    len: usize,
    value: impl Fn(usize) -> VarValue,
) -> ColumnData {
    ColumnData::Variable(
        (0..len)
            .map(|row| (!nulls.is_null(row)).then(|| value(row)))
            .collect(),
    )
}

/// Renders a temporal array to text, one row at a time. A valid row whose
/// value chrono cannot represent is a malformed chunk.
fn render_temporal<T>(
    array: &dyn Array,
    nulls: &NullIndicator,
    render: fn(&PrimitiveArray<T>, usize) -> Option<String>,
) -> Result<ColumnData, RowStreamError>
where
    T: ArrowPrimitiveType,
{
    let typed = array.as_primitive::<T>();
    let values = (0..typed.len())
        .map(|row| {
            if nulls.is_null(row) {
                return Ok(None);
            }
            render(typed, row)
                .map(|text| Some(VarValue::Text(text.into())))
                .ok_or_else(|| {
                    RowStreamError::MalformedChunk(format!(
                        "{} value at row {} is out of range",
                        array.data_type(),
                        row
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ColumnData::Variable(values))
}
