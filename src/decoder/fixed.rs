//! Fast-path decoders for fixed-width columns.
//!
//! Each decoder reads its accessor's native width directly from the column's
//! little-endian buffer when the declared type matches, promotes the unsigned
//! type one size below it, and otherwise returns `Decoded::Foreign`.

use crate::decoder::Decoded;
use crate::error::RowStreamError;
use crate::kernels::{hugeint_from_le, read_le_array, HUGEINT_WIDTH};
use crate::traits::UnsignedPromotion;
use crate::types::EngineType;
use crate::vector::ColumnVector;

/// Reads the `N` raw bytes of `row`.
fn raw<const N: usize>(column: &ColumnVector, row: usize) -> Result<[u8; N], RowStreamError> {
    let bytes = column.fixed_bytes().ok_or_else(|| {
        RowStreamError::MalformedChunk(format!(
            "{} column has no fixed-width buffer",
            column.declared()
        ))
    })?;
    read_le_array::<N>(bytes, row)
}

pub fn decode_bool(column: &ColumnVector, row: usize) -> Result<Decoded<bool>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::Boolean => Decoded::Native(raw::<1>(column, row)?[0] == 1),
        _ => Decoded::Foreign,
    })
}

pub fn decode_i8(column: &ColumnVector, row: usize) -> Result<Decoded<i8>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::TinyInt => Decoded::Native(i8::from_le_bytes(raw::<1>(column, row)?)),
        _ => Decoded::Foreign,
    })
}

pub fn decode_i16(column: &ColumnVector, row: usize) -> Result<Decoded<i16>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::SmallInt => Decoded::Native(i16::from_le_bytes(raw::<2>(column, row)?)),
        EngineType::UTinyInt => Decoded::Native(u8::promote_le(&raw::<1>(column, row)?)?),
        _ => Decoded::Foreign,
    })
}

pub fn decode_i32(column: &ColumnVector, row: usize) -> Result<Decoded<i32>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::Integer => Decoded::Native(i32::from_le_bytes(raw::<4>(column, row)?)),
        EngineType::USmallInt => Decoded::Native(u16::promote_le(&raw::<2>(column, row)?)?),
        _ => Decoded::Foreign,
    })
}

pub fn decode_i64(column: &ColumnVector, row: usize) -> Result<Decoded<i64>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::BigInt => Decoded::Native(i64::from_le_bytes(raw::<8>(column, row)?)),
        EngineType::UInteger => Decoded::Native(u32::promote_le(&raw::<4>(column, row)?)?),
        _ => Decoded::Foreign,
    })
}

pub fn decode_i128(column: &ColumnVector, row: usize) -> Result<Decoded<i128>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::HugeInt => {
            Decoded::Native(hugeint_from_le(raw::<HUGEINT_WIDTH>(column, row)?))
        }
        EngineType::UBigInt => Decoded::Native(u64::promote_le(&raw::<8>(column, row)?)?),
        _ => Decoded::Foreign,
    })
}

pub fn decode_f32(column: &ColumnVector, row: usize) -> Result<Decoded<f32>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::Float => Decoded::Native(f32::from_le_bytes(raw::<4>(column, row)?)),
        _ => Decoded::Foreign,
    })
}

pub fn decode_f64(column: &ColumnVector, row: usize) -> Result<Decoded<f64>, RowStreamError> {
    Ok(match column.declared().require()? {
        EngineType::Double | EngineType::Decimal { .. } => {
            Decoded::Native(f64::from_le_bytes(raw::<8>(column, row)?))
        }
        _ => Decoded::Foreign,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::null_handling::NullIndicator;
    use crate::vector::ColumnData;

    fn fixed_column(ty: EngineType, width: usize, bytes: Vec<u8>) -> ColumnVector {
        let rows = bytes.len() / width;
        ColumnVector::new(
            ty.into(),
            NullIndicator::all_valid(rows),
            ColumnData::Fixed { width, bytes },
        )
        .unwrap()
    }

    #[test]
    fn test_every_row_is_its_own_le_slot() {
        let values = [i64::MIN, -1, 0, 42, i64::MAX];
        let col = ColumnVector::from_values(
            EngineType::BigInt,
            &values.iter().copied().map(Some).collect::<Vec<_>>(),
        )
        .unwrap();
        let bytes = col.fixed_bytes().unwrap().to_vec();
        for (row, expected) in values.iter().enumerate() {
            let slot: [u8; 8] = bytes[row * 8..(row + 1) * 8].try_into().unwrap();
            assert_eq!(i64::from_le_bytes(slot), *expected);
            assert_eq!(decode_i64(&col, row).unwrap(), Decoded::Native(*expected));
        }
    }

    #[test]
    fn test_utinyint_promotes_to_positive_i16() {
        let col = fixed_column(EngineType::UTinyInt, 1, vec![0xFF, 0x80, 0x00]);
        assert_eq!(decode_i16(&col, 0).unwrap(), Decoded::Native(255));
        assert_eq!(decode_i16(&col, 1).unwrap(), Decoded::Native(128));
        assert_eq!(decode_i16(&col, 2).unwrap(), Decoded::Native(0));
    }

    #[test]
    fn test_usmallint_and_uinteger_promote() {
        let col = fixed_column(EngineType::USmallInt, 2, u16::MAX.to_le_bytes().to_vec());
        assert_eq!(decode_i32(&col, 0).unwrap(), Decoded::Native(65_535));

        let col = fixed_column(EngineType::UInteger, 4, 0x8000_0000u32.to_le_bytes().to_vec());
        assert_eq!(decode_i64(&col, 0).unwrap(), Decoded::Native(2_147_483_648));
    }

    #[test]
    fn test_ubigint_promotes_to_i128() {
        let col = fixed_column(EngineType::UBigInt, 8, u64::MAX.to_le_bytes().to_vec());
        assert_eq!(
            decode_i128(&col, 0).unwrap(),
            Decoded::Native(18_446_744_073_709_551_615)
        );
    }

    #[test]
    fn test_hugeint_reference_value() {
        let expected: i128 = 170141183460469231731687303715884105727;
        let mut bytes = expected.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(-2i128).to_le_bytes());
        let col = fixed_column(EngineType::HugeInt, 16, bytes);
        assert_eq!(decode_i128(&col, 0).unwrap(), Decoded::Native(expected));
        assert_eq!(decode_i128(&col, 1).unwrap(), Decoded::Native(-2));
    }

    #[test]
    fn test_boolean_is_byte_equal_to_one() {
        let col = fixed_column(EngineType::Boolean, 1, vec![1, 0, 2]);
        assert_eq!(decode_bool(&col, 0).unwrap(), Decoded::Native(true));
        assert_eq!(decode_bool(&col, 1).unwrap(), Decoded::Native(false));
        assert_eq!(decode_bool(&col, 2).unwrap(), Decoded::Native(false));
    }

    #[test]
    fn test_decimal_is_read_as_double() {
        let col = fixed_column(
            EngineType::Decimal { width: 18, scale: 3 },
            8,
            12.625f64.to_le_bytes().to_vec(),
        );
        assert_eq!(decode_f64(&col, 0).unwrap(), Decoded::Native(12.625));
    }

    #[test]
    fn test_mismatched_accessor_defers() {
        let col = fixed_column(EngineType::Integer, 4, 7i32.to_le_bytes().to_vec());
        assert_eq!(decode_i64(&col, 0).unwrap(), Decoded::Foreign);
        assert_eq!(decode_f32(&col, 0).unwrap(), Decoded::Foreign);
        assert_eq!(decode_bool(&col, 0).unwrap(), Decoded::Foreign);

        let text = ColumnVector::from_text(EngineType::Varchar, &[Some("42")]).unwrap();
        assert_eq!(decode_i32(&text, 0).unwrap(), Decoded::Foreign);
    }

    #[test]
    fn test_unrecognised_type_fails_by_name() {
        let col = ColumnVector::opaque("UNION(a INT)", NullIndicator::all_valid(1));
        let err = decode_i32(&col, 0).unwrap_err();
        assert!(matches!(err, RowStreamError::UnsupportedType(name) if name == "UNION(a INT)"));
    }
}
