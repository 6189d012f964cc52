//! This module contains the pure, stateless kernels for fixed-width extraction
//! and width promotion.
//!
//! Every fixed-width read in the crate goes through `read_le_array`, and every
//! unsigned promotion goes through `zero_extend_le`, so the little-endian
//! contract of the chunk layout lives in exactly one place. This module is
//! PURE RUST and panic-free.

use crate::error::RowStreamError;

//==================================================================================
// 1. Public Kernels
//==================================================================================

/// Reads the `N` bytes belonging to `row` from a fixed-width buffer whose
/// element width is `N`.
pub fn read_le_array<const N: usize>(bytes: &[u8], row: usize) -> Result<[u8; N], RowStreamError> {
    let start = row
        .checked_mul(N)
        .ok_or_else(|| RowStreamError::MalformedChunk(format!("row offset {row} overflows")))?;
    let slice = start.checked_add(N).and_then(|end| bytes.get(start..end)).ok_or_else(|| {
        RowStreamError::MalformedChunk(format!(
            "fixed-width read of {} bytes at row {} exceeds buffer of {} bytes",
            N,
            row,
            bytes.len()
        ))
    })?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

/// Zero-extends a little-endian byte sequence into an `M`-byte array.
///
/// The source bytes become the low-order half of the output and the remaining
/// high-order bytes are zero, so reading the result as a signed `M`-byte
/// integer yields the source's unsigned magnitude.
pub fn zero_extend_le<const M: usize>(src: &[u8]) -> Result<[u8; M], RowStreamError> {
    if src.len() > M {
        return Err(RowStreamError::MalformedChunk(format!(
            "cannot zero-extend {} bytes into {} bytes",
            src.len(),
            M
        )));
    }
    let mut out = [0u8; M];
    out[..src.len()].copy_from_slice(src);
    Ok(out)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_le_array_picks_the_row_slot() {
        let bytes: Vec<u8> = [1i32, -2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let raw = read_le_array::<4>(&bytes, 1).unwrap();
        assert_eq!(i32::from_le_bytes(raw), -2);
    }

    #[test]
    fn test_read_le_array_out_of_buffer_is_malformed() {
        let bytes = vec![0u8; 8];
        let result = read_le_array::<4>(&bytes, 2);
        assert!(matches!(result, Err(RowStreamError::MalformedChunk(_))));
    }

    #[test]
    fn test_zero_extend_places_source_in_low_bytes() {
        let out: [u8; 4] = zero_extend_le(&[0xAB, 0xCD]).unwrap();
        assert_eq!(out, [0xAB, 0xCD, 0x00, 0x00]);
        assert_eq!(i32::from_le_bytes(out), 0xCDAB);
    }

    #[test]
    fn test_zero_extend_never_sign_extends() {
        let out: [u8; 2] = zero_extend_le(&[0xFF]).unwrap();
        assert_eq!(i16::from_le_bytes(out), 255);

        let out: [u8; 16] = zero_extend_le(&u64::MAX.to_le_bytes()).unwrap();
        assert_eq!(i128::from_le_bytes(out), u64::MAX as i128);
    }

    #[test]
    fn test_zero_extend_rejects_narrowing() {
        let result = zero_extend_le::<2>(&[1, 2, 3]);
        assert!(result.is_err());
    }
}
