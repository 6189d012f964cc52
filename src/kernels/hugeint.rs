//! The 128-bit signed integer kernel.
//!
//! HUGEINT cells arrive as 16 little-endian bytes. The decode reverses them
//! (byte `i` swaps with byte `15 - i`) and reads the result as a big-endian
//! two's-complement integer.

/// Width in bytes of one HUGEINT cell.
pub const HUGEINT_WIDTH: usize = 16;

/// Reverses a little-endian 16-byte buffer into big-endian order.
pub fn reverse_to_big_endian(mut raw: [u8; HUGEINT_WIDTH]) -> [u8; HUGEINT_WIDTH] {
    for i in 0..HUGEINT_WIDTH / 2 {
        raw.swap(i, HUGEINT_WIDTH - 1 - i);
    }
    raw
}

/// Decodes one HUGEINT cell.
pub fn hugeint_from_le(raw: [u8; HUGEINT_WIDTH]) -> i128 {
    i128::from_be_bytes(reverse_to_big_endian(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_swaps_mirrored_bytes() {
        let raw: [u8; 16] = core::array::from_fn(|i| i as u8);
        let reversed = reverse_to_big_endian(raw);
        assert_eq!(reversed[0], 15);
        assert_eq!(reversed[15], 0);
        assert_eq!(reversed[7], 8);
    }

    #[test]
    fn test_max_hugeint_reference_value() {
        let expected: i128 = 170141183460469231731687303715884105727;
        let raw = expected.to_le_bytes();
        assert_eq!(hugeint_from_le(raw), expected);
    }

    #[test]
    fn test_negative_values_keep_their_sign() {
        for v in [-1i128, i128::MIN, -170141183460469231731687303715884105727] {
            assert_eq!(hugeint_from_le(v.to_le_bytes()), v);
        }
    }
}
