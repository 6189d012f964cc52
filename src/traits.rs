//! This module defines shared traits used by the scalar decoder.

use crate::error::RowStreamError;
use crate::kernels::zero_extend_le;

/// Maps an unsigned integer type to the next-wider signed type that can hold
/// every one of its values, and performs that promotion from raw bytes.
pub trait UnsignedPromotion {
    /// The signed type twice as wide as `Self`.
    type Promoted;

    /// Width in bytes of the unsigned source.
    const SOURCE_WIDTH: usize;

    /// Zero-extends `src` (exactly `SOURCE_WIDTH` little-endian bytes) and
    /// reinterprets it as `Promoted`.
    fn promote_le(src: &[u8]) -> Result<Self::Promoted, RowStreamError>;
}

// Implement the promotion for every unsigned width the engine produces.
macro_rules! impl_unsigned_promotion {
    ($U:ty, $S:ty) => {
        impl UnsignedPromotion for $U {
            type Promoted = $S;
            const SOURCE_WIDTH: usize = std::mem::size_of::<$U>();

            fn promote_le(src: &[u8]) -> Result<$S, RowStreamError> {
                if src.len() != Self::SOURCE_WIDTH {
                    return Err(RowStreamError::MalformedChunk(format!(
                        "expected {} bytes for {}, got {}",
                        Self::SOURCE_WIDTH,
                        stringify!($U),
                        src.len()
                    )));
                }
                Ok(<$S>::from_le_bytes(zero_extend_le(src)?))
            }
        }
    };
}

impl_unsigned_promotion!(u8, i16);
impl_unsigned_promotion!(u16, i32);
impl_unsigned_promotion!(u32, i64);
impl_unsigned_promotion!(u64, i128);
