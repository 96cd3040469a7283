use crate::grib::{GribError, Result};

/// Sign-and-magnitude interpretation of an unsigned field: the top bit is the sign,
/// the remaining bits are the magnitude.
pub(crate) trait GribInt<I> {
    fn as_grib_int(&self) -> I;
}

macro_rules! add_impl_for_ints {
    ($(($ty_src:ty, $ty_dst:ty),)*) => ($(
        impl GribInt<$ty_dst> for $ty_src {
            fn as_grib_int(&self) -> $ty_dst {
                if self.leading_zeros() == 0 {
                    let abs = (self << 1 >> 1) as $ty_dst;
                    -abs
                } else {
                    *self as $ty_dst
                }
            }
        }
    )*);
}

add_impl_for_ints! {
    (u8, i8),
    (u16, i16),
    (u32, i32),
    (u64, i64),
}

/// Sign-and-magnitude decoding for a value held in the low `width` bits of `raw`.
pub(crate) fn from_sign_magnitude(raw: u64, width: usize) -> i64 {
    if width == 0 {
        return 0;
    }
    let sign_bit = 1u64 << (width - 1);
    let magnitude = (raw & (sign_bit - 1)) as i64;
    if raw & sign_bit != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// MSB-first bit cursor over a byte slice. Reads may straddle byte boundaries.
#[derive(Debug)]
pub(crate) struct BitReader<'a> {
    slice: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(slice: &'a [u8]) -> Self {
        Self { slice, pos: 0 }
    }

    pub(crate) fn bits_remaining(&self) -> usize {
        (self.slice.len() * 8).saturating_sub(self.pos)
    }

    /// Current position, in whole octets, rounded up.
    pub(crate) fn byte_position(&self) -> usize {
        (self.pos + 7) / 8
    }

    /// Reads `width` bits as an unsigned integer. A width of zero consumes nothing.
    pub(crate) fn read(&mut self, width: usize) -> Result<u64> {
        if width > 64 {
            return Err(GribError::UnsupportedBitWidth(width));
        }
        if width == 0 {
            return Ok(0);
        }
        let available = self.bits_remaining();
        if width > available {
            return Err(GribError::BitstreamExhausted { requested: width, available });
        }

        let mut value = 0u64;
        let mut remaining = width;
        while remaining > 0 {
            let byte = self.slice[self.pos / 8];
            let offset = self.pos % 8;
            let take = (8 - offset).min(remaining);
            let bits = (byte << offset) >> (8 - take); // ___####_ -> 00000###
            value = (value << take) | u64::from(bits);
            self.pos += take;
            remaining -= take;
        }

        Ok(value)
    }

    pub(crate) fn align_to_byte(&mut self) {
        self.pos = self.byte_position() * 8;
    }
}

/// Sequential big-endian reader used by template decoders.
pub(crate) struct Buffer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Buffer<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn read<T: EndianRead>(&mut self) -> Result<T> {
        let end = self.pos + std::mem::size_of::<T>();
        let bytes = self.bytes.get(self.pos..end).ok_or(GribError::Truncated {
            needed: end,
            available: self.bytes.len(),
        })?;
        self.pos = end;

        Ok(T::from_be_bytes(bytes))
    }

    /// Reads a sign-and-magnitude integer of the same width as `T`.
    pub(crate) fn read_signed<T, I>(&mut self) -> Result<I>
    where
        T: EndianRead + GribInt<I>,
    {
        Ok(self.read::<T>()?.as_grib_int())
    }
}

pub(crate) trait EndianRead {
    /// `bytes` is always exactly `size_of::<Self>()` long.
    fn from_be_bytes(bytes: &[u8]) -> Self;
}

macro_rules! uint_impl {
    ($ty:ty) => {
        impl EndianRead for $ty {
            fn from_be_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(bytes);
                <$ty>::from_be_bytes(buf)
            }
        }
    };
}

uint_impl! { u8 }
uint_impl! { u16 }
uint_impl! { u32 }
uint_impl! { u64 }

uint_impl! { f32 }
