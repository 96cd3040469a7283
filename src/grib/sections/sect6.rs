use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::{GribError, Result};
use crate::read_as;

/// Bit-map indicator meaning every grid point has an explicit value.
pub const NO_BITMAP: u8 = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitMap {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Bit-map indicator (see Code Table 6.0)
    pub bitmap_indicator: u8,
}

/// Only indicator 255 is decoded. Embedded bit maps (0) and bit maps carried over from a
/// previous message (254) fail instead of being partially interpreted.
pub(crate) fn parse(buf: &[u8]) -> Result<BitMap> {
    let header = SectionHeader::read(buf)?;
    let bitmap_indicator = read_as!(u8, buf, 5)?;

    if bitmap_indicator != NO_BITMAP {
        return Err(GribError::UnsupportedBitMap(bitmap_indicator));
    }

    Ok(BitMap { header, bitmap_indicator })
}
