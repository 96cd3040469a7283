use serde::Serialize;

use crate::grib::sections::sect5::{DataRepresentation, Packing};
use crate::grib::sections::sect6::{BitMap, NO_BITMAP};
use crate::grib::sections::SectionHeader;
use crate::grib::{GribError, Result, SECT_HEADER_SIZE};

use self::complex::ComplexPackingDecoder;
use self::complex_spacial_diff::ComplexPackingSpatialDiffDecoder;
use self::simple::SimplePackingDecoder;

pub(crate) mod complex;
pub(crate) mod complex_spacial_diff;
mod groups;
pub(crate) mod simple;

/// Data Section. The packed payload is only interpreted by [`decode`], using the
/// sibling sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSection {
    #[serde(flatten)]
    pub header: SectionHeader,
    #[serde(skip)]
    pub payload: Box<[u8]>,
}

pub(crate) fn parse(buf: &[u8]) -> Result<DataSection> {
    let header = SectionHeader::read(buf)?;

    Ok(DataSection {
        header,
        payload: buf[SECT_HEADER_SIZE..].into(),
    })
}

pub(crate) trait Grib2DataDecoder {
    /// Unpacks exactly `num_points` values from `slice`.
    fn decode(&self, slice: &[u8], num_points: usize) -> Result<Box<[f64]>>;
}

/// Reconstructs the grid values in stored scan order, `NaN` marking missing points.
pub(crate) fn decode(
    slice: &[u8],
    data_representation: &DataRepresentation,
    bitmap: &BitMap,
    num_points: usize,
) -> Result<Box<[f64]>> {
    if bitmap.bitmap_indicator != NO_BITMAP {
        return Err(GribError::UnsupportedBitMap(bitmap.bitmap_indicator));
    }

    // Without a bit map every grid point is encoded.
    if data_representation.num_points as usize != num_points {
        return Err(GribError::PointCountMismatch {
            declared: num_points,
            found: data_representation.num_points as usize,
        });
    }

    debug!("Decode {} points with template 5.{}", num_points, data_representation.template_number);

    let values = match &data_representation.packing {
        Packing::Simple(packing) => SimplePackingDecoder { packing }.decode(slice, num_points)?,
        Packing::Complex(packing) => ComplexPackingDecoder { packing }.decode(slice, num_points)?,
        Packing::ComplexSpatialDiff(packing) => {
            ComplexPackingSpatialDiffDecoder { packing }.decode(slice, num_points)?
        }
    };

    if values.len() != num_points {
        return Err(GribError::PointCountMismatch { declared: num_points, found: values.len() });
    }

    Ok(values)
}
