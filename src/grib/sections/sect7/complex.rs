use std::iter;

use crate::grib::sections::sect5::ComplexPacking;
use crate::grib::sections::sect7::simple::Scale;
use crate::grib::sections::sect7::{groups, Grib2DataDecoder};
use crate::grib::utils::BitReader;
use crate::grib::{GribError, Result};

pub(crate) struct ComplexPackingDecoder<'a> {
    pub(crate) packing: &'a ComplexPacking,
}

impl Grib2DataDecoder for ComplexPackingDecoder<'_> {
    fn decode(&self, slice: &[u8], num_points: usize) -> Result<Box<[f64]>> {
        let mut reader = BitReader::new(slice);
        let packed = unpack_groups(&mut reader, self.packing, num_points)?;

        let scale = Scale::new(&self.packing.simple);
        Ok(packed.into_iter().map(|v| scale.apply_or_missing(v)).collect())
    }
}

/// Missing value management (Code Table 5.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingValues {
    None,
    Primary,
    PrimaryAndSecondary,
}

impl MissingValues {
    fn new(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Primary),
            2 => Ok(Self::PrimaryAndSecondary),
            n => Err(GribError::UnsupportedPacking(format!("missing value management {}", n))),
        }
    }

    /// A value of `width` bits is missing when it is all ones (primary) or all ones
    /// minus one (secondary).
    fn is_missing(self, raw: u64, width: usize) -> bool {
        if width == 0 {
            return false;
        }
        let all_ones = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
        match self {
            Self::None => false,
            Self::Primary => raw == all_ones,
            Self::PrimaryAndSecondary => raw == all_ones || raw == all_ones - 1,
        }
    }
}

/// Unpacks every group into `reference + packed`, `None` for missing points.
pub(crate) fn unpack_groups(
    reader: &mut BitReader,
    packing: &ComplexPacking,
    num_points: usize,
) -> Result<Vec<Option<i64>>> {
    let missing = MissingValues::new(packing.missing_value)?;
    let groups = groups::decode(reader, &packing.simple, &packing.group_definition, num_points)?;
    let reference_width = packing.simple.num_bits as usize;

    let mut values = Vec::with_capacity(num_points);
    for group in groups {
        if group.width == 0 {
            // Constant group: the reference alone carries the value.
            let value = if missing.is_missing(group.reference, reference_width) {
                None
            } else {
                Some(group.reference as i64)
            };
            values.extend(iter::repeat(value).take(group.length));
            continue;
        }

        for _ in 0..group.length {
            let raw = reader.read(group.width)?;
            values.push(if missing.is_missing(raw, group.width) {
                None
            } else {
                Some(group.reference.wrapping_add(raw) as i64)
            });
        }
    }

    Ok(values)
}
