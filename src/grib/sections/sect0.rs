use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::{GribError, Result, SECT0_IS_MAGIC, SECT0_IS_MAGIC_SIZE, SECT0_IS_SIZE};
use crate::read_as;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Discipline - GRIB Master Table Number (see Code Table 0.0)
    pub discipline: u8,
    /// GRIB Edition Number
    pub edition: u8,
    /// Total length of GRIB message in octets (including Section 0)
    pub total_length: u64,
}

pub(crate) fn parse(buf: &[u8]) -> Result<Indicator> {
    if buf.len() != SECT0_IS_SIZE {
        return Err(GribError::LengthMismatch {
            section: 0,
            declared: SECT0_IS_SIZE as u64,
            actual: buf.len(),
        });
    }
    if &buf[0..SECT0_IS_MAGIC_SIZE] != SECT0_IS_MAGIC {
        return Err(GribError::NotGRIB());
    }

    let edition = buf[7];
    if edition != 2 {
        return Err(GribError::GRIBVersionMismatch(edition));
    }

    Ok(Indicator {
        header: SectionHeader {
            length: SECT0_IS_SIZE as u32,
            section_number: 0,
        },
        discipline: buf[6],
        edition,
        total_length: read_as!(u64, buf, 8)?,
    })
}
