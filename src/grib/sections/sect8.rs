use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::{GribError, Result, SECT8_ES_MAGIC, SECT8_ES_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndSection {
    #[serde(flatten)]
    pub header: SectionHeader,
}

pub(crate) fn parse(buf: &[u8]) -> Result<EndSection> {
    if buf != SECT8_ES_MAGIC {
        return Err(GribError::EndSectionMismatch());
    }

    Ok(EndSection {
        header: SectionHeader {
            length: SECT8_ES_SIZE as u32,
            section_number: 8,
        },
    })
}
