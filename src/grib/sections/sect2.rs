use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::{Result, SECT_HEADER_SIZE};

/// Local Use Section. The payload is centre specific and kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUse {
    #[serde(flatten)]
    pub header: SectionHeader,
    #[serde(skip)]
    pub local_data: Box<[u8]>,
}

pub(crate) fn parse(buf: &[u8]) -> Result<LocalUse> {
    let header = SectionHeader::read(buf)?;

    Ok(LocalUse {
        header,
        local_data: buf[SECT_HEADER_SIZE..].into(),
    })
}
