use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::{GribError, Result};
use crate::read_as;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Identification of originating/generating centre (see Common Code Table C-1)
    pub centre_id: u16,
    /// Identification of originating/generating sub-centre (allocated by originating/ generating centre)
    pub subcentre_id: u16,
    /// GRIB Master Tables Version Number (see Code Table 1.0)
    pub master_table_version: u8,
    /// GRIB Local Tables Version Number (see Code Table 1.1)
    pub local_table_version: u8,
    /// Significance of Reference Time (see Code Table 1.2)
    pub ref_time_significance: u8,
    /// Reference time of data
    pub ref_time: DateTime<Utc>,
    /// Production status of processed data in this GRIB message
    /// (see Code Table 1.3)
    pub prod_status: u8,
    /// Type of processed data in this GRIB message (see Code Table 1.4)
    pub data_type: u8,
}

pub(crate) fn parse(buf: &[u8]) -> Result<Identification> {
    let header = SectionHeader::read(buf)?;
    let year = read_as!(u16, buf, 12)?;
    let (month, day, hour, minute, second) = (
        read_as!(u8, buf, 14)?,
        read_as!(u8, buf, 15)?,
        read_as!(u8, buf, 16)?,
        read_as!(u8, buf, 17)?,
        read_as!(u8, buf, 18)?,
    );

    let ref_time = Utc
        .with_ymd_and_hms(
            year.into(),
            month.into(),
            day.into(),
            hour.into(),
            minute.into(),
            second.into(),
        )
        .single()
        .ok_or_else(|| {
            GribError::ParseError(format!(
                "Reference time `{:04}-{:02}-{:02} {:02}:{:02}:{:02}` is not valid.",
                year, month, day, hour, minute, second
            ))
        })?;

    Ok(Identification {
        header,
        centre_id: read_as!(u16, buf, 5)?,
        subcentre_id: read_as!(u16, buf, 7)?,
        master_table_version: read_as!(u8, buf, 9)?,
        local_table_version: read_as!(u8, buf, 10)?,
        ref_time_significance: read_as!(u8, buf, 11)?,
        ref_time,
        prod_status: read_as!(u8, buf, 19)?,
        data_type: read_as!(u8, buf, 20)?,
    })
}
