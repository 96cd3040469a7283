use serde::Serialize;

use crate::grib::sections::sect0::Indicator;
use crate::grib::sections::sect1::Identification;
use crate::grib::sections::sect2::LocalUse;
use crate::grib::sections::sect3::GridDefinition;
use crate::grib::sections::sect4::ProductDefinition;
use crate::grib::sections::sect5::DataRepresentation;
use crate::grib::sections::sect6::BitMap;
use crate::grib::sections::sect7::DataSection;
use crate::grib::sections::sect8::EndSection;
use crate::grib::{GribError, Result, SECT0_IS_MAGIC, SECT0_IS_MAGIC_SIZE, SECT8_ES_MAGIC};
use crate::read_as;

pub mod sect0;
pub mod sect1;
pub mod sect2;
pub mod sect3;
pub mod sect4;
pub mod sect5;
pub mod sect6;
pub mod sect7;
pub mod sect8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    /// Length of the section in octets
    pub length: u32,
    /// Number of the section
    pub section_number: u8,
}

impl SectionHeader {
    /// Reads octets 1-5 and checks the declared length against the buffer.
    pub(crate) fn read(buf: &[u8]) -> Result<Self> {
        let length = read_as!(u32, buf, 0)?;
        let section_number = read_as!(u8, buf, 4)?;

        if length as usize != buf.len() {
            return Err(GribError::LengthMismatch {
                section: section_number,
                declared: u64::from(length),
                actual: buf.len(),
            });
        }

        Ok(Self { length, section_number })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Section0(Indicator),
    Section1(Identification),
    Section2(LocalUse),
    Section3(GridDefinition),
    Section4(ProductDefinition),
    Section5(DataRepresentation),
    Section6(BitMap),
    Section7(DataSection),
    Section8(EndSection),
}

impl Section {
    pub fn number(&self) -> u8 {
        match self {
            Section::Section0(_) => 0,
            Section::Section1(_) => 1,
            Section::Section2(_) => 2,
            Section::Section3(_) => 3,
            Section::Section4(_) => 4,
            Section::Section5(_) => 5,
            Section::Section6(_) => 6,
            Section::Section7(_) => 7,
            Section::Section8(_) => 8,
        }
    }
}

/// Sections 0 and 8 have no number field and are recognised by their magic markers;
/// every other section carries its number at octet 5.
pub fn identify_section_number(buf: &[u8]) -> Result<u8> {
    match buf.get(..SECT0_IS_MAGIC_SIZE) {
        Some(first) if first == SECT0_IS_MAGIC => Ok(0),
        Some(first) if first == SECT8_ES_MAGIC => Ok(8),
        _ => read_as!(u8, buf, 4),
    }
}

/// Parses one section buffer. An absent buffer yields `None`.
pub fn parse_section(buf: Option<&[u8]>) -> Result<Option<Section>> {
    let buf = match buf {
        Some(buf) => buf,
        None => return Ok(None),
    };

    let number = identify_section_number(buf)?;
    debug!("Parse section {} : {}", number, buf.len());

    let section = match number {
        0 => Section::Section0(sect0::parse(buf)?),
        1 => Section::Section1(sect1::parse(buf)?),
        2 => Section::Section2(sect2::parse(buf)?),
        3 => Section::Section3(sect3::parse(buf)?),
        4 => Section::Section4(sect4::parse(buf)?),
        5 => Section::Section5(sect5::parse(buf)?),
        6 => Section::Section6(sect6::parse(buf)?),
        7 => Section::Section7(sect7::parse(buf)?),
        8 => Section::Section8(sect8::parse(buf)?),
        n => return Err(GribError::UnknownSection(n)),
    };

    Ok(Some(section))
}
