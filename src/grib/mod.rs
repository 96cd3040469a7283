pub mod lookup;
pub mod sections;
pub mod tables;
pub mod templates;
mod utils;

use std::io::Read;

use serde::Serialize;

use crate::grib::lookup::LookedUpMessage;
use crate::grib::sections::sect0::Indicator;
use crate::grib::sections::sect1::Identification;
use crate::grib::sections::sect2::LocalUse;
use crate::grib::sections::sect3::GridDefinition;
use crate::grib::sections::sect4::ProductDefinition;
use crate::grib::sections::sect5::DataRepresentation;
use crate::grib::sections::sect6::BitMap;
use crate::grib::sections::sect7::DataSection;
use crate::grib::sections::sect8::EndSection;
use crate::grib::sections::{parse_section, Section};
use crate::grib::templates::TemplateKey;

pub(crate) const SECT0_IS_MAGIC: &[u8] = b"GRIB";
pub(crate) const SECT0_IS_MAGIC_SIZE: usize = SECT0_IS_MAGIC.len();
pub(crate) const SECT0_IS_SIZE: usize = 16;
pub(crate) const SECT_HEADER_SIZE: usize = 5;
pub(crate) const SECT8_ES_MAGIC: &[u8] = b"7777";
pub(crate) const SECT8_ES_SIZE: usize = SECT8_ES_MAGIC.len();

pub const NUM_SECTIONS: usize = 9;

/// Reads a big-endian `$ty` at `$start`, failing with [`GribError::Truncated`] past the end.
#[macro_export]
macro_rules! read_as {
    ($ty:ty, $buf:expr, $start:expr) => {{
        let start: usize = $start;
        let end = start + std::mem::size_of::<$ty>();
        $buf.get(start..end)
            .and_then(|bytes| bytes.try_into().ok())
            .map(<$ty>::from_be_bytes)
            .ok_or($crate::grib::GribError::Truncated {
                needed: end,
                available: $buf.len(),
            })
    }};
}

pub type Result<T, E = GribError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum GribError {
    #[error("StdError({0})")]
    StdError(#[from] std::io::Error),

    #[error("NotGRIB")]
    NotGRIB(),

    #[error("GRIBVersionMismatch({0})")]
    GRIBVersionMismatch(u8),

    #[error("EndSectionMismatch")]
    EndSectionMismatch(),

    #[error("UnknownSection({0}): unknown section number")]
    UnknownSection(u8),

    #[error("UnregisteredTemplate({0}): template not implemented")]
    UnregisteredTemplate(TemplateKey),

    #[error("UnsupportedBitMap({0}): bit-map indicator not supported")]
    UnsupportedBitMap(u8),

    #[error("UnsupportedPacking({0})")]
    UnsupportedPacking(String),

    #[error("UnsupportedBitWidth({0})")]
    UnsupportedBitWidth(usize),

    #[error("LengthMismatch(section {section}: declared {declared}, actual {actual})")]
    LengthMismatch { section: u8, declared: u64, actual: usize },

    #[error("Truncated(needed {needed} octets, {available} available)")]
    Truncated { needed: usize, available: usize },

    #[error("BitstreamExhausted(requested {requested} bits, {available} available)")]
    BitstreamExhausted { requested: usize, available: usize },

    #[error("MissingSection({0})")]
    MissingSection(u8),

    #[error("SectionOutOfPlace(slot {slot} holds section {found})")]
    SectionOutOfPlace { slot: usize, found: u8 },

    #[error("RepeatedSection({0}): multi-field messages are not supported")]
    RepeatedSection(u8),

    #[error("PointCountMismatch(declared {declared}, found {found})")]
    PointCountMismatch { declared: usize, found: usize },

    #[error("ParseError({0})")]
    ParseError(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Grib {
    pub messages: Vec<Message>,
}

/// One parsed GRIB2 message: a slot per section number, `None` when the section is absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub indicator: Option<Indicator>,
    pub identification: Option<Identification>,
    pub local_use: Option<LocalUse>,
    pub grid_definition: Option<GridDefinition>,
    pub product_definition: Option<ProductDefinition>,
    pub data_representation: Option<DataRepresentation>,
    pub bitmap: Option<BitMap>,
    pub data: Option<DataSection>,
    pub end: Option<EndSection>,
}

impl Message {
    /// Parses nine section buffers, indexed by section number.
    pub fn from_sections(sections: [Option<&[u8]>; NUM_SECTIONS]) -> Result<Self> {
        let mut message = Message::default();

        for (slot, buf) in sections.into_iter().enumerate() {
            let section = match parse_section(buf)? {
                Some(section) => section,
                None => continue,
            };

            if section.number() as usize != slot {
                return Err(GribError::SectionOutOfPlace { slot, found: section.number() });
            }

            match section {
                Section::Section0(section) => message.indicator = Some(section),
                Section::Section1(section) => message.identification = Some(section),
                Section::Section2(section) => message.local_use = Some(section),
                Section::Section3(section) => message.grid_definition = Some(section),
                Section::Section4(section) => message.product_definition = Some(section),
                Section::Section5(section) => message.data_representation = Some(section),
                Section::Section6(section) => message.bitmap = Some(section),
                Section::Section7(section) => message.data = Some(section),
                Section::Section8(section) => message.end = Some(section),
            }
        }

        Ok(message)
    }

    /// Unpacks the grid values: one `f64` per declared grid point, `NaN` where missing.
    pub fn decode(&self) -> Result<Box<[f64]>> {
        let grid_definition = self.grid_definition.as_ref().ok_or(GribError::MissingSection(3))?;
        let data_representation = self.data_representation.as_ref().ok_or(GribError::MissingSection(5))?;
        let bitmap = self.bitmap.as_ref().ok_or(GribError::MissingSection(6))?;
        let data = self.data.as_ref().ok_or(GribError::MissingSection(7))?;

        sections::sect7::decode(&data.payload, data_representation, bitmap, grid_definition.num_points as usize)
    }

    /// Second pass: attaches code-table labels without touching the raw fields.
    pub fn lookup(&self) -> LookedUpMessage<'_> {
        lookup::lookup(self)
    }
}

/// Cuts one message off the front of `bytes` into section buffers indexed by section
/// number, returning the slots and whatever follows the message.
pub fn split_message(bytes: &[u8]) -> Result<([Option<&[u8]>; NUM_SECTIONS], &[u8])> {
    if bytes.len() < SECT0_IS_SIZE {
        return Err(GribError::Truncated { needed: SECT0_IS_SIZE, available: bytes.len() });
    }
    if &bytes[0..SECT0_IS_MAGIC_SIZE] != SECT0_IS_MAGIC {
        return Err(GribError::NotGRIB());
    }
    let version = bytes[7];
    if version != 2 {
        return Err(GribError::GRIBVersionMismatch(version));
    }

    let total_length = read_as!(u64, bytes, 8)?;
    let total_length = usize::try_from(total_length)
        .map_err(|_| GribError::ParseError(format!("Message length `{}` is too large.", total_length)))?;
    if total_length < SECT0_IS_SIZE + SECT8_ES_SIZE {
        return Err(GribError::LengthMismatch {
            section: 0,
            declared: total_length as u64,
            actual: bytes.len(),
        });
    }
    if total_length > bytes.len() {
        return Err(GribError::Truncated { needed: total_length, available: bytes.len() });
    }
    let (message, rest) = bytes.split_at(total_length);

    let mut slots: [Option<&[u8]>; NUM_SECTIONS] = [None; NUM_SECTIONS];
    slots[0] = Some(&message[..SECT0_IS_SIZE]);

    let mut pos = SECT0_IS_SIZE;
    loop {
        let remaining_length = total_length.saturating_sub(pos);
        debug!("Remaining size to read : {}/{}", remaining_length, total_length);

        if remaining_length == SECT8_ES_SIZE {
            if &message[pos..] != SECT8_ES_MAGIC {
                return Err(GribError::EndSectionMismatch());
            }
            slots[8] = Some(&message[pos..]);
            break;
        }
        if remaining_length < SECT_HEADER_SIZE {
            return Err(GribError::EndSectionMismatch());
        }

        let length = read_as!(u32, message, pos)? as usize;
        let number = message[pos + 4];
        if !(1..=7).contains(&number) {
            return Err(GribError::UnknownSection(number));
        }
        if length < SECT_HEADER_SIZE || length > remaining_length {
            return Err(GribError::LengthMismatch {
                section: number,
                declared: length as u64,
                actual: remaining_length,
            });
        }
        let slot = &mut slots[number as usize];
        if slot.is_some() {
            return Err(GribError::RepeatedSection(number));
        }

        debug!("Split section {} : {}", number, length);
        *slot = Some(&message[pos..pos + length]);
        pos += length;
    }

    Ok((slots, rest))
}

/// Parses every message in `bytes`. Bytes between messages that do not start a new
/// message are skipped.
pub fn from_bytes(bytes: &[u8]) -> Result<Grib> {
    let mut messages = Vec::new();
    let mut rest = bytes;

    loop {
        match rest.windows(SECT0_IS_MAGIC_SIZE).position(|w| w == SECT0_IS_MAGIC) {
            Some(0) => {}
            Some(skip) => {
                warn!("Skipping {} octets before next message", skip);
                rest = &rest[skip..];
            }
            None => {
                if !rest.is_empty() {
                    warn!("Ignoring {} trailing octets", rest.len());
                }
                break;
            }
        }

        let (sections, next) = split_message(rest)?;
        messages.push(Message::from_sections(sections)?);
        rest = next;
    }

    debug!("Read {} message(s)", messages.len());

    Ok(Grib { messages })
}

pub fn from_reader<R: Read>(mut reader: R) -> Result<Grib> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    from_bytes(&bytes)
}
