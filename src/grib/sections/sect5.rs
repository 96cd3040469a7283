use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::templates::DataRepresentationTemplate;
use crate::grib::utils::Buffer;
use crate::grib::Result;
use crate::read_as;

const TEMPLATE_OFFSET: usize = 11;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRepresentation {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Number of data points where one or more values are specified in Section 7 when a
    /// bit map is present, total number of data points when a bit map is absent
    pub num_points: u32,
    /// Data Representation Template Number (see Code Table 5.0)
    pub template_number: u16,
    pub packing: Packing,
}

pub(crate) fn parse(buf: &[u8]) -> Result<DataRepresentation> {
    let header = SectionHeader::read(buf)?;

    let num_points = read_as!(u32, buf, 5)?;
    let template_number = read_as!(u16, buf, 9)?;

    let template = DataRepresentationTemplate::resolve(template_number)?;
    debug!("Data representation template 5.{}", template_number);
    let packing = Packing::from_template(template, &buf[TEMPLATE_OFFSET..])?;

    Ok(DataRepresentation {
        header,
        num_points,
        template_number,
        packing,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "template")]
pub enum Packing {
    Simple(SimplePacking),
    Complex(ComplexPacking),
    ComplexSpatialDiff(ComplexSpatialDiffPacking),
}

impl Packing {
    pub(crate) fn from_template(template: DataRepresentationTemplate, bytes: &[u8]) -> Result<Self> {
        let mut buf = Buffer::new(bytes);

        match template {
            DataRepresentationTemplate::SimplePacking => Ok(Packing::Simple(SimplePacking::read(&mut buf)?)),
            DataRepresentationTemplate::ComplexPacking => Ok(Packing::Complex(ComplexPacking::read(&mut buf)?)),
            DataRepresentationTemplate::ComplexPackingSpatialDiff => {
                Ok(Packing::ComplexSpatialDiff(ComplexSpatialDiffPacking {
                    complex: ComplexPacking::read(&mut buf)?,
                    spatial_difference_order: buf.read()?,
                    extra_descriptor_octets: buf.read()?,
                }))
            }
        }
    }

    /// Reference value, scale factors and bit width shared by every packing method.
    pub fn simple(&self) -> &SimplePacking {
        match self {
            Packing::Simple(simple) => simple,
            Packing::Complex(complex) => &complex.simple,
            Packing::ComplexSpatialDiff(spatial) => &spatial.complex.simple,
        }
    }
}

/// Data Representation Template 5.0: grid point data - simple packing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePacking {
    /// Reference value (R), IEEE 32-bit floating-point
    pub reference_value: f32,
    /// Binary scale factor (E)
    pub binary_scale_factor: i16,
    /// Decimal scale factor (D)
    pub decimal_scale_factor: i16,
    /// Number of bits used for each packed value for simple packing, or for each group
    /// reference value for complex packing
    pub num_bits: u8,
    /// Type of original field values (see Code Table 5.1)
    pub values_type: u8,
}

impl SimplePacking {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            reference_value: buf.read()?,
            binary_scale_factor: buf.read_signed::<u16, i16>()?,
            decimal_scale_factor: buf.read_signed::<u16, i16>()?,
            num_bits: buf.read()?,
            values_type: buf.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    /// NG - number of groups of data values into which field is split
    pub num_groups: u32,
    pub group_widths_reference: u8,
    pub group_widths_num_bits: u8,
    pub group_lengths_reference: u32,
    pub group_lengths_increment: u8,
    /// True length of last group
    pub group_lengths_last: u32,
    pub group_scaled_lengths_num_bits: u8,
}

/// Data Representation Template 5.2: grid point data - complex packing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPacking {
    #[serde(flatten)]
    pub simple: SimplePacking,
    /// Group splitting method used (see Code Table 5.4)
    pub group_method: u8,
    /// Missing value management used (see Code Table 5.5)
    pub missing_value: u8,
    pub missing_substitute_primary: u32,
    pub missing_substitute_secondary: u32,
    pub group_definition: GroupDefinition,
}

impl ComplexPacking {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            simple: SimplePacking::read(buf)?,
            group_method: buf.read()?,
            missing_value: buf.read()?,
            missing_substitute_primary: buf.read()?,
            missing_substitute_secondary: buf.read()?,
            group_definition: GroupDefinition {
                num_groups: buf.read()?,
                group_widths_reference: buf.read()?,
                group_widths_num_bits: buf.read()?,
                group_lengths_reference: buf.read()?,
                group_lengths_increment: buf.read()?,
                group_lengths_last: buf.read()?,
                group_scaled_lengths_num_bits: buf.read()?,
            },
        })
    }
}

/// Data Representation Template 5.3: grid point data - complex packing and spatial
/// differencing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSpatialDiffPacking {
    #[serde(flatten)]
    pub complex: ComplexPacking,
    /// Order of spatial differencing (see Code Table 5.6)
    pub spatial_difference_order: u8,
    /// Number of octets of each extra descriptor at the start of section 7
    pub extra_descriptor_octets: u8,
}
