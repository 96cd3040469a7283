use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::templates::GridTemplate;
use crate::grib::utils::{Buffer, GribInt};
use crate::grib::Result;
use crate::read_as;

/// Octet offset of the template fields within section 3.
const TEMPLATE_OFFSET: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDefinition {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Source of grid definition (see Code Table 3.0)
    pub source: u8,
    /// Number of data points
    pub num_points: u32,
    /// Number of octets per entry of the optional list of numbers, 0 when there is no list
    pub optional_list_octets_per_number: u8,
    pub optional_num_list_interpretation: u8,
    /// Grid Definition Template Number (see Code Table 3.1)
    pub template_number: u16,
    pub grid: Grid,
}

impl GridDefinition {
    pub fn scanning_mode(&self) -> u8 {
        match &self.grid {
            Grid::LatLon(grid) | Grid::GaussianLatLon(grid) => grid.scanning_mode,
            Grid::LambertConformal(grid) => grid.scanning_mode,
        }
    }

    pub fn shape_of_earth(&self) -> &EarthShape {
        match &self.grid {
            Grid::LatLon(grid) | Grid::GaussianLatLon(grid) => &grid.earth,
            Grid::LambertConformal(grid) => &grid.earth,
        }
    }
}

pub(crate) fn parse(buf: &[u8]) -> Result<GridDefinition> {
    let header = SectionHeader::read(buf)?;

    let template_number = read_as!(u16, buf, 12)?;
    let optional_list_octets_per_number = read_as!(u8, buf, 10)?;

    // Template fields are read in order; the optional list of numbers after them is left unread.
    let template = GridTemplate::resolve(template_number)?;
    debug!("Grid definition template 3.{}", template_number);
    let grid = Grid::from_template(template, &buf[TEMPLATE_OFFSET..])?;

    Ok(GridDefinition {
        header,
        source: read_as!(u8, buf, 5)?,
        num_points: read_as!(u32, buf, 6)?,
        optional_list_octets_per_number,
        optional_num_list_interpretation: read_as!(u8, buf, 11)?,
        template_number,
        grid,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "template")]
pub enum Grid {
    LatLon(LatLonGrid),
    LambertConformal(LambertConformalGrid),
    GaussianLatLon(LatLonGrid),
}

impl Grid {
    pub(crate) fn from_template(template: GridTemplate, buf: &[u8]) -> Result<Self> {
        let mut buf = Buffer::new(buf);

        match template {
            GridTemplate::LatLon => Ok(Grid::LatLon(LatLonGrid::read(&mut buf)?)),
            GridTemplate::GaussianLatLon => Ok(Grid::GaussianLatLon(LatLonGrid::read(&mut buf)?)),
            GridTemplate::LambertConformal => Ok(Grid::LambertConformal(LambertConformalGrid {
                earth: EarthShape::read(&mut buf)?,
                n_x: buf.read()?,
                n_y: buf.read()?,
                la1: buf.read_signed::<u32, i32>()?,
                lo1: buf.read_signed::<u32, i32>()?,
                resolution_and_component_flags: buf.read()?,
                la_d: buf.read_signed::<u32, i32>()?,
                lo_v: buf.read_signed::<u32, i32>()?,
                d_x: buf.read()?,
                d_y: buf.read()?,
                projection_centre: buf.read()?,
                scanning_mode: buf.read()?,
                latin1: buf.read_signed::<u32, i32>()?,
                latin2: buf.read_signed::<u32, i32>()?,
                south_pole_lat: buf.read_signed::<u32, i32>()?,
                south_pole_lon: buf.read_signed::<u32, i32>()?,
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScaledValue {
    pub scale: i8,
    pub value: u32,
}

impl ScaledValue {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            scale: buf.read::<u8>()?.as_grib_int(),
            value: buf.read()?,
        })
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.value) * 10_f64.powi(-i32::from(self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthShape {
    /// Shape of the Earth (see Code Table 3.2)
    pub earth_shape: u8,
    pub spherical_radius: ScaledValue,
    pub major_axis: ScaledValue,
    pub minor_axis: ScaledValue,
}

impl EarthShape {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            earth_shape: buf.read()?,
            spherical_radius: ScaledValue::read(buf)?,
            major_axis: ScaledValue::read(buf)?,
            minor_axis: ScaledValue::read(buf)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAngle {
    pub basic_angle: u32,
    pub basic_angle_sub: u32,
}

/// Grid Definition Templates 3.0 (latitude/longitude) and 3.40 (Gaussian latitude/longitude).
///
/// Coordinates are in micro-degrees unless `initial_prod_basic_angle` says otherwise.
/// For 3.40, `d_j` holds N, the number of parallels between a pole and the equator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLonGrid {
    pub earth: EarthShape,
    pub n_i: u32,
    pub n_j: u32,
    pub initial_prod_basic_angle: BasicAngle,
    pub la1: i32,
    pub lo1: i32,
    pub resolution_and_component_flags: u8,
    pub la2: i32,
    pub lo2: i32,
    pub d_i: u32,
    pub d_j: u32,
    /// Scanning mode (see Flag Table 3.4)
    pub scanning_mode: u8,
}

impl LatLonGrid {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            earth: EarthShape::read(buf)?,
            n_i: buf.read()?,
            n_j: buf.read()?,
            initial_prod_basic_angle: BasicAngle {
                basic_angle: buf.read()?,
                basic_angle_sub: buf.read()?,
            },
            la1: buf.read_signed::<u32, i32>()?,
            lo1: buf.read_signed::<u32, i32>()?,
            resolution_and_component_flags: buf.read()?,
            la2: buf.read_signed::<u32, i32>()?,
            lo2: buf.read_signed::<u32, i32>()?,
            d_i: buf.read()?,
            d_j: buf.read()?,
            scanning_mode: buf.read()?,
        })
    }
}

/// Grid Definition Template 3.30: Lambert conformal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambertConformalGrid {
    pub earth: EarthShape,
    pub n_x: u32,
    pub n_y: u32,
    pub la1: i32,
    pub lo1: i32,
    pub resolution_and_component_flags: u8,
    /// Latitude where `d_x` and `d_y` are specified
    pub la_d: i32,
    /// Longitude of meridian parallel to y-axis along which latitude increases
    pub lo_v: i32,
    pub d_x: u32,
    pub d_y: u32,
    /// Projection centre flag (see Flag Table 3.5)
    pub projection_centre: u8,
    pub scanning_mode: u8,
    pub latin1: i32,
    pub latin2: i32,
    pub south_pole_lat: i32,
    pub south_pole_lon: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grib::GribError;

    fn earth() -> Vec<u8> {
        let mut buf = vec![6];
        buf.extend_from_slice(&[0; 15]);
        buf
    }

    fn section3(template_number: u16, template: &[u8], num_points: u32) -> Vec<u8> {
        let length = (TEMPLATE_OFFSET + template.len()) as u32;
        let mut buf = length.to_be_bytes().to_vec();
        buf.push(3);
        buf.push(0);
        buf.extend_from_slice(&num_points.to_be_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&template_number.to_be_bytes());
        buf.extend_from_slice(template);
        buf
    }

    fn lat_lon_template() -> Vec<u8> {
        let mut buf = earth();
        buf.extend_from_slice(&3u32.to_be_bytes()); // Ni
        buf.extend_from_slice(&2u32.to_be_bytes()); // Nj
        buf.extend_from_slice(&[0; 8]);
        buf.extend_from_slice(&(0x8000_0000u32 | 90_000_000).to_be_bytes()); // La1 = -90
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.push(48);
        buf.extend_from_slice(&90_000_000u32.to_be_bytes());
        buf.extend_from_slice(&359_000_000u32.to_be_bytes());
        buf.extend_from_slice(&1_000_000u32.to_be_bytes());
        buf.extend_from_slice(&1_000_000u32.to_be_bytes());
        buf.push(0x40);
        buf
    }

    #[test]
    fn parse_lat_lon() {
        let buf = section3(0, &lat_lon_template(), 6);
        let definition = parse(&buf).unwrap();

        assert_eq!(definition.header, SectionHeader { length: 72, section_number: 3 });
        assert_eq!(definition.num_points, 6);
        assert_eq!(definition.template_number, 0);
        assert_eq!(definition.scanning_mode(), 0x40);
        assert_eq!(definition.shape_of_earth().earth_shape, 6);
        match definition.grid {
            Grid::LatLon(grid) => {
                assert_eq!((grid.n_i, grid.n_j), (3, 2));
                assert_eq!(grid.la1, -90_000_000);
                assert_eq!(grid.la2, 90_000_000);
                assert_eq!(grid.lo2, 359_000_000);
            }
            other => panic!("unexpected grid {:?}", other),
        }
    }

    #[test]
    fn parse_gaussian_shares_lat_lon_layout() {
        let buf = section3(40, &lat_lon_template(), 6);
        assert!(matches!(parse(&buf).unwrap().grid, Grid::GaussianLatLon(_)));
    }

    #[test]
    fn parse_lambert_conformal() {
        let mut template = earth();
        template.extend_from_slice(&1799u32.to_be_bytes());
        template.extend_from_slice(&1059u32.to_be_bytes());
        template.extend_from_slice(&21_138_123u32.to_be_bytes());
        template.extend_from_slice(&237_280_472u32.to_be_bytes());
        template.push(56);
        template.extend_from_slice(&38_500_000u32.to_be_bytes());
        template.extend_from_slice(&262_500_000u32.to_be_bytes());
        template.extend_from_slice(&3_000_000u32.to_be_bytes());
        template.extend_from_slice(&3_000_000u32.to_be_bytes());
        template.push(0);
        template.push(0x40);
        template.extend_from_slice(&38_500_000u32.to_be_bytes());
        template.extend_from_slice(&38_500_000u32.to_be_bytes());
        template.extend_from_slice(&(0x8000_0000u32 | 90_000_000).to_be_bytes());
        template.extend_from_slice(&0u32.to_be_bytes());

        let definition = parse(&section3(30, &template, 1799 * 1059)).unwrap();
        assert_eq!(definition.scanning_mode(), 0x40);
        match definition.grid {
            Grid::LambertConformal(grid) => {
                assert_eq!((grid.n_x, grid.n_y), (1799, 1059));
                assert_eq!(grid.lo_v, 262_500_000);
                assert_eq!(grid.south_pole_lat, -90_000_000);
            }
            other => panic!("unexpected grid {:?}", other),
        }
    }

    #[test]
    fn unknown_grid_template() {
        let buf = section3(90, &[0; 4], 1);
        assert!(matches!(parse(&buf), Err(GribError::UnregisteredTemplate(_))));
    }

    #[test]
    fn short_template_is_truncated() {
        let buf = section3(0, &lat_lon_template()[..20], 6);
        assert!(matches!(parse(&buf), Err(GribError::Truncated { .. })));
    }

    #[test]
    fn optional_list_trails_template() {
        // One 2-octet entry per row (Nj = 2), as on a quasi-regular grid.
        let mut buf = section3(0, &lat_lon_template(), 6);
        buf[10] = 2;
        buf[11] = 1;
        buf.extend_from_slice(&[0, 3, 0, 3]);
        let length = buf.len() as u32;
        buf[..4].copy_from_slice(&length.to_be_bytes());

        let definition = parse(&buf).unwrap();
        assert_eq!(definition.optional_list_octets_per_number, 2);
        assert_eq!(definition.optional_num_list_interpretation, 1);
        match definition.grid {
            Grid::LatLon(grid) => {
                assert_eq!((grid.n_i, grid.n_j), (3, 2));
                assert_eq!(grid.scanning_mode, 0x40);
            }
            other => panic!("unexpected grid {:?}", other),
        }
    }

    #[test]
    fn octets_per_number_is_not_a_list_length() {
        // A per-entry width larger than the template area must not shorten the template.
        let mut buf = section3(0, &lat_lon_template(), 6);
        buf[10] = 255;
        buf[11] = 1;
        assert_eq!(parse(&buf).unwrap().optional_list_octets_per_number, 255);
    }

    #[test]
    fn scaled_value() {
        let radius = ScaledValue { scale: 1, value: 63_712_290 };
        assert!((radius.as_f64() - 6_371_229.0).abs() < 1e-6);
    }
}
