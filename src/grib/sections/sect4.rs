use chrono::Duration;
use serde::Serialize;

use crate::grib::sections::SectionHeader;
use crate::grib::templates::ProductTemplate;
use crate::grib::utils::{Buffer, GribInt};
use crate::grib::{GribError, Result};
use crate::read_as;

const TEMPLATE_OFFSET: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinition {
    #[serde(flatten)]
    pub header: SectionHeader,
    /// Number of coordinate values after Template
    pub num_coordinates: u16,
    /// Product Definition Template Number (see Code Table 4.0)
    pub template_number: u16,
    pub product: Product,
}

pub(crate) fn parse(buf: &[u8]) -> Result<ProductDefinition> {
    let header = SectionHeader::read(buf)?;

    let num_coordinates = read_as!(u16, buf, 5)?;
    let template_number = read_as!(u16, buf, 7)?;

    // Optional coordinate values (4 octets each) trail the template.
    let template_end = buf.len().checked_sub(4 * num_coordinates as usize)
        .filter(|end| *end >= TEMPLATE_OFFSET)
        .ok_or(GribError::Truncated {
            needed: TEMPLATE_OFFSET + 4 * num_coordinates as usize,
            available: buf.len(),
        })?;

    let template = ProductTemplate::resolve(template_number)?;
    debug!("Product definition template 4.{}", template_number);
    let product = Product::from_template(template, &buf[TEMPLATE_OFFSET..template_end])?;

    Ok(ProductDefinition {
        header,
        num_coordinates,
        template_number,
        product,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "template")]
pub enum Product {
    AnalysisOrForecast(HorizontalProduct),
    EnsembleForecast(EnsembleProduct),
}

impl Product {
    pub(crate) fn from_template(template: ProductTemplate, buf: &[u8]) -> Result<Self> {
        let mut buf = Buffer::new(buf);

        match template {
            ProductTemplate::AnalysisOrForecast => {
                Ok(Product::AnalysisOrForecast(HorizontalProduct::read(&mut buf)?))
            }
            ProductTemplate::EnsembleForecast => Ok(Product::EnsembleForecast(EnsembleProduct {
                product: HorizontalProduct::read(&mut buf)?,
                ensemble_type: buf.read()?,
                perturbation_number: buf.read()?,
                num_forecasts: buf.read()?,
            })),
        }
    }

    pub fn horizontal(&self) -> &HorizontalProduct {
        match self {
            Product::AnalysisOrForecast(product) => product,
            Product::EnsembleForecast(ensemble) => &ensemble.product,
        }
    }
}

/// Product Definition Template 4.0: analysis or forecast at a horizontal level or in a
/// horizontal layer at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalProduct {
    /// Parameter category (see Code Table 4.1)
    pub parameter_category: u8,
    /// Parameter number (see Code Table 4.2)
    pub parameter_number: u8,
    /// Type of generating process (see Code Table 4.3)
    pub process_type: u8,
    pub background_process: u8,
    pub analysis_process: u8,
    pub hours: u16,
    pub minutes: u8,
    /// Indicator of unit of time range (see Code Table 4.4)
    pub time_unit: u8,
    /// Forecast time in units defined by `time_unit`
    pub forecast_time: u32,
    pub first_surface: Surface,
    pub second_surface: Surface,
}

impl HorizontalProduct {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            parameter_category: buf.read()?,
            parameter_number: buf.read()?,
            process_type: buf.read()?,
            background_process: buf.read()?,
            analysis_process: buf.read()?,
            hours: buf.read()?,
            minutes: buf.read()?,
            time_unit: buf.read()?,
            forecast_time: buf.read()?,
            first_surface: Surface::read(buf)?,
            second_surface: Surface::read(buf)?,
        })
    }

    pub fn forecast_duration(&self) -> Result<Duration> {
        let value = i64::from(self.forecast_time);
        Ok(match self.time_unit {
            0 => Duration::minutes(value),
            1 => Duration::hours(value),
            2 => Duration::days(value),
            3 => Duration::days(30 * value),
            4 => Duration::days(365 * value),
            5 => Duration::days(10 * 365 * value),
            6 => Duration::days(30 * 365 * value),
            7 => Duration::days(100 * 365 * value),
            10 => Duration::hours(3 * value),
            11 => Duration::hours(6 * value),
            12 => Duration::hours(12 * value),
            13 => Duration::seconds(value),
            n => {
                return Err(GribError::ParseError(format!("Forecast Time Unit `{}` does not exist.", n)))
            }
        })
    }
}

/// Product Definition Template 4.1: individual ensemble forecast
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleProduct {
    #[serde(flatten)]
    pub product: HorizontalProduct,
    /// Type of ensemble forecast (see Code Table 4.6)
    pub ensemble_type: u8,
    pub perturbation_number: u8,
    pub num_forecasts: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    /// Type of fixed surface (see Code Table 4.5)
    pub surface_type: u8,
    pub scale_factor: i8,
    pub scaled_value: u32,
}

impl Surface {
    fn read(buf: &mut Buffer) -> Result<Self> {
        Ok(Self {
            surface_type: buf.read()?,
            scale_factor: buf.read::<u8>()?.as_grib_int(),
            scaled_value: buf.read()?,
        })
    }
}
