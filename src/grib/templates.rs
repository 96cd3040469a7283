//! Registry of the templates this crate knows how to decode.
//!
//! Each templated section has its own closed set of variants. A `(section, template)`
//! pair that is not listed here resolves to [`GribError::UnregisteredTemplate`], which
//! means "not implemented", never "corrupt input".

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::grib::{GribError, Result};

/// Key of a template, displayed as `"<section>.<template>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateKey {
    pub section: u8,
    pub number: u16,
}

impl TemplateKey {
    pub const fn new(section: u8, number: u16) -> Self {
        Self { section, number }
    }
}

impl Display for TemplateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.number)
    }
}

/// Grid definition templates (section 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTemplate {
    /// 3.0
    LatLon,
    /// 3.30
    LambertConformal,
    /// 3.40
    GaussianLatLon,
}

impl GridTemplate {
    pub fn resolve(number: u16) -> Result<Self> {
        match number {
            0 => Ok(Self::LatLon),
            30 => Ok(Self::LambertConformal),
            40 => Ok(Self::GaussianLatLon),
            n => Err(GribError::UnregisteredTemplate(TemplateKey::new(3, n))),
        }
    }

    pub const fn number(self) -> u16 {
        match self {
            Self::LatLon => 0,
            Self::LambertConformal => 30,
            Self::GaussianLatLon => 40,
        }
    }
}

/// Product definition templates (section 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductTemplate {
    /// 4.0
    AnalysisOrForecast,
    /// 4.1
    EnsembleForecast,
}

impl ProductTemplate {
    pub fn resolve(number: u16) -> Result<Self> {
        match number {
            0 => Ok(Self::AnalysisOrForecast),
            1 => Ok(Self::EnsembleForecast),
            n => Err(GribError::UnregisteredTemplate(TemplateKey::new(4, n))),
        }
    }

    pub const fn number(self) -> u16 {
        match self {
            Self::AnalysisOrForecast => 0,
            Self::EnsembleForecast => 1,
        }
    }
}

/// Data representation templates (section 5). The matching section 7 layout is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataRepresentationTemplate {
    /// 5.0
    SimplePacking,
    /// 5.2
    ComplexPacking,
    /// 5.3
    ComplexPackingSpatialDiff,
}

impl DataRepresentationTemplate {
    pub fn resolve(number: u16) -> Result<Self> {
        match number {
            0 => Ok(Self::SimplePacking),
            2 => Ok(Self::ComplexPacking),
            3 => Ok(Self::ComplexPackingSpatialDiff),
            n => Err(GribError::UnregisteredTemplate(TemplateKey::new(5, n))),
        }
    }

    pub const fn number(self) -> u16 {
        match self {
            Self::SimplePacking => 0,
            Self::ComplexPacking => 2,
            Self::ComplexPackingSpatialDiff => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Grid(GridTemplate),
    Product(ProductTemplate),
    DataRepresentation(DataRepresentationTemplate),
}

impl Template {
    pub const REGISTERED: [Template; 8] = [
        Template::Grid(GridTemplate::LatLon),
        Template::Grid(GridTemplate::LambertConformal),
        Template::Grid(GridTemplate::GaussianLatLon),
        Template::Product(ProductTemplate::AnalysisOrForecast),
        Template::Product(ProductTemplate::EnsembleForecast),
        Template::DataRepresentation(DataRepresentationTemplate::SimplePacking),
        Template::DataRepresentation(DataRepresentationTemplate::ComplexPacking),
        Template::DataRepresentation(DataRepresentationTemplate::ComplexPackingSpatialDiff),
    ];

    pub fn resolve(key: TemplateKey) -> Result<Self> {
        match key.section {
            3 => GridTemplate::resolve(key.number).map(Template::Grid),
            4 => ProductTemplate::resolve(key.number).map(Template::Product),
            5 => DataRepresentationTemplate::resolve(key.number).map(Template::DataRepresentation),
            _ => Err(GribError::UnregisteredTemplate(key)),
        }
    }

    pub const fn key(self) -> TemplateKey {
        match self {
            Template::Grid(t) => TemplateKey::new(3, t.number()),
            Template::Product(t) => TemplateKey::new(4, t.number()),
            Template::DataRepresentation(t) => TemplateKey::new(5, t.number()),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Template::Grid(GridTemplate::LatLon) => "Latitude/longitude",
            Template::Grid(GridTemplate::LambertConformal) => "Lambert conformal",
            Template::Grid(GridTemplate::GaussianLatLon) => "Gaussian latitude/longitude",
            Template::Product(ProductTemplate::AnalysisOrForecast) => {
                "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time"
            }
            Template::Product(ProductTemplate::EnsembleForecast) => {
                "Individual ensemble forecast, control and perturbed, at a horizontal level or in a horizontal layer at a point in time"
            }
            Template::DataRepresentation(DataRepresentationTemplate::SimplePacking) => {
                "Grid point data - simple packing"
            }
            Template::DataRepresentation(DataRepresentationTemplate::ComplexPacking) => {
                "Grid point data - complex packing"
            }
            Template::DataRepresentation(DataRepresentationTemplate::ComplexPackingSpatialDiff) => {
                "Grid point data - complex packing and spatial differencing"
            }
        }
    }
}
