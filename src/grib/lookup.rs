//! Code-table lookup pass.
//!
//! Runs over an already parsed [`Message`] and produces labels alongside it. The raw
//! message is only borrowed, so no numeric field can change.

use serde::Serialize;

use crate::grib::sections::sect3::Grid;
use crate::grib::sections::sect4::{Product, Surface};
use crate::grib::sections::sect5::Packing;
use crate::grib::tables::{self, CodeTable};
use crate::grib::Message;

pub type Label = Option<&'static str>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookedUpMessage<'a> {
    pub raw: &'a Message,
    pub labels: MessageLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLabels {
    pub indicator: Option<IndicatorLabels>,
    pub identification: Option<IdentificationLabels>,
    pub grid_definition: Option<GridDefinitionLabels>,
    pub product_definition: Option<ProductDefinitionLabels>,
    pub data_representation: Option<DataRepresentationLabels>,
    pub bitmap: Option<BitMapLabels>,
    pub data: Option<DataLabels>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorLabels {
    pub discipline: Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationLabels {
    pub ref_time_significance: Label,
    pub prod_status: Label,
    pub data_type: Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDefinitionLabels {
    pub template_number: Label,
    pub grid: GridLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLabels {
    pub earth_shape: Label,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinitionLabels {
    pub template_number: Label,
    pub product: ProductLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLabels {
    pub parameter_category: Label,
    pub parameter_number: Label,
    pub process_type: Label,
    pub time_unit: Label,
    pub first_surface: Label,
    pub second_surface: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble_type: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRepresentationLabels {
    pub template_number: Label,
    pub packing: PackingLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingLabels {
    pub values_type: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_method: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_value: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_difference_order: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitMapLabels {
    pub bitmap_indicator: Label,
}

/// Section 7 carries no template number of its own; it is packed per section 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabels {
    pub packing: Label,
}

fn label(table: &CodeTable, code: impl Into<u16>) -> Label {
    table.lookup(code.into())
}

impl Grid {
    pub fn translate(&self) -> GridLabels {
        let earth = match self {
            Grid::LatLon(grid) | Grid::GaussianLatLon(grid) => &grid.earth,
            Grid::LambertConformal(grid) => &grid.earth,
        };

        GridLabels {
            earth_shape: label(&tables::CODE_TABLE_3_2, earth.earth_shape),
        }
    }
}

impl Product {
    /// Parameter tables depend on the discipline of section 0, when known.
    pub fn translate(&self, discipline: Option<u8>) -> ProductLabels {
        let product = self.horizontal();
        let surface = |surface: &Surface| label(&tables::CODE_TABLE_4_5, surface.surface_type);

        ProductLabels {
            parameter_category: discipline
                .and_then(tables::category_table)
                .and_then(|table| label(table, product.parameter_category)),
            parameter_number: discipline
                .and_then(|discipline| tables::parameter_table(discipline, product.parameter_category))
                .and_then(|table| label(table, product.parameter_number)),
            process_type: label(&tables::CODE_TABLE_4_3, product.process_type),
            time_unit: label(&tables::CODE_TABLE_4_4, product.time_unit),
            first_surface: surface(&product.first_surface),
            second_surface: surface(&product.second_surface),
            ensemble_type: match self {
                Product::EnsembleForecast(ensemble) => Some(label(&tables::CODE_TABLE_4_6, ensemble.ensemble_type)),
                Product::AnalysisOrForecast(_) => None,
            },
        }
    }
}

impl Packing {
    pub fn translate(&self) -> PackingLabels {
        let (complex, spatial_difference_order) = match self {
            Packing::Simple(_) => (None, None),
            Packing::Complex(complex) => (Some(complex), None),
            Packing::ComplexSpatialDiff(spatial) => (
                Some(&spatial.complex),
                Some(label(&tables::CODE_TABLE_5_6, spatial.spatial_difference_order)),
            ),
        };

        PackingLabels {
            values_type: label(&tables::CODE_TABLE_5_1, self.simple().values_type),
            group_method: complex.map(|complex| label(&tables::CODE_TABLE_5_4, complex.group_method)),
            missing_value: complex.map(|complex| label(&tables::CODE_TABLE_5_5, complex.missing_value)),
            spatial_difference_order,
        }
    }
}

pub fn lookup(message: &Message) -> LookedUpMessage<'_> {
    let discipline = message.indicator.as_ref().map(|indicator| indicator.discipline);

    let labels = MessageLabels {
        indicator: message.indicator.as_ref().map(|indicator| IndicatorLabels {
            discipline: label(&tables::CODE_TABLE_0_0, indicator.discipline),
        }),
        identification: message.identification.as_ref().map(|identification| IdentificationLabels {
            ref_time_significance: label(&tables::CODE_TABLE_1_2, identification.ref_time_significance),
            prod_status: label(&tables::CODE_TABLE_1_3, identification.prod_status),
            data_type: label(&tables::CODE_TABLE_1_4, identification.data_type),
        }),
        grid_definition: message.grid_definition.as_ref().map(|definition| GridDefinitionLabels {
            template_number: label(&tables::CODE_TABLE_3_1, definition.template_number),
            grid: definition.grid.translate(),
        }),
        product_definition: message.product_definition.as_ref().map(|definition| ProductDefinitionLabels {
            template_number: label(&tables::CODE_TABLE_4_0, definition.template_number),
            product: definition.product.translate(discipline),
        }),
        data_representation: message.data_representation.as_ref().map(|representation| {
            DataRepresentationLabels {
                template_number: label(&tables::CODE_TABLE_5_0, representation.template_number),
                packing: representation.packing.translate(),
            }
        }),
        bitmap: message.bitmap.as_ref().map(|bitmap| BitMapLabels {
            bitmap_indicator: label(&tables::CODE_TABLE_6_0, bitmap.bitmap_indicator),
        }),
        data: message.data.as_ref().map(|_| DataLabels {
            packing: message
                .data_representation
                .as_ref()
                .and_then(|representation| label(&tables::CODE_TABLE_5_0, representation.template_number)),
        }),
    };

    LookedUpMessage { raw: message, labels }
}
