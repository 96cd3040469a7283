//! Static GRIB2 code tables used by the lookup pass.
//!
//! Only the codes a reader is likely to meet with the supported templates are listed;
//! anything else looks up to `None`.

#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    pub id: &'static str,
    entries: &'static [(u16, &'static str)],
}

impl CodeTable {
    const fn new(id: &'static str, entries: &'static [(u16, &'static str)]) -> Self {
        Self { id, entries }
    }

    pub fn lookup(&self, code: u16) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub static CODE_TABLE_0_0: CodeTable = CodeTable::new("0.0", &[
    (0, "Meteorological products"),
    (1, "Hydrological products"),
    (2, "Land surface products"),
    (3, "Satellite remote sensing products"),
    (4, "Space weather products"),
    (10, "Oceanographic products"),
    (255, "Missing"),
]);

pub static CODE_TABLE_1_2: CodeTable = CodeTable::new("1.2", &[
    (0, "Analysis"),
    (1, "Start of forecast"),
    (2, "Verifying time of forecast"),
    (3, "Observation time"),
    (4, "Local time"),
    (255, "Missing"),
]);

pub static CODE_TABLE_1_3: CodeTable = CodeTable::new("1.3", &[
    (0, "Operational products"),
    (1, "Operational test products"),
    (2, "Research products"),
    (3, "Re-analysis products"),
    (4, "THORPEX Interactive Grand Global Ensemble (TIGGE)"),
    (5, "THORPEX Interactive Grand Global Ensemble (TIGGE) test"),
    (6, "S2S operational products"),
    (7, "S2S test products"),
    (255, "Missing"),
]);

pub static CODE_TABLE_1_4: CodeTable = CodeTable::new("1.4", &[
    (0, "Analysis products"),
    (1, "Forecast products"),
    (2, "Analysis and forecast products"),
    (3, "Control forecast products"),
    (4, "Perturbed forecast products"),
    (5, "Control and perturbed forecast products"),
    (6, "Processed satellite observations"),
    (7, "Processed radar observations"),
    (8, "Event probability"),
    (255, "Missing"),
]);

pub static CODE_TABLE_3_1: CodeTable = CodeTable::new("3.1", &[
    (0, "Latitude/longitude"),
    (1, "Rotated latitude/longitude"),
    (10, "Mercator"),
    (20, "Polar stereographic projection"),
    (30, "Lambert conformal"),
    (40, "Gaussian latitude/longitude"),
    (90, "Space view perspective or orthographic"),
    (65535, "Missing"),
]);

pub static CODE_TABLE_3_2: CodeTable = CodeTable::new("3.2", &[
    (0, "Earth assumed spherical with radius = 6,367,470.0 m"),
    (1, "Earth assumed spherical with radius specified (in m) by data producer"),
    (2, "Earth assumed oblate spheroid with size as determined by IAU in 1965"),
    (3, "Earth assumed oblate spheroid with major and minor axes specified (in km) by data producer"),
    (4, "Earth assumed oblate spheroid as defined in IAG-GRS80 model"),
    (5, "Earth assumed represented by WGS84 (as used by ICAO since 1998)"),
    (6, "Earth assumed spherical with radius of 6,371,229.0 m"),
    (7, "Earth assumed oblate spheroid with major and minor axes specified (in m) by data producer"),
    (8, "Earth model assumed spherical with radius 6,371,200 m, horizontal datum WGS84"),
    (9, "Earth represented by the OSGB 1936 Datum"),
    (255, "Missing"),
]);

pub static CODE_TABLE_4_0: CodeTable = CodeTable::new("4.0", &[
    (0, "Analysis or forecast at a horizontal level or in a horizontal layer at a point in time"),
    (1, "Individual ensemble forecast, control and perturbed, at a horizontal level or in a horizontal layer at a point in time"),
    (2, "Derived forecasts based on all ensemble members at a horizontal level or in a horizontal layer at a point in time"),
    (8, "Average, accumulation, extreme values or other statistically processed values at a horizontal level or in a horizontal layer in a continuous or non-continuous time interval"),
    (65535, "Missing"),
]);

/// Parameter categories of discipline 0 (meteorological products).
pub static CODE_TABLE_4_1_0: CodeTable = CodeTable::new("4.1.0", &[
    (0, "Temperature"),
    (1, "Moisture"),
    (2, "Momentum"),
    (3, "Mass"),
    (4, "Short-wave radiation"),
    (5, "Long-wave radiation"),
    (6, "Cloud"),
    (7, "Thermodynamic stability indices"),
    (19, "Physical atmospheric properties"),
    (255, "Missing"),
]);

pub static CODE_TABLE_4_2_0_0: CodeTable = CodeTable::new("4.2.0.0", &[
    (0, "Temperature"),
    (1, "Virtual temperature"),
    (2, "Potential temperature"),
    (4, "Maximum temperature"),
    (5, "Minimum temperature"),
    (6, "Dew point temperature"),
]);

pub static CODE_TABLE_4_2_0_1: CodeTable = CodeTable::new("4.2.0.1", &[
    (0, "Specific humidity"),
    (1, "Relative humidity"),
    (3, "Precipitable water"),
    (7, "Precipitation rate"),
    (8, "Total precipitation"),
]);

pub static CODE_TABLE_4_2_0_2: CodeTable = CodeTable::new("4.2.0.2", &[
    (0, "Wind direction (from which blowing)"),
    (1, "Wind speed"),
    (2, "u-component of wind"),
    (3, "v-component of wind"),
    (8, "Vertical velocity (pressure)"),
    (22, "Wind speed (gust)"),
]);

pub static CODE_TABLE_4_2_0_3: CodeTable = CodeTable::new("4.2.0.3", &[
    (0, "Pressure"),
    (1, "Pressure reduced to MSL"),
    (5, "Geopotential height"),
]);

pub static CODE_TABLE_4_3: CodeTable = CodeTable::new("4.3", &[
    (0, "Analysis"),
    (1, "Initialization"),
    (2, "Forecast"),
    (3, "Bias corrected forecast"),
    (4, "Ensemble forecast"),
    (5, "Probability forecast"),
    (6, "Forecast error"),
    (7, "Analysis error"),
    (8, "Observation"),
    (255, "Missing"),
]);

pub static CODE_TABLE_4_4: CodeTable = CodeTable::new("4.4", &[
    (0, "Minute"),
    (1, "Hour"),
    (2, "Day"),
    (3, "Month"),
    (4, "Year"),
    (5, "Decade (10 years)"),
    (6, "Normal (30 years)"),
    (7, "Century (100 years)"),
    (10, "3 hours"),
    (11, "6 hours"),
    (12, "12 hours"),
    (13, "Second"),
    (255, "Missing"),
]);

pub static CODE_TABLE_4_5: CodeTable = CodeTable::new("4.5", &[
    (1, "Ground or water surface"),
    (2, "Cloud base level"),
    (3, "Level of cloud tops"),
    (4, "Level of 0 °C isotherm"),
    (6, "Maximum wind level"),
    (7, "Tropopause"),
    (8, "Nominal top of the atmosphere"),
    (100, "Isobaric surface"),
    (101, "Mean sea level"),
    (102, "Specific altitude above mean sea level"),
    (103, "Specified height level above ground"),
    (104, "Sigma level"),
    (105, "Hybrid level"),
    (106, "Depth below land surface"),
    (108, "Level at specified pressure difference from ground to level"),
    (200, "Entire atmosphere (considered as a single layer)"),
    (255, "Missing"),
]);

pub static CODE_TABLE_4_6: CodeTable = CodeTable::new("4.6", &[
    (0, "Unperturbed high-resolution control forecast"),
    (1, "Unperturbed low-resolution control forecast"),
    (2, "Negatively perturbed forecast"),
    (3, "Positively perturbed forecast"),
    (4, "Multi-model forecast"),
    (255, "Missing"),
]);

pub static CODE_TABLE_5_0: CodeTable = CodeTable::new("5.0", &[
    (0, "Grid point data - simple packing"),
    (1, "Matrix value at grid point - simple packing"),
    (2, "Grid point data - complex packing"),
    (3, "Grid point data - complex packing and spatial differencing"),
    (4, "Grid point data - IEEE floating point data"),
    (40, "Grid point data - JPEG 2000 code stream format"),
    (41, "Grid point data - Portable Network Graphics (PNG)"),
    (42, "Grid point data - CCSDS recommended lossless compression"),
    (50, "Spectral data - simple packing"),
    (51, "Spherical harmonics data - complex packing"),
    (61, "Grid point data - simple packing with logarithm pre-processing"),
    (200, "Run length packing with level values"),
    (65535, "Missing"),
]);

pub static CODE_TABLE_5_1: CodeTable = CodeTable::new("5.1", &[
    (0, "Floating point"),
    (1, "Integer"),
    (255, "Missing"),
]);

pub static CODE_TABLE_5_4: CodeTable = CodeTable::new("5.4", &[
    (0, "Row by row splitting"),
    (1, "General group splitting"),
    (255, "Missing"),
]);

pub static CODE_TABLE_5_5: CodeTable = CodeTable::new("5.5", &[
    (0, "No explicit missing values included within the data values"),
    (1, "Primary missing values included within the data values"),
    (2, "Primary and secondary missing values included within the data values"),
    (255, "Missing"),
]);

pub static CODE_TABLE_5_6: CodeTable = CodeTable::new("5.6", &[
    (1, "First-order spatial differencing"),
    (2, "Second-order spatial differencing"),
    (255, "Missing"),
]);

pub static CODE_TABLE_6_0: CodeTable = CodeTable::new("6.0", &[
    (0, "A bit map applies to this product and is specified in this section"),
    (254, "A bit map previously defined in the same GRIB message applies to this product"),
    (255, "A bit map does not apply to this product"),
]);

/// Code Table 4.2 depends on discipline and parameter category.
pub fn parameter_table(discipline: u8, category: u8) -> Option<&'static CodeTable> {
    match (discipline, category) {
        (0, 0) => Some(&CODE_TABLE_4_2_0_0),
        (0, 1) => Some(&CODE_TABLE_4_2_0_1),
        (0, 2) => Some(&CODE_TABLE_4_2_0_2),
        (0, 3) => Some(&CODE_TABLE_4_2_0_3),
        _ => None,
    }
}

/// Code Table 4.1 depends on discipline.
pub fn category_table(discipline: u8) -> Option<&'static CodeTable> {
    match discipline {
        0 => Some(&CODE_TABLE_4_1_0),
        _ => None,
    }
}
