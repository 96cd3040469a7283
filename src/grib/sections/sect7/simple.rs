use num::ToPrimitive;

use crate::grib::sections::sect5::SimplePacking;
use crate::grib::sections::sect7::Grib2DataDecoder;
use crate::grib::utils::BitReader;
use crate::grib::Result;

pub(crate) struct SimplePackingDecoder<'a> {
    pub(crate) packing: &'a SimplePacking,
}

impl Grib2DataDecoder for SimplePackingDecoder<'_> {
    fn decode(&self, slice: &[u8], num_points: usize) -> Result<Box<[f64]>> {
        if self.packing.num_bits == 0 {
            let decoded = vec![f64::from(self.packing.reference_value); num_points];
            return Ok(decoded.into_boxed_slice());
        }

        let scale = Scale::new(self.packing);
        let width = self.packing.num_bits as usize;
        let mut reader = BitReader::new(slice);

        (0..num_points)
            .map(|_| reader.read(width).map(|packed| scale.apply(packed)))
            .collect()
    }
}

/// `Y = (R + X * 2^E) / 10^D`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scale {
    reference_value: f64,
    binary_scale: f64,
    decimal_scale: f64,
}

impl Scale {
    pub(crate) fn new(packing: &SimplePacking) -> Self {
        Self {
            reference_value: f64::from(packing.reference_value),
            binary_scale: 2_f64.powi(i32::from(packing.binary_scale_factor)),
            decimal_scale: 10_f64.powi(i32::from(packing.decimal_scale_factor)),
        }
    }

    pub(crate) fn apply<N: ToPrimitive>(&self, packed: N) -> f64 {
        match packed.to_f64() {
            Some(packed) => (self.reference_value + packed * self.binary_scale) / self.decimal_scale,
            None => f64::NAN,
        }
    }

    /// `None` is a missing point.
    pub(crate) fn apply_or_missing<N: ToPrimitive>(&self, packed: Option<N>) -> f64 {
        packed.map_or(f64::NAN, |packed| self.apply(packed))
    }
}
