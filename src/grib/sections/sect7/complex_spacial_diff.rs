use crate::grib::sections::sect5::ComplexSpatialDiffPacking;
use crate::grib::sections::sect7::complex::unpack_groups;
use crate::grib::sections::sect7::simple::Scale;
use crate::grib::sections::sect7::Grib2DataDecoder;
use crate::grib::utils::{from_sign_magnitude, BitReader};
use crate::grib::{GribError, Result};

pub(crate) struct ComplexPackingSpatialDiffDecoder<'a> {
    pub(crate) packing: &'a ComplexSpatialDiffPacking,
}

impl Grib2DataDecoder for ComplexPackingSpatialDiffDecoder<'_> {
    fn decode(&self, slice: &[u8], num_points: usize) -> Result<Box<[f64]>> {
        let order = match self.packing.spatial_difference_order {
            order @ (1 | 2) => order as usize,
            n => return Err(GribError::UnsupportedPacking(format!("spatial differencing order {}", n))),
        };
        let octets = self.packing.extra_descriptor_octets as usize;
        if !(1..=8).contains(&octets) {
            return Err(GribError::UnsupportedPacking(format!("{} octets per extra descriptor", octets)));
        }

        // Extra descriptors: the first `order` original values, then the overall minimum.
        let width = octets * 8;
        let mut reader = BitReader::new(slice);
        let mut first_values = [0i64; 2];
        for value in first_values.iter_mut().take(order) {
            *value = from_sign_magnitude(reader.read(width)?, width);
        }
        let minimum = from_sign_magnitude(reader.read(width)?, width);
        trace!("Spatial differencing order {} : {:?} min {}", order, &first_values[..order], minimum);

        let packed = unpack_groups(&mut reader, &self.packing.complex, num_points)?;

        let scale = Scale::new(&self.packing.complex.simple);
        Ok(SpatialDiffDecodeIterator::new(packed.into_iter(), order, first_values, minimum)
            .map(|v| scale.apply_or_missing(v))
            .collect())
    }
}

/// Reverses first or second order differencing over the non-missing values, in point
/// order. Missing points pass through without advancing the recurrence.
struct SpatialDiffDecodeIterator<I> {
    iter: I,
    order: usize,
    first_values: [i64; 2],
    minimum: i64,
    count: usize,
    prev1: i64,
    prev2: i64,
}

impl<I> SpatialDiffDecodeIterator<I> {
    fn new(iter: I, order: usize, first_values: [i64; 2], minimum: i64) -> Self {
        Self {
            iter,
            order,
            first_values,
            minimum,
            count: 0,
            prev1: 0,
            prev2: 0,
        }
    }
}

impl<I: Iterator<Item = Option<i64>>> Iterator for SpatialDiffDecodeIterator<I> {
    type Item = Option<i64>;

    fn next(&mut self) -> Option<Option<i64>> {
        let v = match self.iter.next()? {
            Some(v) => v,
            None => return Some(None),
        };

        let count = self.count;
        self.count += 1;

        let v = if count < self.order {
            self.first_values[count]
        } else if self.order == 1 {
            v.wrapping_add(self.minimum).wrapping_add(self.prev1)
        } else {
            v.wrapping_add(self.minimum)
                .wrapping_add(self.prev1.wrapping_mul(2))
                .wrapping_sub(self.prev2)
        };

        (self.prev2, self.prev1) = (self.prev1, v);
        Some(Some(v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
