use crate::grib::sections::sect5::{GroupDefinition, SimplePacking};
use crate::grib::utils::BitReader;
use crate::grib::{GribError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Group {
    pub(crate) reference: u64,
    pub(crate) width: usize,
    pub(crate) length: usize,
}

/// Reads the group references, widths and lengths, each list padded to an octet
/// boundary. Leaves `reader` at the first packed value.
pub(crate) fn decode(
    reader: &mut BitReader,
    simple: &SimplePacking,
    group_definition: &GroupDefinition,
    num_points: usize,
) -> Result<Vec<Group>> {
    let num_groups = group_definition.num_groups as usize;
    if num_groups > num_points {
        return Err(GribError::ParseError(format!(
            "{} groups for {} data points",
            num_groups, num_points
        )));
    }

    let references = read_list(reader, num_groups, simple.num_bits as usize)?;

    let widths = read_list(reader, num_groups, group_definition.group_widths_num_bits as usize)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.checked_add(u64::from(group_definition.group_widths_reference))
                .and_then(|width| usize::try_from(width).ok())
                .ok_or_else(|| GribError::ParseError(format!("Width of group {} overflows.", i)))
        })
        .collect::<Result<Vec<usize>>>()?;

    let lengths = read_list(reader, num_groups, group_definition.group_scaled_lengths_num_bits as usize)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            if i + 1 == num_groups {
                return Ok(group_definition.group_lengths_last as usize);
            }
            u64::from(group_definition.group_lengths_increment)
                .checked_mul(v)
                .and_then(|scaled| scaled.checked_add(u64::from(group_definition.group_lengths_reference)))
                .and_then(|length| usize::try_from(length).ok())
                .ok_or_else(|| GribError::ParseError(format!("Length of group {} overflows.", i)))
        })
        .collect::<Result<Vec<usize>>>()?;

    let groups: Vec<Group> = references
        .into_iter()
        .zip(widths)
        .zip(lengths)
        .map(|((reference, width), length)| Group { reference, width, length })
        .collect();

    let total = groups
        .iter()
        .try_fold(0usize, |total, group| total.checked_add(group.length))
        .ok_or_else(|| GribError::ParseError("Total length of groups overflows.".to_string()))?;
    if total != num_points {
        return Err(GribError::PointCountMismatch { declared: num_points, found: total });
    }

    trace!("{} groups, packed values start at octet {}", groups.len(), reader.byte_position());

    Ok(groups)
}

fn read_list(reader: &mut BitReader, len: usize, width: usize) -> Result<Vec<u64>> {
    let list = (0..len).map(|_| reader.read(width)).collect::<Result<Vec<u64>>>()?;
    reader.align_to_byte();
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(num_bits: u8) -> SimplePacking {
        SimplePacking {
            reference_value: 0.0,
            binary_scale_factor: 0,
            decimal_scale_factor: 0,
            num_bits,
            values_type: 0,
        }
    }

    fn definition(num_groups: u32, last: u32) -> GroupDefinition {
        GroupDefinition {
            num_groups,
            group_widths_reference: 1,
            group_widths_num_bits: 4,
            group_lengths_reference: 2,
            group_lengths_increment: 3,
            group_lengths_last: last,
            group_scaled_lengths_num_bits: 4,
        }
    }

    #[test]
    fn lists_are_octet_aligned() {
        // references (6 bits): 5, 63, 0 -> 000101 111111 000000 + pad
        // widths (4 bits): 0, 2, 7 -> 0000 0010 0111 + pad
        // scaled lengths (4 bits): 1, 0, 15 -> 0001 0000 1111 + pad
        let bytes = [
            0b0001_0111, 0b1111_0000, 0b0000_0000,
            0b0000_0010, 0b0111_0000,
            0b0001_0000, 0b1111_0000,
            0xaa,
        ];
        let mut reader = BitReader::new(&bytes);
        let groups = decode(&mut reader, &simple(6), &definition(3, 4), 11).unwrap();

        assert_eq!(
            groups,
            vec![
                Group { reference: 5, width: 1, length: 5 },
                Group { reference: 63, width: 3, length: 2 },
                Group { reference: 0, width: 8, length: 4 },
            ]
        );
        assert_eq!(reader.byte_position(), 7);
        assert_eq!(reader.read(8).unwrap(), 0xaa);
    }

    #[test]
    fn lengths_must_cover_every_point() {
        let bytes = [0u8; 7];
        let mut reader = BitReader::new(&bytes);
        let err = decode(&mut reader, &simple(6), &definition(3, 4), 12).unwrap_err();
        assert!(matches!(err, GribError::PointCountMismatch { declared: 12, found: 8 }));
    }

    #[test]
    fn scaled_lengths_that_overflow() {
        let mut definition = definition(2, 1);
        definition.group_lengths_increment = 255;
        definition.group_scaled_lengths_num_bits = 64;
        // references (6 bits), widths (4 bits), then two 64-bit scaled lengths of all ones
        let mut bytes = vec![0u8, 0, 0];
        bytes.extend_from_slice(&[0xff; 16]);
        let mut reader = BitReader::new(&bytes);
        assert!(matches!(
            decode(&mut reader, &simple(6), &definition, 4),
            Err(GribError::ParseError(_))
        ));
    }

    #[test]
    fn total_length_that_overflows() {
        // Two groups of u64::MAX points each fit individually but not together.
        let mut definition = definition(3, 0);
        definition.group_lengths_reference = 0;
        definition.group_lengths_increment = 1;
        definition.group_scaled_lengths_num_bits = 64;
        let mut bytes = vec![0u8; 5];
        bytes.extend_from_slice(&[0xff; 16]);
        bytes.extend_from_slice(&[0; 8]);
        let mut reader = BitReader::new(&bytes);
        assert!(matches!(
            decode(&mut reader, &simple(6), &definition, 3),
            Err(GribError::ParseError(_))
        ));
    }

    #[test]
    fn more_groups_than_points() {
        let mut reader = BitReader::new(&[]);
        assert!(matches!(
            decode(&mut reader, &simple(0), &definition(5, 1), 4),
            Err(GribError::ParseError(_))
        ));
    }
}
