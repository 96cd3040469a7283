//! Byte-level builders for synthetic GRIB2 messages.
#![allow(dead_code)]

pub fn section(number: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = ((body.len() + 5) as u32).to_be_bytes().to_vec();
    buf.push(number);
    buf.extend_from_slice(body);
    buf
}

pub fn identification() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&7u16.to_be_bytes()); // NCEP
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&[2, 1, 1]);
    body.extend_from_slice(&2021u16.to_be_bytes());
    body.extend_from_slice(&[12, 1, 6, 0, 0]);
    body.extend_from_slice(&[0, 1]);
    section(1, &body)
}

/// Template 3.0 over an `n_i` x `n_j` grid.
pub fn lat_lon_grid(n_i: u32, n_j: u32) -> Vec<u8> {
    let mut body = vec![0];
    body.extend_from_slice(&(n_i * n_j).to_be_bytes());
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&0u16.to_be_bytes());

    body.push(6);
    body.extend_from_slice(&[0; 15]);
    body.extend_from_slice(&n_i.to_be_bytes());
    body.extend_from_slice(&n_j.to_be_bytes());
    body.extend_from_slice(&[0; 8]);
    body.extend_from_slice(&90_000_000u32.to_be_bytes());
    body.extend_from_slice(&0u32.to_be_bytes());
    body.push(48);
    body.extend_from_slice(&(0x8000_0000u32 | 90_000_000).to_be_bytes());
    body.extend_from_slice(&359_000_000u32.to_be_bytes());
    body.extend_from_slice(&1_000_000u32.to_be_bytes());
    body.extend_from_slice(&1_000_000u32.to_be_bytes());
    body.push(0);
    section(3, &body)
}

/// Template 4.0: u-component of wind at 10 m, 6 hour forecast.
pub fn product() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&0u16.to_be_bytes());
    body.extend_from_slice(&[2, 2, 2, 0, 96, 0, 0, 0, 1]);
    body.extend_from_slice(&6u32.to_be_bytes());
    body.extend_from_slice(&[103, 0, 0, 0, 0, 10]);
    body.extend_from_slice(&[255, 0, 0, 0, 0, 0]);
    section(4, &body)
}

pub fn simple_template(reference_value: f32, e: i16, d: i16, num_bits: u8) -> Vec<u8> {
    let sign_magnitude = |v: i16| if v < 0 { 0x8000 | v.unsigned_abs() } else { v as u16 };
    let mut buf = reference_value.to_be_bytes().to_vec();
    buf.extend_from_slice(&sign_magnitude(e).to_be_bytes());
    buf.extend_from_slice(&sign_magnitude(d).to_be_bytes());
    buf.push(num_bits);
    buf.push(0);
    buf
}

/// Template 5.2 fields following the simple packing block, one octet per group field.
pub fn complex_template(num_bits: u8, missing_value: u8, num_groups: u32, last: u32) -> Vec<u8> {
    let mut buf = simple_template(0.0, 0, 0, num_bits);
    buf.extend_from_slice(&[1, missing_value]);
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.extend_from_slice(&num_groups.to_be_bytes());
    buf.extend_from_slice(&[0, 8]);
    buf.extend_from_slice(&0u32.to_be_bytes());
    buf.push(1);
    buf.extend_from_slice(&last.to_be_bytes());
    buf.push(8);
    buf
}

pub fn data_representation(num_points: u32, template_number: u16, template: &[u8]) -> Vec<u8> {
    let mut body = num_points.to_be_bytes().to_vec();
    body.extend_from_slice(&template_number.to_be_bytes());
    body.extend_from_slice(template);
    section(5, &body)
}

pub fn bitmap(indicator: u8) -> Vec<u8> {
    section(6, &[indicator])
}

pub fn data(payload: &[u8]) -> Vec<u8> {
    section(7, payload)
}

/// Wraps sections 1 to 7 between an indicator (discipline 0) and the end section.
pub fn message(sections: &[Vec<u8>]) -> Vec<u8> {
    let total = 16 + sections.iter().map(Vec::len).sum::<usize>() + 4;
    let mut buf = b"GRIB".to_vec();
    buf.extend_from_slice(&[0, 0, 0, 2]);
    buf.extend_from_slice(&(total as u64).to_be_bytes());
    for section in sections {
        buf.extend_from_slice(section);
    }
    buf.extend_from_slice(b"7777");
    buf
}

/// A complete message over a 2 x 2 grid with the given packing.
pub fn field(template_number: u16, template: &[u8], payload: &[u8]) -> Vec<u8> {
    message(&[
        identification(),
        lat_lon_grid(2, 2),
        product(),
        data_representation(4, template_number, template),
        bitmap(255),
        data(payload),
    ])
}

/// Packs `values` MSB first, `width` bits each, padded to whole octets.
pub fn pack_bits(values: &[u64], width: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; (values.len() * width + 7) / 8];
    let mut bit = 0;
    for value in values {
        for i in (0..width).rev() {
            if (value >> i) & 1 == 1 {
                bytes[bit / 8] |= 0x80 >> (bit % 8);
            }
            bit += 1;
        }
    }
    bytes
}
