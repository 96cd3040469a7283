mod common;

use std::io::Cursor;

use chrono::{TimeZone, Utc};

use grib2_sections::grib::sections::sect3::Grid;
use grib2_sections::grib::sections::sect5::Packing;
use grib2_sections::grib::{self, GribError};

use common::*;

#[test]
fn simple_packing_end_to_end() {
    let bytes = field(0, &simple_template(1.0, 0, 0, 8), &[10, 20, 30, 40]);
    let grib = grib::from_bytes(&bytes).unwrap();
    assert_eq!(grib.messages.len(), 1);
    let message = &grib.messages[0];

    let indicator = message.indicator.as_ref().unwrap();
    assert_eq!(indicator.discipline, 0);
    assert_eq!(indicator.total_length, bytes.len() as u64);

    let identification = message.identification.as_ref().unwrap();
    assert_eq!(identification.centre_id, 7);
    assert_eq!(identification.ref_time, Utc.with_ymd_and_hms(2021, 12, 1, 6, 0, 0).unwrap());

    let grid = message.grid_definition.as_ref().unwrap();
    assert_eq!(grid.num_points, 4);
    match &grid.grid {
        Grid::LatLon(lat_lon) => {
            assert_eq!(lat_lon.la1, 90_000_000);
            assert_eq!(lat_lon.la2, -90_000_000);
        }
        other => panic!("unexpected grid {:?}", other),
    }

    assert!(message.local_use.is_none());
    assert!(message.end.is_some());
    assert_eq!(&message.decode().unwrap()[..], &[11.0, 21.0, 31.0, 41.0]);
}

#[test]
fn scaled_simple_packing() {
    // (R + X * 2^-1) / 10^1
    let bytes = field(0, &simple_template(10.0, -1, 1, 4), &pack_bits(&[0, 2, 4, 15], 4));
    let values = grib::from_bytes(&bytes).unwrap().messages[0].decode().unwrap();
    let expected = [1.0, 1.1, 1.2, 1.75];
    for (value, expected) in values.iter().zip(expected) {
        assert!((value - expected).abs() < 1e-12, "{} != {}", value, expected);
    }
}

#[test]
fn constant_field() {
    let bytes = field(0, &simple_template(273.15, 3, 2, 0), &[]);
    let values = grib::from_bytes(&bytes).unwrap().messages[0].decode().unwrap();
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(|v| *v == f64::from(273.15f32)));
}

#[test]
fn complex_packing_end_to_end() {
    let complex = |payload: &[u8]| {
        message(&[
            identification(),
            lat_lon_grid(5, 1),
            product(),
            data_representation(5, 2, &complex_template(8, 0, 2, 3)),
            bitmap(255),
            data(payload),
        ])
    };

    let bytes = complex(&[10, 20, 2, 0, 2, 0, 0b0111_0000]);
    let values = grib::from_bytes(&bytes).unwrap().messages[0].decode().unwrap();
    assert_eq!(&values[..], &[11.0, 13.0, 20.0, 20.0, 20.0]);

    // Group descriptors only: the packed values are missing from the bitstream.
    let bytes = complex(&[10, 20, 2, 0, 2, 0]);
    let err = grib::from_bytes(&bytes).unwrap().messages[0].decode().unwrap_err();
    assert!(matches!(err, GribError::BitstreamExhausted { .. }));
}

#[test]
fn oversized_group_lengths_are_an_error() {
    let mut template = complex_template(8, 0, 2, 1);
    let n = template.len();
    template[n - 6] = 255; // length increment
    template[n - 1] = 64; // bits per scaled length
    let mut payload = vec![0, 0, 0, 0];
    payload.extend_from_slice(&[0xff; 16]);
    let bytes = message(&[
        lat_lon_grid(2, 1),
        data_representation(2, 2, &template),
        bitmap(255),
        data(&payload),
    ]);

    let message = &grib::from_bytes(&bytes).unwrap().messages[0];
    assert!(matches!(message.decode(), Err(GribError::ParseError(_))));
}

#[test]
fn spatial_differencing_end_to_end() {
    let mut template = complex_template(8, 0, 1, 4);
    template.extend_from_slice(&[1, 2]);
    let bytes = field(3, &template, &[0x00, 0x05, 0x80, 0x01, 0, 2, 4, 0b0010_0111]);

    let message = &grib::from_bytes(&bytes).unwrap().messages[0];
    match &message.data_representation.as_ref().unwrap().packing {
        Packing::ComplexSpatialDiff(packing) => assert_eq!(packing.spatial_difference_order, 1),
        other => panic!("unexpected packing {:?}", other),
    }
    assert_eq!(&message.decode().unwrap()[..], &[5.0, 6.0, 6.0, 8.0]);
}

#[test]
fn lookup_keeps_raw_fields() {
    let mut template = complex_template(8, 1, 1, 4);
    template.extend_from_slice(&[2, 2]);
    let bytes = field(3, &template, &[0; 16]);
    let message = &grib::from_bytes(&bytes).unwrap().messages[0];
    let before = message.clone();

    let looked_up = message.lookup();
    assert_eq!(looked_up.raw, &before);

    let labels = looked_up.labels;
    assert_eq!(labels.grid_definition.unwrap().template_number, Some("Latitude/longitude"));
    let product = labels.product_definition.unwrap().product;
    assert_eq!(product.parameter_number, Some("u-component of wind"));
    let packing = labels.data_representation.unwrap().packing;
    assert_eq!(packing.spatial_difference_order, Some(Some("Second-order spatial differencing")));
    assert_eq!(
        packing.missing_value,
        Some(Some("Primary missing values included within the data values"))
    );
    assert_eq!(labels.identification.unwrap().data_type, Some("Forecast products"));
    assert_eq!(
        labels.data.unwrap().packing,
        Some("Grid point data - complex packing and spatial differencing")
    );
}

#[test]
fn embedded_bitmap_is_rejected() {
    let bytes = message(&[
        lat_lon_grid(2, 2),
        data_representation(4, 0, &simple_template(0.0, 0, 0, 8)),
        section(6, &[0, 0b1111_0000]),
        data(&[1, 2, 3, 4]),
    ]);
    let err = grib::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, GribError::UnsupportedBitMap(0)));
}

#[test]
fn unknown_section_number() {
    let bytes = message(&[identification(), section(9, &[1, 2, 3])]);
    assert!(matches!(grib::from_bytes(&bytes), Err(GribError::UnknownSection(9))));
}

#[test]
fn unregistered_packing_template() {
    let bytes = field(40, &simple_template(0.0, 0, 0, 8), &[]);
    match grib::from_bytes(&bytes) {
        Err(GribError::UnregisteredTemplate(key)) => assert_eq!(key.to_string(), "5.40"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn point_count_must_match_grid() {
    let bytes = message(&[
        lat_lon_grid(3, 2),
        data_representation(4, 0, &simple_template(0.0, 0, 0, 8)),
        bitmap(255),
        data(&[1, 2, 3, 4]),
    ]);
    let message = &grib::from_bytes(&bytes).unwrap().messages[0];
    assert!(matches!(
        message.decode(),
        Err(GribError::PointCountMismatch { declared: 6, found: 4 })
    ));
}

#[test]
fn sections_may_be_absent() {
    let bytes = message(&[data_representation(4, 0, &simple_template(0.0, 0, 0, 8)), data(&[0; 4])]);
    let message = &grib::from_bytes(&bytes).unwrap().messages[0];
    assert!(message.identification.is_none());
    assert!(message.grid_definition.is_none());
    assert!(matches!(message.decode(), Err(GribError::MissingSection(3))));
}

#[test]
fn reads_consecutive_messages() {
    let mut bytes = field(0, &simple_template(1.0, 0, 0, 8), &[10, 20, 30, 40]);
    bytes.extend(field(0, &simple_template(2.0, 0, 0, 0), &[]));

    let grib = grib::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(grib.messages.len(), 2);
    assert_eq!(&grib.messages[1].decode().unwrap()[..], &[2.0; 4]);
}
