//! End-to-end decode/encode cycles over in-memory JPEG containers.

use exif_edit::{decode, encode, MetadataRecord, Timestamp};

/// A minimal JPEG with no metadata block, generated in memory.
fn blank_jpeg() -> Vec<u8> {
    let pixels = image::RgbImage::new(16, 16);
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

#[test]
fn full_round_trip_over_empty_container() {
    let record = MetadataRecord {
        brand: Some("Acme".into()),
        model: Some("X100".into()),
        latitude: Some(48.8566),
        longitude: Some(2.3522),
        timestamp: Some(Timestamp::new("2024-01-01", "00:00:00")),
        gps_date: None,
    };

    let encoded = encode(&blank_jpeg(), &record).unwrap();
    assert!(encoded.warnings.is_empty());
    let decoded = decode(&encoded.bytes).unwrap();

    // Text fields survive exactly.
    assert_eq!(decoded.brand.as_deref(), Some("Acme"));
    assert_eq!(decoded.model.as_deref(), Some("X100"));
    assert_eq!(
        decoded.timestamp,
        Some(Timestamp::new("2024-01-01", "00:00:00"))
    );

    // Coordinates survive to within the documented 0.01 arc-second
    // truncation bound.
    let lat = decoded.latitude.unwrap();
    let lon = decoded.longitude.unwrap();
    assert!((lat - 48.8566).abs() < 1.5e-3, "latitude drifted: {lat}");
    assert!((lon - 2.3522).abs() < 1.5e-3, "longitude drifted: {lon}");

    // The GPS date stamp was derived from the timestamp and comes back as
    // the informational field.
    assert_eq!(decoded.gps_date.as_deref(), Some("2024-01-01"));
}

#[test]
fn edits_layer_over_previous_edits() {
    let first = MetadataRecord {
        brand: Some("Acme".into()),
        model: Some("X100".into()),
        ..MetadataRecord::default()
    };
    let container = encode(&blank_jpeg(), &first).unwrap().bytes;

    let second = MetadataRecord {
        model: Some("X200".into()),
        latitude: Some(52.52),
        longitude: Some(13.405),
        ..MetadataRecord::default()
    };
    let container = encode(&container, &second).unwrap().bytes;

    let decoded = decode(&container).unwrap();
    assert_eq!(decoded.brand.as_deref(), Some("Acme"));
    assert_eq!(decoded.model.as_deref(), Some("X200"));
    assert!((decoded.latitude.unwrap() - 52.52).abs() < 1.5e-3);
    assert!((decoded.longitude.unwrap() - 13.405).abs() < 1.5e-3);
}

#[test]
fn pixel_data_survives_repeated_encodes() {
    let container = blank_jpeg();
    let sos = container
        .windows(2)
        .position(|w| w == [0xFF, 0xDA])
        .expect("fixture should contain an SOS marker");
    let image_data = container[sos..].to_vec();

    let mut bytes = container;
    for day in 1..=3 {
        let record = MetadataRecord {
            timestamp: Some(Timestamp::new(format!("2024-01-0{day}"), "12:00:00")),
            ..MetadataRecord::default()
        };
        bytes = encode(&bytes, &record).unwrap().bytes;
    }

    assert!(bytes.ends_with(&image_data));
    let decoded = decode(&bytes).unwrap();
    assert_eq!(
        decoded.timestamp,
        Some(Timestamp::new("2024-01-03", "12:00:00"))
    );
}

#[test]
fn colon_dated_block_normalizes_on_decode() {
    // Cameras write `YYYY:MM:DD HH:MM:SS`; the editor sees hyphens.
    let record = MetadataRecord {
        timestamp: Some(Timestamp::new("2023:07:04", "10:15:30")),
        ..MetadataRecord::default()
    };
    let encoded = encode(&blank_jpeg(), &record).unwrap();

    let decoded = decode(&encoded.bytes).unwrap();
    assert_eq!(
        decoded.timestamp,
        Some(Timestamp::new("2023-07-04", "10:15:30"))
    );
}
