use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use img_parts::jpeg::{Jpeg, JpegSegment};
use img_parts::{Bytes, ImageEXIF};
use std::fmt;
use std::io::Cursor;

use crate::error::{MetadataError, Result};
use crate::record::MetadataRecord;
use crate::transcode::{self, RationalCoordinate};

/// Result of re-encoding a container.
///
/// `warnings` is the non-fatal diagnostics channel: anomalies the encode
/// recovered from by skipping a derived field. The host decides how to
/// present them; the codec never prints.
#[derive(Debug)]
pub struct EncodeResult {
    /// The full container with the new EXIF block spliced in. Every
    /// non-metadata byte of the input is preserved exactly.
    pub bytes: Vec<u8>,
    pub warnings: Vec<Diagnostic>,
}

/// A recoverable anomaly observed during encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The timestamp text had no date portion to derive the GPS date stamp
    /// from; that one tag was skipped and everything else was written.
    GpsDateUnavailable { timestamp: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::GpsDateUnavailable { timestamp } => write!(
                f,
                "timestamp {timestamp:?} has no date portion; GPS date stamp not written"
            ),
        }
    }
}

/// The set of tags one encode call will write, resolved from a record.
///
/// Absent record fields stay out of the plan entirely: they neither clear
/// pre-existing tags nor fabricate empty ones.
struct WritePlan {
    brand: Option<String>,
    model: Option<String>,
    coordinates: Option<(RationalCoordinate, RationalCoordinate)>,
    timestamp_text: Option<String>,
    gps_date: Option<String>,
}

impl WritePlan {
    fn from_record(record: &MetadataRecord, warnings: &mut Vec<Diagnostic>) -> Self {
        // Sign is stripped before the DMS conversion; the on-disk triples
        // are unsigned magnitudes.
        let coordinates = record.coordinates().map(|(lat, lon)| {
            (
                transcode::rational_from_degrees(lat.abs()),
                transcode::rational_from_degrees(lon.abs()),
            )
        });

        let timestamp_text = record.timestamp.as_ref().map(transcode::format_timestamp);

        // The GPS date stamp is the date half of the timestamp. When that
        // cannot be isolated the stamp is skipped with a warning instead of
        // aborting the whole encode.
        let gps_date = match timestamp_text.as_deref() {
            Some(text) => match text.split_whitespace().next() {
                Some(date) => Some(date.to_string()),
                None => {
                    warnings.push(Diagnostic::GpsDateUnavailable {
                        timestamp: text.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        Self {
            brand: non_empty(record.brand.as_deref()),
            model: non_empty(record.model.as_deref()),
            coordinates,
            timestamp_text,
            gps_date,
        }
    }

    /// Whether this plan supersedes an existing on-disk tag.
    fn replaces(&self, tag: Tag) -> bool {
        match tag {
            Tag::Make => self.brand.is_some(),
            Tag::Model => self.model.is_some(),
            Tag::GPSLatitude | Tag::GPSLongitude => self.coordinates.is_some(),
            Tag::DateTime | Tag::DateTimeOriginal | Tag::DateTimeDigitized => {
                self.timestamp_text.is_some()
            }
            Tag::GPSDateStamp => self.gps_date.is_some(),
            _ => false,
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();

        // Image-level tags.
        if let Some(ref brand) = self.brand {
            fields.push(ascii_field(Tag::Make, brand));
        }
        if let Some(ref model) = self.model {
            fields.push(ascii_field(Tag::Model, model));
        }
        if let Some(ref text) = self.timestamp_text {
            fields.push(ascii_field(Tag::DateTime, text));
            // Capture-level mirrors: a write-side fan-out of the single
            // editable timestamp, never independently editable state.
            fields.push(ascii_field(Tag::DateTimeOriginal, text));
            fields.push(ascii_field(Tag::DateTimeDigitized, text));
        }

        // GPS-level tags.
        if let Some((lat, lon)) = self.coordinates {
            fields.push(rational_field(Tag::GPSLatitude, lat));
            fields.push(rational_field(Tag::GPSLongitude, lon));
        }
        if let Some(ref date) = self.gps_date {
            fields.push(ascii_field(Tag::GPSDateStamp, date));
        }

        fields
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_owned)
}

fn ascii_field(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

fn rational_field(tag: Tag, dms: RationalCoordinate) -> Field {
    let rational = |(num, denom): (u32, u32)| Rational { num, denom };
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            rational(dms.degrees),
            rational(dms.minutes),
            rational(dms.seconds),
        ]),
    }
}

/// Re-encodes a container with the fields of `record` written into its EXIF
/// block.
///
/// Tags the record does not address are carried over from the existing
/// block unchanged; absent record fields never clear pre-existing tags and
/// never fabricate empty ones. The new block replaces the old APP1 segment
/// wholesale while every other container byte is preserved exactly.
///
/// All-or-nothing: if the tag set cannot be serialized, no output bytes are
/// produced and the original container is untouched.
pub fn encode(container: &[u8], record: &MetadataRecord) -> Result<EncodeResult> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(container.to_vec()))
        .map_err(|e| MetadataError::Format(format!("not a parseable JPEG container: {e}")))?;

    let original_position = exif_segment_position(&jpeg);
    let original_block = jpeg.exif();

    let mut warnings = Vec::new();
    let plan = WritePlan::from_record(record, &mut warnings);

    let mut fields = carried_over_fields(original_block.as_deref(), &plan);
    let carried = fields.len();
    fields.extend(plan.fields());
    if fields.is_empty() {
        // Nothing on disk worth keeping and nothing addressed: never
        // fabricate a block.
        log::debug!("no tags to write; container returned unchanged");
        return Ok(EncodeResult {
            bytes: container.to_vec(),
            warnings,
        });
    }
    log::debug!("serializing {} tags ({carried} carried over)", fields.len());

    let block = serialize_block(&fields)?;
    jpeg.set_exif(Some(Bytes::from(block)));
    restore_segment_position(&mut jpeg, original_position);

    Ok(EncodeResult {
        bytes: jpeg.encoder().bytes().to_vec(),
        warnings,
    })
}

/// Fields of the existing block that the plan does not supersede.
///
/// Only primary-image fields are carried; the codec does not preserve
/// thumbnail-IFD data beyond what the container itself keeps outside the
/// EXIF block.
fn carried_over_fields(block: Option<&[u8]>, plan: &WritePlan) -> Vec<Field> {
    let Some(block) = block else {
        return Vec::new();
    };
    let parsed = match exif::Reader::new().read_raw(block.to_vec()) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("existing EXIF block unreadable ({e}); starting from an empty tag set");
            return Vec::new();
        }
    };
    parsed
        .fields()
        .filter(|field| field.ifd_num == In::PRIMARY && !plan.replaces(field.tag))
        .map(|field| Field {
            tag: field.tag,
            ifd_num: field.ifd_num,
            value: field.value.clone(),
        })
        .collect()
}

/// Serializes the tag set into a raw EXIF block (big-endian TIFF).
fn serialize_block(fields: &[Field]) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buffer = Cursor::new(Vec::new());
    writer
        .write(&mut buffer, false)
        .map_err(|e| MetadataError::Encoding(e.to_string()))?;
    Ok(buffer.into_inner())
}

const EXIF_IDENTIFIER: &[u8] = b"Exif\0\0";
const APP1_MARKER: u8 = 0xE1;

fn exif_segment_position(jpeg: &Jpeg) -> Option<usize> {
    jpeg.segments()
        .iter()
        .position(|s| s.marker() == APP1_MARKER && s.contents().starts_with(EXIF_IDENTIFIER))
}

/// `set_exif` inserts the APP1 segment at a fixed index, which can land
/// after other APP segments (e.g. XMP) that many parsers expect EXIF to
/// precede. Move it back to where the original block lived, or right after
/// APP0 when the container had none.
fn restore_segment_position(jpeg: &mut Jpeg, original_position: Option<usize>) {
    let Some(current) = exif_segment_position(jpeg) else {
        return;
    };
    let target = original_position.unwrap_or(1).min(current);
    if target < current {
        let segments: &mut Vec<JpegSegment> = jpeg.segments_mut();
        let segment = segments.remove(current);
        segments.insert(target, segment);
    }
}
