use exif::{Exif, In, Tag, Value};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::str;

use crate::error::{MetadataError, Result};
use crate::record::MetadataRecord;
use crate::transcode::{self, RationalCoordinate};

/// Typed view over a parsed EXIF block, grouped the way the tags live on
/// disk: image-level (IFD0), capture-level (Exif IFD), and GPS-level.
///
/// Each accessor returns an explicit absent value instead of leaning on
/// loose key/value lookups. Text accessors treat a tag that is present but
/// empty as absent.
pub(crate) struct TagGroups {
    block: Exif,
}

impl TagGroups {
    /// Parses a raw EXIF block (TIFF structure, as stored in the APP1
    /// segment). A block that cannot be parsed is a format error.
    pub(crate) fn parse(block: &[u8]) -> Result<Self> {
        let block = exif::Reader::new().read_raw(block.to_vec())?;
        Ok(Self { block })
    }

    // Image-level tags.

    fn make(&self) -> Result<Option<String>> {
        self.text(Tag::Make)
    }

    fn model(&self) -> Result<Option<String>> {
        self.text(Tag::Model)
    }

    /// The primary timestamp text: the image-level `DateTime` tag, or the
    /// capture-level `DateTimeOriginal` when a camera wrote only that.
    fn timestamp_text(&self) -> Result<Option<String>> {
        if let Some(text) = self.text(Tag::DateTime)? {
            return Ok(Some(text));
        }
        self.text(Tag::DateTimeOriginal)
    }

    // GPS-level tags.

    fn latitude_triple(&self) -> Option<RationalCoordinate> {
        self.rational_triple(Tag::GPSLatitude)
    }

    fn longitude_triple(&self) -> Option<RationalCoordinate> {
        self.rational_triple(Tag::GPSLongitude)
    }

    fn gps_date(&self) -> Result<Option<String>> {
        self.text(Tag::GPSDateStamp)
    }

    fn text(&self, tag: Tag) -> Result<Option<String>> {
        let Some(field) = self.block.get_field(tag, In::PRIMARY) else {
            return Ok(None);
        };
        let Value::Ascii(ref parts) = field.value else {
            log::debug!("tag {tag} holds a non-text value; treating as absent");
            return Ok(None);
        };
        let Some(bytes) = parts.first() else {
            return Ok(None);
        };
        let text = str::from_utf8(bytes)
            .map_err(|_| MetadataError::Format(format!("tag {tag} is not valid UTF-8")))?;
        let text = text.trim_end_matches('\0').trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }

    fn rational_triple(&self, tag: Tag) -> Option<RationalCoordinate> {
        let field = self.block.get_field(tag, In::PRIMARY)?;
        match field.value {
            Value::Rational(ref parts) if parts.len() >= 3 => Some(RationalCoordinate {
                degrees: (parts[0].num, parts[0].denom),
                minutes: (parts[1].num, parts[1].denom),
                seconds: (parts[2].num, parts[2].denom),
            }),
            _ => {
                log::debug!("tag {tag} is not a DMS rational triple; treating as absent");
                None
            }
        }
    }
}

/// Decodes the EXIF block embedded in a JPEG container into a fresh
/// [`MetadataRecord`].
///
/// The container bytes are never mutated; this is a pure read. A container
/// with no EXIF block decodes to an all-absent record. A block that exists
/// but cannot be parsed is a [`MetadataError::Format`] — the caller decides
/// whether to treat the image as having no recoverable metadata.
pub fn decode(container: &[u8]) -> Result<MetadataRecord> {
    let jpeg = Jpeg::from_bytes(Bytes::from(container.to_vec()))
        .map_err(|e| MetadataError::Format(format!("not a parseable JPEG container: {e}")))?;

    let Some(block) = jpeg.exif() else {
        log::debug!("container carries no EXIF block; all tag groups empty");
        return Ok(MetadataRecord::default());
    };

    let groups = TagGroups::parse(&block)?;

    let mut record = MetadataRecord {
        brand: groups.make()?,
        model: groups.model()?,
        ..MetadataRecord::default()
    };

    let latitude = transcode::degrees_from_rational(groups.latitude_triple())?;
    let longitude = transcode::degrees_from_rational(groups.longitude_triple())?;
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            record.latitude = Some(lat);
            record.longitude = Some(lon);
        }
        (None, None) => {}
        // Half a pair is a malformed block; the coordinate decodes as absent.
        _ => log::debug!("only one GPS coordinate present; treating the pair as absent"),
    }

    if let Some(text) = groups.timestamp_text()? {
        record.timestamp = Some(transcode::parse_timestamp(&text)?);
    }

    // Informational only: shown to the editor, never merged into the
    // timestamp, and re-derived from it on encode.
    record.gps_date = groups.gps_date()?;

    Ok(record)
}
