use serde::{Deserialize, Serialize};

/// The decoded, editable view of one image's metadata.
///
/// Every field is optional; an absent field means the tag was missing from
/// the container (or present with empty text, which is treated the same).
/// A record is built fresh on every [`decode`](crate::decode) call and holds
/// no reference to the container it came from.
///
/// `latitude` and `longitude` form an atomic pair: decode either fills both
/// or leaves both absent, and [`encode`](crate::encode) only writes
/// coordinates when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Camera/device manufacturer (EXIF `Make`).
    pub brand: Option<String>,
    /// Camera/device model (EXIF `Model`).
    pub model: Option<String>,
    /// Decimal degrees, range [-90, 90].
    pub latitude: Option<f64>,
    /// Decimal degrees, range [-180, 180].
    pub longitude: Option<f64>,
    /// Primary capture timestamp. On encode this single field fans out to
    /// the image-level `DateTime` tag, both capture-level mirrors
    /// (`DateTimeOriginal`, `DateTimeDigitized`), and the GPS date stamp.
    pub timestamp: Option<Timestamp>,
    /// GPS date stamp text as found on disk. Informational: populated by
    /// decode for display, never consulted by encode (the GPS date is
    /// always re-derived from `timestamp`).
    pub gps_date: Option<String>,
}

impl MetadataRecord {
    /// Returns the coordinate pair when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A capture timestamp split into independently editable date and time
/// strings, e.g. `"2023-07-04"` and `"10:15:30"`.
///
/// Produced by [`transcode::parse_timestamp`](crate::transcode::parse_timestamp)
/// and joined back by
/// [`transcode::format_timestamp`](crate::transcode::format_timestamp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
}

impl Timestamp {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}
