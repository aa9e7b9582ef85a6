//! # exif-edit
//!
//! EXIF metadata codec for JPEG containers — decode the embedded metadata
//! block into an editable record, convert GPS coordinates and timestamps
//! between their human-editable and on-disk encodings, and re-encode an
//! edited record while leaving every other byte of the image untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exif_edit::{decode, encode, Timestamp};
//!
//! fn main() -> Result<(), exif_edit::MetadataError> {
//!     let container = std::fs::read("photo.jpg").expect("read image");
//!
//!     // 1. Decode the embedded EXIF block into an editable record
//!     let mut record = decode(&container)?;
//!     println!("Camera: {:?} {:?}", record.brand, record.model);
//!
//!     // 2. Edit fields
//!     record.brand = Some("Acme".into());
//!     record.latitude = Some(48.8566);
//!     record.longitude = Some(2.3522);
//!     record.timestamp = Some(Timestamp::new("2024-01-01", "00:00:00"));
//!
//!     // 3. Re-encode: only the EXIF block changes, pixel data is untouched
//!     let encoded = encode(&container, &record)?;
//!     for warning in &encoded.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!     std::fs::write("photo.jpg", &encoded.bytes).expect("write image");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## What gets written
//!
//! [`encode`] only ever touches the tags the record addresses:
//!
//! | Record field | On-disk tags |
//! |--------------|--------------|
//! | `brand` | `Make` (image-level) |
//! | `model` | `Model` (image-level) |
//! | `latitude`/`longitude` | `GPSLatitude`/`GPSLongitude` DMS rational triples |
//! | `timestamp` | `DateTime`, plus `DateTimeOriginal`/`DateTimeDigitized` mirrors and the `GPSDateStamp` date portion |
//!
//! Absent record fields neither clear pre-existing tags nor fabricate empty
//! ones. Coordinates are stored as unsigned degree/minute/second rationals
//! with seconds truncated to two decimal digits (~0.3 m); see
//! [`transcode`] for the exact conversion rules.
//!
//! ## Errors and diagnostics
//!
//! Structural problems surface as [`MetadataError::Format`], serialization
//! failures as [`MetadataError::Encoding`] (all-or-nothing — no partial
//! output). Recoverable anomalies during encode are reported through
//! [`EncodeResult::warnings`] rather than logged or printed.
//!
//! ## Modules
//!
//! - [`exif`] — container-level decode/encode
//! - [`transcode`] — coordinate and timestamp conversions, usable on their own
//! - [`record`] — the editable metadata model

pub mod error;
pub mod exif;
pub mod record;
pub mod transcode;

pub use crate::error::MetadataError;
pub use crate::exif::{decode, encode, Diagnostic, EncodeResult};
pub use crate::record::{MetadataRecord, Timestamp};
