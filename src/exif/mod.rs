//! EXIF block decoding and re-encoding for JPEG containers.
//!
//! This module provides the two codec entry points:
//!
//! - [`decode`] — Parse a container's embedded EXIF block into a [`MetadataRecord`](crate::MetadataRecord)
//! - [`encode`] — Write an edited record back, replacing only the EXIF block
//!
//! Both operate on in-memory byte buffers; reading and persisting container
//! files is the host's job.

mod reader;
mod writer;

pub use reader::decode;
pub use writer::{encode, Diagnostic, EncodeResult};
