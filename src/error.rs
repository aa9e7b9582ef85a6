use thiserror::Error;

/// Errors surfaced by the codec.
///
/// The two variants map to the two failure modes callers must tell apart:
/// a block that cannot be *read* ([`MetadataError::Format`]) and a record
/// that cannot be *written* ([`MetadataError::Encoding`]).
///
/// A `Format` error from [`decode`](crate::decode) means the image carries a
/// metadata block that is structurally invalid; callers may treat the image
/// as having no usable metadata and proceed with an all-absent
/// [`MetadataRecord`](crate::MetadataRecord).
///
/// An `Encoding` error from [`encode`](crate::encode) is all-or-nothing: no
/// partial container bytes are ever produced.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("malformed metadata block: {0}")]
    Format(String),

    #[error("metadata serialization failed: {0}")]
    Encoding(String),
}

impl From<exif::Error> for MetadataError {
    fn from(err: exif::Error) -> Self {
        MetadataError::Format(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
