//! Catalog error types.

/// Errors raised while building a star catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("failed to read star catalog: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse star catalog: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Two records share a Hipparcos number.
    #[error("duplicate star HIP {0}")]
    DuplicateHip(u32),
}
