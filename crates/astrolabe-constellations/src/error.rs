//! Constellation error types.

/// Errors raised while loading or preparing constellations.
#[derive(Debug, thiserror::Error)]
pub enum ConstellationError {
    /// Every line star failed to resolve; no direction can be derived.
    #[error("could not load constellation {0}: no line star found")]
    NoStars(String),

    /// Neither lines nor a usable illustration.
    #[error("invalid constellation {0}: no lines and no illustration")]
    Empty(String),

    /// Failed to read a sky culture file.
    #[error("failed to read sky culture: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse sky culture: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}
