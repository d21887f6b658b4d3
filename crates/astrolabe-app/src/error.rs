//! Application error types.

use astrolabe_catalog::CatalogError;
use astrolabe_constellations::ConstellationError;

/// Errors that can stop the application from starting.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    #[error("star catalogue: {0}")]
    Catalog(#[from] CatalogError),

    #[error("sky culture: {0}")]
    Culture(#[from] ConstellationError),
}
