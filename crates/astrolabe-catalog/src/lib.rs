//! Star catalog access for sky modules.
//!
//! Stars are addressed by Hipparcos number and resolved into stable arena
//! handles. Resolution is asynchronous in spirit: a star whose data has not
//! arrived yet reports [`Resolve::Pending`] and the caller retries on a
//! later frame.

mod arena;
mod error;

pub use arena::{StarArena, StarRecord};
pub use error::CatalogError;

use glam::DVec3;

use astrolabe_render::Observer;

/// Handle to a star held by a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StarHandle(pub u32);

/// Outcome of a star lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolve {
    /// Data not loaded yet; ask again next frame.
    Pending,
    /// The star exists; the handle holds one reference.
    Found(StarHandle),
    /// No such star.
    NotFound,
}

/// Narrow interface to the star database.
pub trait StarCatalog {
    /// Look a star up by Hipparcos number. `Found` acquires a reference
    /// that must be given back with [`StarCatalog::release`]. `Pending`
    /// has no side effect.
    fn resolve(&mut self, hip: u32) -> Resolve;

    /// Give back a reference acquired by [`StarCatalog::resolve`].
    fn release(&mut self, star: StarHandle);

    /// Astrometric direction of the star for the observer (not normalized).
    fn position(&self, star: StarHandle, observer: &Observer) -> DVec3;

    /// Visual magnitude.
    fn vmag(&self, star: StarHandle) -> f64;
}
