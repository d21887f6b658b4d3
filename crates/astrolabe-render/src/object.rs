//! Identity of scene objects shared between modules.

use std::fmt;

use glam::DVec3;

/// Stable identity of a scene object.
///
/// Keys are plain values: holding one never keeps the object alive, so a
/// key behaves like a weak reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(pub u64);

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

/// Queryable object properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoKind {
    /// Direction of the object (ICRF, at infinity).
    Position,
    /// Angular radius in radians.
    Radius,
}

/// Answer to an [`InfoKind`] query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InfoValue {
    Position(DVec3),
    Radius(f64),
}
