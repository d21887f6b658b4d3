//! In-memory star catalog with stable handles and use counts.

use std::path::Path;

use glam::DVec3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use astrolabe_math::from_spherical;
use astrolabe_render::Observer;

use crate::{CatalogError, Resolve, StarCatalog, StarHandle};

/// J2000.0 epoch as a Modified Julian Date.
const J2000_MJD: f64 = 51544.5;
const DAYS_PER_YEAR: f64 = 365.25;
const MAS_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0 * 1000.0);

/// One catalog entry, J2000 astrometry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StarRecord {
    /// Hipparcos number.
    pub hip: u32,
    /// Right ascension in degrees.
    pub ra: f64,
    /// Declination in degrees.
    pub dec: f64,
    /// Visual magnitude.
    pub vmag: f64,
    /// Proper motion in right ascension (times cos dec), mas/yr.
    #[serde(default)]
    pub pm_ra: f64,
    /// Proper motion in declination, mas/yr.
    #[serde(default)]
    pub pm_dec: f64,
}

#[derive(Deserialize)]
struct CatalogFile {
    stars: Vec<StarRecord>,
}

#[derive(Debug)]
struct StarSlot {
    record: StarRecord,
    refs: u32,
}

/// Arena-backed catalog.
///
/// Records never move, so a [`StarHandle`] stays valid for the lifetime
/// of the arena; releasing only decrements the use count. Stars can be
/// marked as deferred to model data that is still streaming in.
#[derive(Debug, Default)]
pub struct StarArena {
    slots: Vec<StarSlot>,
    by_hip: FxHashMap<u32, StarHandle>,
    deferred: FxHashSet<u32>,
}

impl StarArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an arena from records.
    pub fn from_records(records: impl IntoIterator<Item = StarRecord>) -> Result<Self, CatalogError> {
        let mut arena = Self::new();
        for record in records {
            arena.insert(record)?;
        }
        Ok(arena)
    }

    /// Load a RON catalog of the form `(stars: [(hip: .., ra: .., ..), ..])`.
    pub fn from_ron_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = ron::from_str(contents).map_err(CatalogError::ParseError)?;
        Self::from_records(file.stars)
    }

    /// Load a RON catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(CatalogError::ReadError)?;
        let arena = Self::from_ron_str(&contents)?;
        log::info!("Loaded {} stars from {}", arena.len(), path.display());
        Ok(arena)
    }

    /// Add a record.
    pub fn insert(&mut self, record: StarRecord) -> Result<StarHandle, CatalogError> {
        if self.by_hip.contains_key(&record.hip) {
            return Err(CatalogError::DuplicateHip(record.hip));
        }
        let handle = StarHandle(self.slots.len() as u32);
        self.by_hip.insert(record.hip, handle);
        self.slots.push(StarSlot { record, refs: 0 });
        Ok(handle)
    }

    /// Report `hip` as pending until [`StarArena::complete`] is called.
    pub fn defer(&mut self, hip: u32) {
        self.deferred.insert(hip);
    }

    /// Finish loading a deferred star.
    pub fn complete(&mut self, hip: u32) {
        self.deferred.remove(&hip);
    }

    /// Finish loading every deferred star.
    pub fn complete_all(&mut self) {
        self.deferred.clear();
    }

    /// Live references to a star.
    pub fn refs(&self, star: StarHandle) -> u32 {
        self.slots.get(star.0 as usize).map_or(0, |s| s.refs)
    }

    /// Sum of live references over the whole arena.
    pub fn total_refs(&self) -> u64 {
        self.slots.iter().map(|s| u64::from(s.refs)).sum()
    }

    pub fn record(&self, star: StarHandle) -> Option<&StarRecord> {
        self.slots.get(star.0 as usize).map(|s| &s.record)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StarCatalog for StarArena {
    fn resolve(&mut self, hip: u32) -> Resolve {
        if self.deferred.contains(&hip) {
            return Resolve::Pending;
        }
        match self.by_hip.get(&hip) {
            Some(&handle) => {
                self.slots[handle.0 as usize].refs += 1;
                Resolve::Found(handle)
            }
            None => Resolve::NotFound,
        }
    }

    fn release(&mut self, star: StarHandle) {
        if let Some(slot) = self.slots.get_mut(star.0 as usize) {
            slot.refs = slot.refs.saturating_sub(1);
        }
    }

    fn position(&self, star: StarHandle, observer: &Observer) -> DVec3 {
        let Some(slot) = self.slots.get(star.0 as usize) else {
            return DVec3::ZERO;
        };
        let r = &slot.record;
        let years = (observer.tt() - J2000_MJD) / DAYS_PER_YEAR;
        let dec = r.dec.to_radians() + r.pm_dec * MAS_TO_RAD * years;
        let cos_dec = r.dec.to_radians().cos();
        let ra = if cos_dec.abs() > 1e-12 {
            r.ra.to_radians() + r.pm_ra * MAS_TO_RAD * years / cos_dec
        } else {
            r.ra.to_radians()
        };
        from_spherical(ra, dec)
    }

    fn vmag(&self, star: StarHandle) -> f64 {
        self.slots
            .get(star.0 as usize)
            .map_or(f64::INFINITY, |s| s.record.vmag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hip: u32, ra: f64, dec: f64) -> StarRecord {
        StarRecord {
            hip,
            ra,
            dec,
            vmag: 2.0,
            pm_ra: 0.0,
            pm_dec: 0.0,
        }
    }

    fn observer(tt: f64) -> Observer {
        Observer::looking_at(tt, DVec3::X, DVec3::Z)
    }

    #[test]
    fn test_resolve_found_counts_refs() {
        let mut arena = StarArena::from_records([record(1, 10.0, 5.0)]).unwrap();
        let Resolve::Found(h) = arena.resolve(1) else {
            panic!("star not found");
        };
        arena.resolve(1);
        assert_eq!(arena.refs(h), 2);
        arena.release(h);
        arena.release(h);
        arena.release(h);
        assert_eq!(arena.refs(h), 0);
    }

    #[test]
    fn test_unknown_star_not_found() {
        let mut arena = StarArena::new();
        assert_eq!(arena.resolve(42), Resolve::NotFound);
    }

    #[test]
    fn test_deferred_star_is_pending_without_side_effects() {
        let mut arena = StarArena::from_records([record(1, 10.0, 5.0)]).unwrap();
        arena.defer(1);
        assert_eq!(arena.resolve(1), Resolve::Pending);
        assert_eq!(arena.total_refs(), 0);
        arena.complete(1);
        assert!(matches!(arena.resolve(1), Resolve::Found(_)));
    }

    #[test]
    fn test_duplicate_hip_rejected() {
        let err = StarArena::from_records([record(1, 0.0, 0.0), record(1, 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateHip(1)));
    }

    #[test]
    fn test_position_at_j2000() {
        let mut arena = StarArena::from_records([record(7, 90.0, 0.0)]).unwrap();
        let Resolve::Found(h) = arena.resolve(7) else {
            panic!("star not found");
        };
        let p = arena.position(h, &observer(J2000_MJD));
        assert!((p - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_proper_motion_accumulates() {
        let mut fast = record(9, 0.0, 0.0);
        fast.pm_dec = 10_000.0; // 10 arcsec per year
        let mut arena = StarArena::from_records([fast]).unwrap();
        let Resolve::Found(h) = arena.resolve(9) else {
            panic!("star not found");
        };
        let p0 = arena.position(h, &observer(J2000_MJD));
        let p1 = arena.position(h, &observer(J2000_MJD + 100.0 * DAYS_PER_YEAR));
        let moved = p0.dot(p1).clamp(-1.0, 1.0).acos();
        let expected = (1000.0_f64 / 3600.0).to_radians();
        assert!((moved - expected).abs() < 1e-9);
    }

    #[test]
    fn test_load_from_ron_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stars.ron");
        std::fs::write(
            &path,
            "(stars: [(hip: 26727, ra: 85.19, dec: -1.94, vmag: 1.77), (hip: 27989, ra: 88.79, dec: 7.41, vmag: 0.45, pm_ra: 27.5, pm_dec: 11.3)])",
        )
        .unwrap();
        let arena = StarArena::load(&path).unwrap();
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        assert!(matches!(
            StarArena::from_ron_str("(stars: [(hip: )])"),
            Err(CatalogError::ParseError(_))
        ));
    }
}
