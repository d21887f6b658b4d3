//! Reverse lookup of the constellation at a sky direction.

use glam::{DVec2, DVec3};

use astrolabe_math::Cap;
use astrolabe_render::{Frame, Painter};

/// Finds the IAU constellation containing a direction.
pub trait ConstellationLocator {
    /// IAU abbreviation of the constellation at the ICRF direction `dir`.
    fn find(&self, dir: DVec3) -> Option<String>;
}

/// Locator approximating each constellation area by a cap.
///
/// Among the caps containing the direction, the one whose centre is
/// nearest wins.
#[derive(Clone, Debug, Default)]
pub struct NearestCapLocator {
    regions: Vec<(String, Cap)>,
}

impl NearestCapLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, iau: impl Into<String>, cap: Cap) {
        self.regions.push((iau.into(), cap));
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl ConstellationLocator for NearestCapLocator {
    fn find(&self, dir: DVec3) -> Option<String> {
        let dir = dir.normalize_or_zero();
        self.regions
            .iter()
            .filter(|(_, cap)| cap.contains_point(dir))
            .max_by(|(_, a), (_, b)| a.center.dot(dir).total_cmp(&b.center.dot(dir)))
            .map(|(iau, _)| iau.clone())
    }
}

/// Spacing in window units of the probe points around the screen centre.
const PROBE_SPACING: f64 = 10.0;

/// Constellations under the screen centre, recomputed when the observer
/// changes.
#[derive(Clone, Debug, Default)]
pub struct PointedCache {
    hash: Option<u64>,
    codes: [Option<String>; 4],
}

impl PointedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached lookup.
    pub fn invalidate(&mut self) {
        self.hash = None;
    }

    /// Whether the constellation `iau` lies at the centre of the screen.
    pub fn is_pointed(
        &mut self,
        iau: &str,
        painter: &dyn Painter,
        locator: &dyn ConstellationLocator,
    ) -> bool {
        self.refresh(painter, locator);
        if iau.is_empty() {
            return false;
        }
        self.codes.iter().flatten().any(|code| {
            same_code(iau, code)
                || (iau == "Car" && (same_code(code, "Pup") || same_code(code, "Vel")))
                || (iau == "Oph" && same_code(code, "Ser"))
        })
    }

    fn refresh(&mut self, painter: &dyn Painter, locator: &dyn ConstellationLocator) {
        let hash = painter.observer().hash();
        if self.hash == Some(hash) {
            return;
        }
        self.hash = Some(hash);
        let viewport = painter.viewport();
        let center = viewport.window_size / 2.0 + DVec2::new(0.0, viewport.y_offset);
        for (i, code) in self.codes.iter_mut().enumerate() {
            let offset = DVec2::new((i % 2) as f64 - 0.5, (i / 2) as f64 - 0.5) * PROBE_SPACING;
            let dir = painter.unproject(Frame::Icrf, center + offset);
            *code = locator.find(dir);
        }
        tracing::debug!("Pointed constellations: {:?}", self.codes);
    }
}

/// Case-insensitive comparison of the first three characters.
fn same_code(a: &str, b: &str) -> bool {
    a.chars()
        .take(3)
        .map(|c| c.to_ascii_lowercase())
        .eq(b.chars().take(3).map(|c| c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrolabe_render::{Observer, SkyPainter, Viewport};
    use std::cell::Cell;

    fn painter_looking_at(dir: DVec3) -> SkyPainter {
        let obs = Observer::looking_at(51544.5, dir, DVec3::Z);
        SkyPainter::new(obs, Viewport::new(800.0, 600.0, 1.0, 60f64.to_radians()))
    }

    struct Counting<'a> {
        inner: &'a NearestCapLocator,
        calls: Cell<usize>,
    }

    impl ConstellationLocator for Counting<'_> {
        fn find(&self, dir: DVec3) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.inner.find(dir)
        }
    }

    fn sky() -> NearestCapLocator {
        let mut loc = NearestCapLocator::new();
        loc.add("Ori", Cap::from_angle(DVec3::X, 0.3));
        loc.add("Vel", Cap::from_angle(DVec3::Y, 0.3));
        loc.add("Ser", Cap::from_angle(DVec3::NEG_Y, 0.3));
        loc
    }

    #[test]
    fn test_nearest_cap_wins() {
        let mut loc = NearestCapLocator::new();
        loc.add("Big", Cap::from_angle(DVec3::X, 0.5));
        loc.add("Small", Cap::from_angle(DVec3::new(1.0, 0.1, 0.0), 0.2));
        assert_eq!(loc.find(DVec3::new(1.0, 0.12, 0.0)), Some("Small".to_string()));
        assert_eq!(loc.find(DVec3::new(1.0, -0.2, 0.0)), Some("Big".to_string()));
        assert_eq!(loc.find(DVec3::NEG_X), None);
    }

    #[test]
    fn test_pointed_case_insensitive() {
        let loc = sky();
        let p = painter_looking_at(DVec3::X);
        let mut cache = PointedCache::new();
        assert!(cache.is_pointed("Ori", &p, &loc));
        assert!(cache.is_pointed("ORI", &p, &loc));
        assert!(!cache.is_pointed("Vel", &p, &loc));
        assert!(!cache.is_pointed("", &p, &loc));
    }

    #[test]
    fn test_shared_figures() {
        let loc = sky();
        let mut cache = PointedCache::new();
        assert!(cache.is_pointed("Car", &painter_looking_at(DVec3::Y), &loc));
        assert!(cache.is_pointed("Oph", &painter_looking_at(DVec3::NEG_Y), &loc));
        assert!(!cache.is_pointed("Oph", &painter_looking_at(DVec3::Y), &loc));
    }

    #[test]
    fn test_cache_keyed_by_observer() {
        let inner = sky();
        let loc = Counting {
            inner: &inner,
            calls: Cell::new(0),
        };
        let mut cache = PointedCache::new();
        let p = painter_looking_at(DVec3::X);
        cache.is_pointed("Ori", &p, &loc);
        cache.is_pointed("Vel", &p, &loc);
        assert_eq!(loc.calls.get(), 4);
        let moved = painter_looking_at(DVec3::Y);
        assert!(cache.is_pointed("Vel", &moved, &loc));
        assert_eq!(loc.calls.get(), 8);
    }
}
