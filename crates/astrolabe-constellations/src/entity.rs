//! A single constellation: lazy star resolution and bounding geometry.

use glam::{DMat3, DVec2, DVec3};

use astrolabe_catalog::{Resolve, StarCatalog, StarHandle};
use astrolabe_math::{Cap, Fader, compute_image_cap, image_transform};
use astrolabe_render::{
    Frame, InfoKind, InfoValue, ObjectKey, Observer, Painter, TextureHandle, TextureLoader,
};

use crate::ConstellationError;
use crate::info::ConstellationInfo;

/// Simulated days during which the figure is considered unchanged.
const STALE_DAYS: f64 = 365.0;

/// Caps smaller than this (radians) are treated as a single point.
const MIN_CAP_RADIUS: f64 = 1e-6;

/// Cap radius given to single-point figures.
const SINGLE_POINT_RADIUS_DEG: f64 = 1.0;

/// Loading progress of a constellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for star or texture data.
    Loading,
    /// Geometry computed, can be rendered.
    Ready,
    /// Unusable; never rendered.
    Errored,
}

/// Resolved line stars and their cached directions.
#[derive(Debug, Default)]
pub(crate) struct Lines {
    /// Two entries per segment; `None` for stars that do not exist.
    pub stars: Vec<Option<StarHandle>>,
    /// Unit ICRF directions, parallel to `stars`.
    pub positions: Vec<DVec3>,
    pub cap: Option<Cap>,
}

/// Illustration state once its anchors are known.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ImageGeometry {
    /// UV `(u, v, 1)` to ICRF direction.
    pub mat: DMat3,
    pub cap: Cap,
}

/// A constellation figure of the active sky culture.
#[derive(Debug)]
pub struct Constellation {
    pub(crate) key: ObjectKey,
    pub(crate) info: ConstellationInfo,
    pub(crate) state: LoadState,
    pub(crate) error: Option<ConstellationError>,
    pub(crate) visible: Fader,
    pub(crate) image_loaded: Fader,
    pub(crate) lines: Lines,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) anchor_stars: [Option<StarHandle>; 3],
    pub(crate) image: Option<ImageGeometry>,
    pub(crate) single_point: bool,
    last_update: f64,
}

impl Constellation {
    pub fn new(key: ObjectKey, info: ConstellationInfo) -> Self {
        Self {
            key,
            info,
            state: LoadState::Loading,
            error: None,
            visible: Fader::with_duration(false, 0.5),
            image_loaded: Fader::with_duration(false, 1.0),
            lines: Lines::default(),
            texture: None,
            anchor_stars: [None; 3],
            image: None,
            single_point: false,
            last_update: 0.0,
        }
    }

    pub fn key(&self) -> ObjectKey {
        self.key
    }

    pub fn info(&self) -> &ConstellationInfo {
        &self.info
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Why the constellation is errored.
    pub fn error(&self) -> Option<&ConstellationError> {
        self.error.as_ref()
    }

    /// Number of line star slots, two per segment, found or not.
    pub fn nb_stars(&self) -> usize {
        self.lines.stars.len()
    }

    /// Segments whose two stars were found.
    pub fn drawable_segments(&self) -> usize {
        self.lines
            .stars
            .chunks_exact(2)
            .filter(|pair| pair[0].is_some() && pair[1].is_some())
            .count()
    }

    /// Bounding cap of the lines, or of the image when there are no lines.
    pub fn cap(&self) -> Option<Cap> {
        self.ready_geometry(|c| c.lines.cap)
    }

    /// Direction of the figure centre.
    pub fn position(&self) -> Option<DVec3> {
        self.cap().map(|cap| cap.center)
    }

    /// Angular radius in radians.
    pub fn radius(&self) -> Option<f64> {
        self.cap().map(|cap| cap.radius())
    }

    /// Bounding cap of the illustration, if it could be placed.
    pub fn image_cap(&self) -> Option<Cap> {
        self.ready_geometry(|c| c.image.map(|img| img.cap))
    }

    pub fn has_illustration(&self) -> bool {
        self.texture.is_some()
    }

    pub fn is_single_point(&self) -> bool {
        self.single_point
    }

    pub fn visible_fader(&self) -> &Fader {
        &self.visible
    }

    pub fn image_loaded_fader(&self) -> &Fader {
        &self.image_loaded
    }

    fn ready_geometry<T>(&self, f: impl FnOnce(&Self) -> Option<T>) -> Option<T> {
        if self.state == LoadState::Ready {
            f(self)
        } else {
            None
        }
    }

    /// Advance the entity faders.
    pub fn update_faders(&mut self, dt: f64) {
        self.image_loaded.update(dt);
        self.visible.update(dt);
    }

    /// Bring star data and geometry up to date for the observer.
    ///
    /// Geometry is recomputed at most once per year of simulated time.
    pub fn refresh(
        &mut self,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
        observer: &Observer,
    ) -> LoadState {
        match self.state {
            LoadState::Errored => return LoadState::Errored,
            LoadState::Ready if (observer.tt() - self.last_update).abs() < STALE_DAYS => {
                return LoadState::Ready;
            }
            _ => {}
        }
        if self.state == LoadState::Loading && !self.acquire(stars, textures) {
            return LoadState::Loading;
        }
        match self.compute_geometry(stars, textures, observer) {
            Ok(()) => {
                self.last_update = observer.tt();
                self.state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!("{err}");
                self.release(stars, textures);
                self.error = Some(err);
                self.state = LoadState::Errored;
            }
        }
        self.state
    }

    /// Resolve every line and anchor star. Returns `false`, holding no
    /// star, if some data is still loading.
    fn acquire(&mut self, stars: &mut dyn StarCatalog, textures: &mut dyn TextureLoader) -> bool {
        if self.texture.is_none() {
            if let Some(path) = self.info.image_path() {
                self.texture = Some(textures.load(&path));
                self.image_loaded = Fader::with_duration(false, 1.0);
            }
        }

        let mut missing = 0;
        let mut acquired: Vec<Option<StarHandle>> = Vec::with_capacity(self.info.lines.len() * 2);
        for hip in self.info.lines.iter().flat_map(|line| line.stars) {
            match stars.resolve(hip) {
                Resolve::Pending => {
                    release_all(stars, acquired.iter().flatten());
                    return false;
                }
                Resolve::Found(star) => acquired.push(Some(star)),
                Resolve::NotFound => {
                    tracing::warn!("Cannot find line star HIP {hip} in {}", self.info.id);
                    missing += 1;
                    acquired.push(None);
                }
            }
        }

        let mut anchors = [None; 3];
        if self.texture.is_some() {
            if let Some(image) = &self.info.image {
                for (i, anchor) in image.anchors.iter().enumerate() {
                    match stars.resolve(anchor.hip) {
                        Resolve::Pending => {
                            release_all(stars, acquired.iter().flatten());
                            release_all(stars, anchors.iter().flatten());
                            return false;
                        }
                        Resolve::Found(star) => anchors[i] = Some(star),
                        Resolve::NotFound => {
                            tracing::warn!(
                                "Cannot find anchor star HIP {} in {}",
                                anchor.hip,
                                self.info.id
                            );
                            missing += 1;
                        }
                    }
                }
            }
        }

        if missing > 0 {
            tracing::warn!("{missing} stars not found in constellation {}", self.info.id);
        }
        self.lines.positions = vec![DVec3::ZERO; acquired.len()];
        self.lines.stars = acquired;
        self.anchor_stars = anchors;
        true
    }

    fn compute_geometry(
        &mut self,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
        observer: &Observer,
    ) -> Result<(), ConstellationError> {
        if !self.lines.stars.is_empty() {
            let mut sum = DVec3::ZERO;
            for (star, pos) in self.lines.stars.iter().zip(self.lines.positions.iter_mut()) {
                if let Some(star) = star {
                    *pos = stars.position(*star, observer).normalize_or_zero();
                    sum += *pos;
                }
            }
            if sum.length_squared() == 0.0 {
                return Err(ConstellationError::NoStars(self.info.id.clone()));
            }
            let resolved: Vec<DVec3> = self
                .lines
                .stars
                .iter()
                .zip(&self.lines.positions)
                .filter(|(star, _)| star.is_some())
                .map(|(_, pos)| *pos)
                .collect();
            let mut cap = best_cap(sum.normalize(), &resolved);
            if cap.radius() < MIN_CAP_RADIUS {
                cap.cos_radius = SINGLE_POINT_RADIUS_DEG.to_radians().cos();
                self.single_point = true;
            }
            self.lines.cap = Some(cap);
        }

        if self.lines.stars.is_empty() && self.texture.is_none() {
            return Err(ConstellationError::Empty(self.info.id.clone()));
        }

        self.update_image(stars, textures, observer);

        if self.lines.stars.is_empty() {
            match self.image {
                Some(image) => self.lines.cap = Some(image.cap),
                None => return Err(ConstellationError::Empty(self.info.id.clone())),
            }
        }
        Ok(())
    }

    /// Place the illustration on its anchor stars, or drop it.
    fn update_image(
        &mut self,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
        observer: &Observer,
    ) {
        let Some(anchors) = self.info.image.as_ref().map(|img| img.anchors) else {
            return;
        };
        if self.texture.is_none() {
            return;
        }
        let mut uvs = [DVec2::ZERO; 3];
        let mut dirs = [DVec3::ZERO; 3];
        for (i, anchor) in anchors.iter().enumerate() {
            let Some(star) = self.anchor_stars[i] else {
                self.drop_image(stars, textures, "missing anchor star");
                return;
            };
            uvs[i] = DVec2::from(anchor.uv);
            dirs[i] = stars.position(star, observer).normalize_or_zero();
        }
        match image_transform(uvs, dirs) {
            Ok(mat) => {
                self.image = Some(ImageGeometry {
                    mat,
                    cap: compute_image_cap(&mat),
                });
            }
            Err(err) => self.drop_image(stars, textures, &err.to_string()),
        }
    }

    fn drop_image(
        &mut self,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
        reason: &str,
    ) {
        tracing::warn!("Cannot compute image for constellation {}: {reason}", self.info.id);
        if let Some(texture) = self.texture.take() {
            textures.release(texture);
        }
        release_all(stars, self.anchor_stars.iter().flatten());
        self.anchor_stars = [None; 3];
        self.image = None;
    }

    /// Give back every star and texture reference. The constellation
    /// starts loading again if it is refreshed afterwards.
    pub fn release(&mut self, stars: &mut dyn StarCatalog, textures: &mut dyn TextureLoader) {
        release_all(stars, self.lines.stars.iter().flatten());
        release_all(stars, self.anchor_stars.iter().flatten());
        if let Some(texture) = self.texture.take() {
            textures.release(texture);
        }
        self.lines = Lines::default();
        self.anchor_stars = [None; 3];
        self.image = None;
        if self.state == LoadState::Ready {
            self.state = LoadState::Loading;
        }
    }

    /// Query a property, loading data first if needed.
    pub fn info_value(
        &mut self,
        kind: InfoKind,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
        observer: &Observer,
    ) -> Option<InfoValue> {
        self.refresh(stars, textures, observer);
        match kind {
            InfoKind::Position => self.position().map(InfoValue::Position),
            InfoKind::Radius => self.radius().map(InfoValue::Radius),
        }
    }

    /// Catalog designations: `CON` (id without its prefix) and `NAME`
    /// (IAU code) when there is one.
    pub fn designations(&self) -> Vec<(&'static str, String)> {
        let id = &self.info.id;
        let mut out = vec![("CON", id.strip_prefix("CON ").unwrap_or(id).to_string())];
        if !self.info.iau.is_empty() {
            out.push(("NAME", self.info.iau.clone()));
        }
        out
    }

    /// Extra data exposed to the user interface.
    pub fn json_data(&self) -> serde_json::Value {
        let mut data = serde_json::Map::new();
        if let Some(description) = &self.info.description {
            data.insert("description".to_string(), description.clone().into());
        }
        serde_json::Value::Object(data)
    }

    /// Screen ellipse around the figure, for selection pointers: centre,
    /// half axes and rotation.
    pub fn ellipse_2d(&self, painter: &dyn Painter) -> Option<(DVec2, DVec2, f64)> {
        let cap = self.cap()?;
        let center = painter.project(Frame::Icrf, cap.center, true)?;
        let diameter = cap.radius() * 2.0 / painter.viewport().radians_per_unit();
        Some((center, DVec2::splat(diameter / 2.0), 0.0))
    }
}

fn release_all<'a>(stars: &mut dyn StarCatalog, handles: impl Iterator<Item = &'a StarHandle>) {
    for star in handles {
        stars.release(*star);
    }
}

/// Bounding cap of `points` around `center`, improved with a second
/// candidate centred between the outermost point and the point farthest
/// on the opposite side. First match wins on ties.
pub(crate) fn best_cap(center: DVec3, points: &[DVec3]) -> Cap {
    let mut cap = Cap::point(center);
    let mut outermost = None;
    for (i, p) in points.iter().enumerate() {
        if cap.extend(*p) {
            outermost = Some(i);
        }
    }
    let Some(outer) = outermost else {
        return cap;
    };

    let away = (cap.center - points[outer]).normalize_or_zero();
    let mut opposite = outer;
    let mut max_d = -1.0;
    for (i, p) in points.iter().enumerate() {
        let d = away.dot(*p - cap.center);
        if d > max_d {
            opposite = i;
            max_d = d;
        }
    }

    let mut alt = Cap::point(points[outer] + points[opposite]);
    for p in points {
        alt.extend(*p);
    }
    if alt.cos_radius > cap.cos_radius { alt } else { cap }
}
