//! The constellations module: every figure of the active sky culture.

use astrolabe_catalog::StarCatalog;
use astrolabe_math::Fader;
use astrolabe_render::{ObjectKey, TextureLoader};

use crate::context::{FrameContext, SkyObject};
use crate::entity::Constellation;
use crate::info::ConstellationInfo;
use crate::locator::PointedCache;

/// Display toggles shared by all figures.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstellationDisplay {
    pub images: Fader,
    pub lines: Fader,
    pub bounds: Fader,
    pub labels: Fader,
    /// Grow lines from one end while fading in.
    pub lines_animation: bool,
    /// Only show the figure under the screen centre.
    pub show_only_pointed: bool,
    /// Brightness of the illustrations.
    pub illustrations_bscale: f64,
}

impl Default for ConstellationDisplay {
    fn default() -> Self {
        Self {
            images: Fader::new(false),
            lines: Fader::new(false),
            bounds: Fader::new(false),
            labels: Fader::new(false),
            lines_animation: true,
            show_only_pointed: true,
            illustrations_bscale: 1.0,
        }
    }
}

impl ConstellationDisplay {
    /// Whether every layer is fully faded out.
    pub fn all_hidden(&self) -> bool {
        self.lines.value == 0.0
            && self.labels.value == 0.0
            && self.images.value == 0.0
            && self.bounds.value == 0.0
    }

    fn update(&mut self, dt: f64) {
        self.images.update(dt);
        self.lines.update(dt);
        self.labels.update(dt);
        self.bounds.update(dt);
    }
}

/// Collection of constellation figures.
#[derive(Debug, Default)]
pub struct ConstellationSet {
    display: ConstellationDisplay,
    entities: Vec<Constellation>,
    pointed: PointedCache,
}

impl ConstellationSet {
    pub fn new(display: ConstellationDisplay) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    pub fn display(&self) -> &ConstellationDisplay {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut ConstellationDisplay {
        &mut self.display
    }

    pub fn set_lines_visible(&mut self, visible: bool) {
        self.display.lines.target = visible;
    }

    pub fn set_labels_visible(&mut self, visible: bool) {
        self.display.labels.target = visible;
    }

    pub fn set_images_visible(&mut self, visible: bool) {
        self.display.images.target = visible;
    }

    pub fn set_bounds_visible(&mut self, visible: bool) {
        self.display.bounds.target = visible;
    }

    pub fn set_lines_animation(&mut self, enabled: bool) {
        self.display.lines_animation = enabled;
    }

    pub fn set_show_only_pointed(&mut self, enabled: bool) {
        self.display.show_only_pointed = enabled;
    }

    pub fn set_illustrations_bscale(&mut self, scale: f64) {
        self.display.illustrations_bscale = scale;
    }

    /// Add a figure identified by `key`.
    pub fn insert(&mut self, key: ObjectKey, info: ConstellationInfo) {
        self.entities.push(Constellation::new(key, info));
    }

    /// Remove a figure and give back its resources.
    pub fn remove(
        &mut self,
        key: ObjectKey,
        stars: &mut dyn StarCatalog,
        textures: &mut dyn TextureLoader,
    ) -> Option<Constellation> {
        let index = self.entities.iter().position(|c| c.key() == key)?;
        let mut con = self.entities.remove(index);
        con.release(stars, textures);
        Some(con)
    }

    /// Release every figure.
    pub fn clear(&mut self, stars: &mut dyn StarCatalog, textures: &mut dyn TextureLoader) {
        for con in &mut self.entities {
            con.release(stars, textures);
        }
        self.entities.clear();
    }

    pub fn contains(&self, key: ObjectKey) -> bool {
        self.entities.iter().any(|c| c.key() == key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&Constellation> {
        self.entities.iter().find(|c| c.key() == key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut Constellation> {
        self.entities.iter_mut().find(|c| c.key() == key)
    }

    /// Find a figure by id, e.g. `CON western Ori`.
    pub fn find(&self, id: &str) -> Option<&Constellation> {
        self.entities.iter().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constellation> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Forget the cached pointed constellations, e.g. after the locator
    /// changed.
    pub fn invalidate_pointed(&mut self) {
        self.pointed.invalidate();
    }

    fn is_idle(&self, selection: Option<ObjectKey>) -> bool {
        self.display.all_hidden() && !selection.is_some_and(|key| self.contains(key))
    }
}

impl SkyObject for ConstellationSet {
    fn update(&mut self, dt: f64, selection: Option<ObjectKey>) {
        self.display.update(dt);
        if self.is_idle(selection) {
            return;
        }
        for con in &mut self.entities {
            con.update_faders(dt);
        }
    }

    fn render(&mut self, ctx: &mut FrameContext<'_>) {
        if self.is_idle(ctx.selection) {
            return;
        }
        for con in &mut self.entities {
            con.render(ctx, &self.display, &mut self.pointed);
        }
    }
}
