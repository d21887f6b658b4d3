//! Services handed to sky objects for one frame.

use astrolabe_catalog::StarCatalog;
use astrolabe_labels::LabelEngine;
use astrolabe_render::{InfoKind, InfoValue, ObjectKey, Painter, TextureLoader};

use crate::locator::ConstellationLocator;
use crate::names::CultureNames;

/// Everything an object may use while rendering.
pub struct FrameContext<'a> {
    pub painter: &'a mut dyn Painter,
    pub stars: &'a mut dyn StarCatalog,
    pub textures: &'a mut dyn TextureLoader,
    pub labels: &'a mut LabelEngine,
    pub names: &'a dyn CultureNames,
    pub locator: &'a dyn ConstellationLocator,
    /// Currently selected object.
    pub selection: Option<ObjectKey>,
}

impl FrameContext<'_> {
    pub fn is_selected(&self, key: ObjectKey) -> bool {
        self.selection == Some(key)
    }
}

/// Capabilities shared by everything drawn in the sky.
pub trait SkyObject {
    /// Advance animations by `dt` seconds.
    fn update(&mut self, dt: f64, selection: Option<ObjectKey>);

    /// Emit draw calls and labels for this frame.
    fn render(&mut self, ctx: &mut FrameContext<'_>);

    /// Query a property. `None` when unknown or not computed yet.
    fn info(&mut self, _kind: InfoKind, _ctx: &mut FrameContext<'_>) -> Option<InfoValue> {
        None
    }
}
