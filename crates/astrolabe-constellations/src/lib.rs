//! Constellation figures: lazy loading of their stars, bounding geometry,
//! visibility tests and drawing of lines, labels, illustrations and
//! boundaries.

mod collection;
mod context;
mod draw;
mod entity;
mod error;
mod info;
mod japanese;
mod locator;
mod names;

pub use collection::{ConstellationDisplay, ConstellationSet};
pub use context::{FrameContext, SkyObject};
pub use entity::{Constellation, LoadState};
pub use error::ConstellationError;
pub use info::{Anchor, ConstellationInfo, ImageDef, LineDef, LineWeight, SkyCulture};
pub use japanese::to_japanese;
pub use locator::{ConstellationLocator, NearestCapLocator, PointedCache};
pub use names::{CultureNames, MAX_LABEL_LINE, NameTable, label_text};

/// Base text height of constellation labels, in window units.
pub const FONT_SIZE_BASE: f64 = 15.0;

#[cfg(test)]
mod tests;
