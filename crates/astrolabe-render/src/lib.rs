//! Painter and projection interfaces consumed by the sky modules, plus a
//! recording software painter, text metrics and an arena texture cache.

pub mod frustum;
pub mod object;
pub mod observer;
pub mod painter;
pub mod text;
pub mod texture;
pub mod viewport;

pub use frustum::SkyFrustum;
pub use object::{InfoKind, InfoValue, ObjectKey};
pub use observer::{Frame, Observer};
pub use painter::{
    BlendMode, DrawCommand, LineShape, LineStyle, Occluder, Painter, Rgba, SkyPainter, UvMap,
};
pub use text::{Align, Rect, TextEffects, TextStyle, lang_supports_spacing, split_lines};
pub use texture::{TextureCache, TextureHandle, TextureLoader};
pub use viewport::Viewport;
