//! A single persistent label.

use glam::{DVec2, DVec3};

use astrolabe_math::Fader;
use astrolabe_render::{Align, Frame, ObjectKey, Rect, TextEffects, TextStyle};

/// Highest label priority. Labels without [`TextEffects::FLOAT`] always
/// get it.
pub const MAX_PRIORITY: f64 = 1024.0;

/// Where a label is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelAnchor {
    /// Fixed window position.
    Screen(DVec2),
    /// Sky position, re-projected every frame.
    Sky {
        frame: Frame,
        pos: DVec3,
        /// `pos` is a direction at infinity.
        at_inf: bool,
    },
}

impl LabelAnchor {
    /// Sort key, larger is farther. Directions at infinity and screen
    /// anchors share the farthest tier.
    pub(crate) fn depth(&self) -> f64 {
        match *self {
            LabelAnchor::Screen(_) => f64::INFINITY,
            LabelAnchor::Sky { at_inf: true, .. } => f64::INFINITY,
            LabelAnchor::Sky { pos, .. } => pos.length_squared(),
        }
    }
}

/// Text style plus the radius of the labelled object.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LabelStyle {
    pub text: TextStyle,
    /// Radius of the object on screen; the label is pushed out of it.
    pub radius: f64,
}

impl LabelStyle {
    pub fn new(text: TextStyle) -> Self {
        Self { text, radius: 0.0 }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

/// Identity used to reuse a label across frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct LabelKey {
    pub obj: Option<ObjectKey>,
    pub text: String,
    pub size_bits: u64,
}

/// A label kept by the [`crate::LabelEngine`].
#[derive(Clone, Debug)]
pub struct Label {
    pub(crate) obj: Option<ObjectKey>,
    pub(crate) text: String,
    pub(crate) render_text: String,
    pub(crate) anchor: LabelAnchor,
    pub(crate) win_pos: DVec2,
    pub(crate) style: LabelStyle,
    pub(crate) fader: Fader,
    pub(crate) priority: f64,
    pub(crate) bounds: Rect,
    pub(crate) active: bool,
}

impl Label {
    pub(crate) fn new(obj: Option<ObjectKey>, text: &str, fade_duration: f64) -> Self {
        Self {
            obj,
            text: text.to_string(),
            render_text: text.to_string(),
            anchor: LabelAnchor::Screen(DVec2::ZERO),
            win_pos: DVec2::ZERO,
            style: LabelStyle::default(),
            fader: Fader::with_duration(false, fade_duration),
            priority: MAX_PRIORITY,
            bounds: Rect::ZERO,
            active: false,
        }
    }

    pub(crate) fn key(&self) -> LabelKey {
        LabelKey {
            obj: self.obj,
            text: self.text.clone(),
            size_bits: self.style.text.size.to_bits(),
        }
    }

    /// Window position after pushing the label out of the object radius.
    pub(crate) fn offset_position(&self) -> DVec2 {
        let align = self.style.text.align;
        let mut border = self.style.radius;
        if align.intersects(Align::LEFT | Align::RIGHT)
            && align.intersects(Align::TOP | Align::BOTTOM | Align::BASELINE)
        {
            border /= std::f64::consts::SQRT_2;
        }
        let mut pos = self.win_pos;
        if align.contains(Align::LEFT) {
            pos.x += border;
        }
        if align.contains(Align::RIGHT) {
            pos.x -= border;
        }
        if align.contains(Align::BOTTOM) {
            pos.y -= border;
        }
        if align.contains(Align::BASELINE) {
            pos.y -= border;
        }
        if align.contains(Align::TOP) {
            pos.y += border;
        }
        pos
    }

    pub fn obj(&self) -> Option<ObjectKey> {
        self.obj
    }

    /// Text as requested.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as painted, after effects are applied.
    pub fn render_text(&self) -> &str {
        &self.render_text
    }

    pub fn anchor(&self) -> LabelAnchor {
        self.anchor
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn effects(&self) -> TextEffects {
        self.style.text.effects
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn fader(&self) -> &Fader {
        &self.fader
    }

    /// Screen bounds computed by the last render.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Requested during the current frame.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
