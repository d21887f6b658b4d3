//! The painter interface and a recording software implementation.
//!
//! Sky modules never talk to the GPU. They describe lines, textured quads
//! and texts through [`Painter`]; [`SkyPainter`] projects with a
//! perspective [`Viewport`] and records the resulting [`DrawCommand`]s for a
//! back-end to consume.

use glam::{DVec2, DVec3, DVec4};

use astrolabe_math::Cap;

use crate::frustum::SkyFrustum;
use crate::object::ObjectKey;
use crate::observer::{Frame, Observer};
use crate::text::{Rect, TextStyle};
use crate::texture::TextureHandle;
use crate::viewport::Viewport;

/// Linear RGBA color.
pub type Rgba = [f32; 4];

/// Number of segments used when drawing a UV-mapped line.
const MAPPED_LINE_SPLIT: usize = 8;

/// Maps a 2D parameter space onto directions of the sky sphere.
pub trait UvMap {
    fn map(&self, uv: DVec2) -> DVec3;
}

/// Stroke parameters for lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    /// Width in window units.
    pub width: f64,
    /// Dash period in window units, `0` for a solid line.
    pub dash_length: f64,
    /// Fraction of the dash period that is drawn.
    pub dash_ratio: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            width: 1.0,
            dash_length: 0.0,
            dash_ratio: 0.5,
        }
    }
}

/// Geometry of a line to paint.
pub enum LineShape<'a> {
    /// Shortest arc between two directions.
    GreatCircle([DVec3; 2]),
    /// Straight segment in the parameter space of `map`.
    Mapped { uv: [DVec2; 2], map: &'a dyn UvMap },
}

/// How a quad is composited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Additive,
}

/// A draw call recorded by [`SkyPainter`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Polyline of ICRF directions.
    Line { points: Vec<DVec3>, style: LineStyle },
    /// Textured quad; corners are the ICRF images of UV (0,0), (0,1),
    /// (1,0) and (1,1).
    Quad {
        corners: [DVec3; 4],
        texture: TextureHandle,
        color: Rgba,
        blend: BlendMode,
    },
    /// Text at a window position.
    Text {
        text: String,
        pos: DVec2,
        style: TextStyle,
    },
}

/// A body that hides whatever lies behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Occluder {
    /// The body itself; its own labels are not hidden.
    pub key: Option<ObjectKey>,
    /// ICRF direction of the body centre.
    pub center: DVec3,
    /// Apparent angular radius in radians.
    pub angular_radius: f64,
}

/// Projection and drawing services offered to sky modules.
pub trait Painter {
    fn observer(&self) -> &Observer;

    fn viewport(&self) -> &Viewport;

    /// Window position of `pos`, `None` when it is behind the observer.
    fn project(&self, frame: Frame, pos: DVec3, at_inf: bool) -> Option<DVec2>;

    /// Direction (unit vector in `frame`) under a window position.
    fn unproject(&self, frame: Frame, win: DVec2) -> DVec3;

    /// Homogeneous clip coordinates of a direction.
    fn to_clip(&self, frame: Frame, pos: DVec3) -> DVec4;

    /// Whether the cap is certainly outside the view.
    fn is_cap_clipped(&self, frame: Frame, cap: &Cap) -> bool;

    /// Whether a single point is outside the view.
    fn is_point_clipped(&self, frame: Frame, pos: DVec3, at_inf: bool) -> bool;

    /// Whether `pos` (ICRF) is hidden behind a rendered body other than
    /// `obj`.
    fn is_point_occulted(&self, pos: DVec3, at_inf: bool, obj: Option<ObjectKey>) -> bool;

    /// Radius in window units of the point drawn for a star of magnitude
    /// `vmag`.
    fn point_radius_for_mag(&self, vmag: f64) -> f64;

    /// Angular size (radians) of a point of `radius` window units.
    fn apparent_angle_for_point(&self, radius: f64) -> f64;

    fn paint_line(&mut self, frame: Frame, shape: LineShape<'_>, style: &LineStyle);

    fn paint_quad(
        &mut self,
        frame: Frame,
        map: &dyn UvMap,
        texture: TextureHandle,
        color: Rgba,
        blend: BlendMode,
    );

    /// Screen bounds the text would occupy at `pos`.
    fn text_bounds(&self, text: &str, pos: DVec2, style: &TextStyle) -> Rect;

    fn paint_text(&mut self, text: &str, pos: DVec2, style: &TextStyle);
}

/// Perspective painter recording its draw calls.
#[derive(Clone, Debug)]
pub struct SkyPainter {
    observer: Observer,
    viewport: Viewport,
    frustum: SkyFrustum,
    occluders: Vec<Occluder>,
    /// Faintest magnitude still drawn as a point.
    pub limit_mag: f64,
    commands: Vec<DrawCommand>,
}

impl SkyPainter {
    pub fn new(observer: Observer, viewport: Viewport) -> Self {
        let frustum = SkyFrustum::from_projection(&viewport.projection_matrix());
        Self {
            observer,
            viewport,
            frustum,
            occluders: Vec::new(),
            limit_mag: 6.5,
            commands: Vec::new(),
        }
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = observer;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.frustum = SkyFrustum::from_projection(&viewport.projection_matrix());
        self.viewport = viewport;
    }

    pub fn add_occluder(&mut self, occluder: Occluder) {
        self.occluders.push(occluder);
    }

    pub fn clear_occluders(&mut self) {
        self.occluders.clear();
    }

    /// Draw calls recorded since the last [`SkyPainter::take_commands`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn to_icrf(&self, frame: Frame, v: DVec3) -> DVec3 {
        self.observer.convert(frame, Frame::Icrf, v)
    }

    fn to_view(&self, frame: Frame, v: DVec3) -> DVec3 {
        self.observer.convert(frame, Frame::View, v).normalize_or_zero()
    }
}

impl Painter for SkyPainter {
    fn observer(&self) -> &Observer {
        &self.observer
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn project(&self, frame: Frame, pos: DVec3, _at_inf: bool) -> Option<DVec2> {
        self.viewport.clip_to_window(self.to_clip(frame, pos))
    }

    fn unproject(&self, frame: Frame, win: DVec2) -> DVec3 {
        let ndc = self.viewport.window_to_ndc(win);
        let inv = self.viewport.projection_matrix().inverse();
        let p = inv * DVec4::new(ndc.x, ndc.y, -1.0, 1.0);
        let view = (p.truncate() / p.w).normalize_or_zero();
        self.observer.convert(Frame::View, frame, view)
    }

    fn to_clip(&self, frame: Frame, pos: DVec3) -> DVec4 {
        let view = self.to_view(frame, pos);
        self.viewport.projection_matrix() * view.extend(1.0)
    }

    fn is_cap_clipped(&self, frame: Frame, cap: &Cap) -> bool {
        let view_cap = Cap::new(self.to_view(frame, cap.center), cap.cos_radius);
        self.frustum.is_cap_clipped(&view_cap)
    }

    fn is_point_clipped(&self, frame: Frame, pos: DVec3, _at_inf: bool) -> bool {
        let view = self.to_view(frame, pos);
        view.z >= 0.0 || !self.frustum.contains_direction(view)
    }

    fn is_point_occulted(&self, pos: DVec3, _at_inf: bool, obj: Option<ObjectKey>) -> bool {
        let dir = pos.normalize_or_zero();
        self.occluders.iter().any(|o| {
            if obj.is_some() && o.key == obj {
                return false;
            }
            dir.dot(o.center.normalize_or_zero()) > o.angular_radius.cos()
        })
    }

    fn point_radius_for_mag(&self, vmag: f64) -> f64 {
        (self.limit_mag - vmag).max(0.0) * 0.6
    }

    fn apparent_angle_for_point(&self, radius: f64) -> f64 {
        radius * self.viewport.radians_per_unit()
    }

    fn paint_line(&mut self, frame: Frame, shape: LineShape<'_>, style: &LineStyle) {
        let points = match shape {
            LineShape::GreatCircle([a, b]) => vec![self.to_icrf(frame, a), self.to_icrf(frame, b)],
            LineShape::Mapped { uv, map } => (0..=MAPPED_LINE_SPLIT)
                .map(|i| {
                    let t = i as f64 / MAPPED_LINE_SPLIT as f64;
                    let p = map.map(uv[0].lerp(uv[1], t));
                    self.to_icrf(frame, p)
                })
                .collect(),
        };
        self.commands.push(DrawCommand::Line {
            points,
            style: *style,
        });
    }

    fn paint_quad(
        &mut self,
        frame: Frame,
        map: &dyn UvMap,
        texture: TextureHandle,
        color: Rgba,
        blend: BlendMode,
    ) {
        let corners = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
        ]
        .map(|uv| self.to_icrf(frame, map.map(uv)));
        self.commands.push(DrawCommand::Quad {
            corners,
            texture,
            color,
            blend,
        });
    }

    fn text_bounds(&self, text: &str, pos: DVec2, style: &TextStyle) -> Rect {
        style.bounds(text, pos)
    }

    fn paint_text(&mut self, text: &str, pos: DVec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: *style,
        });
    }
}
