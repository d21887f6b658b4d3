//! Visibility tests and drawing of a constellation.

use glam::{DMat3, DVec2, DVec3, DVec4};

use astrolabe_labels::LabelStyle;
use astrolabe_math::{
    B1875_TO_J2000, Cap, apply_image_transform, from_spherical, grow_line, is_clipped, smoothstep,
    truncate_line,
};
use astrolabe_render::{
    Align, BlendMode, Frame, LineShape, LineStyle, Painter, TextEffects, TextStyle, UvMap,
};

use crate::FONT_SIZE_BASE;
use crate::collection::ConstellationDisplay;
use crate::context::FrameContext;
use crate::entity::{Constellation, LoadState};
use crate::locator::PointedCache;
use crate::names::label_text;

/// Border kept around the screen by the in-view tests, in window units.
const VIEW_MARGIN: f64 = 100.0;

/// Extra gap between a line end and its star.
const LINE_GAP_DEG: f64 = 0.2;

const LINES_COLOR: [f32; 4] = [0.65, 1.0, 1.0, 0.4];

/// Maps illustration UVs onto the sky.
struct ImageMap(DMat3);

impl UvMap for ImageMap {
    fn map(&self, uv: DVec2) -> DVec3 {
        apply_image_transform(&self.0, uv)
    }
}

/// Maps B1875.0 (ra, dec) onto J2000 directions.
struct B1875Map;

impl UvMap for B1875Map {
    fn map(&self, v: DVec2) -> DVec3 {
        B1875_TO_J2000 * from_spherical(v.x, v.y)
    }
}

impl Constellation {
    /// Draw the figure for this frame.
    pub fn render(
        &mut self,
        ctx: &mut FrameContext<'_>,
        display: &ConstellationDisplay,
        pointed: &mut PointedCache,
    ) {
        let selected = ctx.is_selected(self.key);
        if self.refresh(ctx.stars, ctx.textures, ctx.painter.observer()) != LoadState::Ready {
            return;
        }
        if !selected && display.all_hidden() {
            return;
        }

        self.visible.target = self.is_visible(ctx, display, pointed, selected);
        if self.visible.value == 0.0 {
            return;
        }

        self.render_lines(ctx, display, selected);
        self.render_label(ctx, display, pointed, selected);
        self.render_image(ctx, display, selected);
        self.render_bounds(ctx, display, selected);
    }

    /// Whether the figure should be faded in.
    pub fn is_visible(
        &self,
        ctx: &FrameContext<'_>,
        display: &ConstellationDisplay,
        pointed: &mut PointedCache,
        selected: bool,
    ) -> bool {
        if self.state != LoadState::Ready {
            return false;
        }
        if selected {
            return true;
        }
        if display.show_only_pointed && !self.info.iau.is_empty() {
            return pointed.is_pointed(&self.info.iau, &*ctx.painter, ctx.locator);
        }
        self.lines_in_view(&*ctx.painter) || self.image_in_view(&*ctx.painter)
    }

    fn lines_in_view(&self, painter: &dyn Painter) -> bool {
        let Some(cap) = self.lines.cap else {
            return false;
        };
        if painter.is_cap_clipped(Frame::Icrf, &cap) {
            return false;
        }
        let clip: Vec<DVec4> = self
            .lines
            .stars
            .iter()
            .zip(&self.lines.positions)
            .filter(|(star, _)| star.is_some())
            .map(|(_, pos)| painter.to_clip(Frame::Icrf, *pos))
            .collect();
        if clip.is_empty() {
            return true;
        }
        let (mx, my) = painter.viewport().ndc_margins(VIEW_MARGIN);
        !is_clipped(&clip, mx, my)
    }

    fn image_in_view(&self, painter: &dyn Painter) -> bool {
        let Some(image) = self.image else {
            return false;
        };
        if self.texture.is_none() || painter.is_cap_clipped(Frame::Icrf, &image.cap) {
            return false;
        }
        let clip: Vec<DVec4> = (0..4)
            .map(|i| {
                let uv = DVec2::new((i / 2) as f64, (i % 2) as f64);
                painter.to_clip(Frame::Icrf, apply_image_transform(&image.mat, uv))
            })
            .collect();
        let (mx, my) = painter.viewport().ndc_margins(VIEW_MARGIN);
        !is_clipped(&clip, mx, my)
    }

    fn render_lines(
        &self,
        ctx: &mut FrameContext<'_>,
        display: &ConstellationDisplay,
        selected: bool,
    ) {
        let mut visible = display.lines.value * self.visible.value;
        let mut width = 1.0;
        if selected {
            visible = 1.0;
            width *= 2.0;
        }
        if visible == 0.0 {
            return;
        }
        let Some(cap) = self.lines.cap else {
            return;
        };
        if ctx.painter.is_cap_clipped(Frame::Icrf, &cap) {
            return;
        }

        let stars = &self.lines.stars;
        let positions = &self.lines.positions;
        for (seg, line) in self.info.lines.iter().enumerate() {
            let (Some(s0), Some(s1)) = (stars[seg * 2], stars[seg * 2 + 1]) else {
                continue;
            };
            let gap = |star| {
                let radius = ctx.painter.point_radius_for_mag(ctx.stars.vmag(star));
                ctx.painter.apparent_angle_for_point(radius) + LINE_GAP_DEG.to_radians()
            };
            let (a0, a1) = (gap(s0), gap(s1));
            let (a, mut b) = truncate_line(positions[seg * 2], positions[seg * 2 + 1], a0, a1);
            if display.lines_animation {
                b = grow_line(a, b, visible * 2.0);
            }
            let mut color = LINES_COLOR;
            color[3] *= line.weight.alpha_scale();
            let style = LineStyle {
                color,
                width,
                ..LineStyle::default()
            };
            ctx.painter
                .paint_line(Frame::Icrf, LineShape::GreatCircle([a, b]), &style);
        }
    }

    fn render_image(
        &mut self,
        ctx: &mut FrameContext<'_>,
        display: &ConstellationDisplay,
        selected: bool,
    ) {
        let (Some(image), Some(texture)) = (self.image, self.texture) else {
            return;
        };
        // Fade out as the figure grows past the screen.
        let diam = (image.cap.radius() * 2.0).to_degrees();
        let fov = ctx.painter.viewport().fov_y.to_degrees();
        let mut alpha = smoothstep(diam / 5.0, diam / 2.0, fov);
        if !selected {
            alpha *= display.images.value * self.visible.value;
        }
        alpha *= display.illustrations_bscale;
        if alpha == 0.0 {
            return;
        }
        if !ctx.textures.is_ready(texture) {
            return;
        }
        if ctx.painter.is_cap_clipped(Frame::Icrf, &image.cap) {
            return;
        }

        self.image_loaded.target = true;
        let strength = if selected { 0.6 } else { 0.3 };
        alpha *= strength * self.image_loaded.value;
        if alpha <= 0.0 {
            return;
        }
        ctx.painter.paint_quad(
            Frame::Icrf,
            &ImageMap(image.mat),
            texture,
            [1.0, 1.0, 1.0, alpha as f32],
            BlendMode::Additive,
        );
    }

    fn render_label(
        &self,
        ctx: &mut FrameContext<'_>,
        display: &ConstellationDisplay,
        pointed: &mut PointedCache,
        selected: bool,
    ) {
        let mut alpha = 1.0;
        if !selected {
            alpha *= display.labels.value * self.visible.value;
        }
        if alpha == 0.0 {
            return;
        }
        let Some(cap) = self.lines.cap else {
            return;
        };
        if ctx.painter.is_cap_clipped(Frame::Icrf, &cap) {
            return;
        }

        let lang = ctx.labels.settings().lang.clone();
        let (text, max_len) = label_text(ctx.names, &self.info.id, &lang);
        if !self.should_render_label(ctx, display, pointed, max_len, selected) {
            return;
        }

        let color = if selected {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            [0.65, 1.0, 1.0, 0.6 * alpha as f32]
        };
        let style = LabelStyle::new(TextStyle {
            size: FONT_SIZE_BASE,
            color,
            angle: 0.0,
            align: Align::CENTER | Align::MIDDLE,
            effects: TextEffects::UPPERCASE
                | TextEffects::SPACED
                | TextEffects::BOLD
                | TextEffects::MULTILINES,
        });
        ctx.labels
            .add_3d(&text, Frame::Icrf, cap.center, true, &style, 0.0, Some(self.key));
    }

    /// Extra tests to avoid cluttering the sky with labels.
    fn should_render_label(
        &self,
        ctx: &FrameContext<'_>,
        display: &ConstellationDisplay,
        pointed: &mut PointedCache,
        label_len: usize,
        selected: bool,
    ) -> bool {
        if selected {
            return true;
        }
        let painter = &*ctx.painter;
        if display.show_only_pointed && pointed.is_pointed(&self.info.iau, painter, ctx.locator) {
            return true;
        }
        let Some(cap) = self.lines.cap else {
            return false;
        };
        if painter.is_point_clipped(Frame::Icrf, cap.center, true) {
            return false;
        }
        if self.single_point {
            return true;
        }

        // The label must fit inside the figure.
        let Some(win) = painter.project(Frame::Icrf, cap.center, true) else {
            return false;
        };
        let next = painter.unproject(Frame::Icrf, win + DVec2::X);
        let resolution = cap.center.dot(next).clamp(-1.0, 1.0).acos();
        let label_px = 0.5 * FONT_SIZE_BASE * 1.4 * label_len as f64;
        let label_cap = Cap::new(cap.center, (label_px / 2.0 * resolution).cos());
        cap.contains_cap(&label_cap)
    }

    fn render_bounds(
        &self,
        ctx: &mut FrameContext<'_>,
        display: &ConstellationDisplay,
        selected: bool,
    ) {
        let mut alpha = 1.0;
        if !selected {
            alpha *= display.bounds.value * self.visible.value;
        }
        if alpha == 0.0 || self.info.edges.is_empty() {
            return;
        }
        let Some(cap) = self.lines.cap else {
            return;
        };
        if ctx.painter.is_cap_clipped(Frame::Icrf, &cap) {
            return;
        }

        let alpha = alpha as f32;
        let color = if selected {
            [1.0, 0.84, 0.84, 0.5 * alpha]
        } else {
            [0.8, 0.34, 0.34, 0.4 * alpha]
        };
        let style = LineStyle {
            color,
            dash_length: 8.0,
            dash_ratio: 0.85,
            ..LineStyle::default()
        };
        for [start, end] in &self.info.edges {
            let mut end = *end;
            if end[0] < start[0] {
                end[0] += std::f64::consts::TAU;
            }
            let shape = LineShape::Mapped {
                uv: [DVec2::from(*start), DVec2::from(end)],
                map: &B1875Map,
            };
            ctx.painter.paint_line(Frame::Icrf, shape, &style);
        }
    }
}
