//! Window geometry and the perspective projection used for the sky.

use glam::{DMat4, DVec2, DVec4};

/// Clip planes for unit directions; the sky sits at distance 1.
const NEAR: f64 = 0.01;
const FAR: f64 = 10.0;

/// Screen and projection parameters for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Window size in window units.
    pub window_size: DVec2,
    /// Framebuffer size in physical pixels.
    pub fb_size: DVec2,
    /// Physical pixels per window unit.
    pub pixel_scale: f64,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Vertical offset of the visual screen centre (window units).
    pub y_offset: f64,
}

impl Viewport {
    /// Create a viewport for a window of `width × height` units.
    pub fn new(width: f64, height: f64, pixel_scale: f64, fov_y: f64) -> Self {
        Self {
            window_size: DVec2::new(width, height),
            fb_size: DVec2::new(width * pixel_scale, height * pixel_scale),
            pixel_scale,
            fov_y,
            y_offset: 0.0,
        }
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.window_size.y > 0.0 {
            self.window_size.x / self.window_size.y
        } else {
            1.0
        }
    }

    /// Perspective projection (OpenGL clip conventions, `-w <= z <= w`).
    pub fn projection_matrix(&self) -> DMat4 {
        let fov = self.fov_y.clamp(1e-6, 170f64.to_radians());
        DMat4::perspective_rh_gl(fov, self.aspect_ratio(), NEAR, FAR)
    }

    /// Convert clip coordinates to window coordinates (y down).
    ///
    /// Returns `None` for points behind the camera.
    pub fn clip_to_window(&self, clip: DVec4) -> Option<DVec2> {
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate().truncate() / clip.w;
        Some(DVec2::new(
            (ndc.x + 1.0) * 0.5 * self.window_size.x,
            (1.0 - ndc.y) * 0.5 * self.window_size.y,
        ))
    }

    /// Convert window coordinates to normalized device coordinates.
    pub fn window_to_ndc(&self, win: DVec2) -> DVec2 {
        DVec2::new(
            win.x / self.window_size.x * 2.0 - 1.0,
            1.0 - win.y / self.window_size.y * 2.0,
        )
    }

    /// Screen margins in NDC for a margin given in window units, each
    /// capped at `0.5`.
    pub fn ndc_margins(&self, margin: f64) -> (f64, f64) {
        let mx = margin * self.pixel_scale / self.fb_size.x * 2.0;
        let my = margin * self.pixel_scale / self.fb_size.y * 2.0;
        (mx.min(0.5), my.min(0.5))
    }

    /// Angular size of one window unit at the screen centre (radians).
    pub fn radians_per_unit(&self) -> f64 {
        if self.window_size.y > 0.0 {
            self.fov_y / self.window_size.y
        } else {
            0.0
        }
    }
}
