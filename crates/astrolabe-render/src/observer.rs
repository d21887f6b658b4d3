//! Observer state and the reference frames positions are expressed in.

use std::hash::{Hash, Hasher};

use glam::{DMat3, DMat4, DVec3};
use rustc_hash::FxHasher;

/// A named reference coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Sky-fixed International Celestial Reference Frame.
    Icrf,
    /// View-relative frame: the camera looks down `-Z` with `+Y` up.
    View,
}

/// Where the sky is observed from and in which direction.
///
/// `hash` changes whenever any field changes, so consumers can cache
/// per-view computations cheaply.
#[derive(Clone, Debug, PartialEq)]
pub struct Observer {
    /// Terrestrial time as a Modified Julian Date (days).
    tt: f64,
    /// Rotation from ICRF to the view frame.
    view: DMat3,
    hash: u64,
}

impl Observer {
    /// Create an observer from a time and an ICRF-to-view rotation.
    pub fn new(tt: f64, view: DMat3) -> Self {
        let mut obs = Self { tt, view, hash: 0 };
        obs.rehash();
        obs
    }

    /// Observer at `tt` looking along the ICRF direction `dir`.
    pub fn looking_at(tt: f64, dir: DVec3, up: DVec3) -> Self {
        let look = DMat4::look_to_rh(DVec3::ZERO, dir.normalize_or_zero(), up);
        Self::new(tt, DMat3::from_mat4(look))
    }

    /// Terrestrial time (MJD).
    pub fn tt(&self) -> f64 {
        self.tt
    }

    /// ICRF to view rotation.
    pub fn view(&self) -> &DMat3 {
        &self.view
    }

    /// Hash of the full observer state.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Move the observer in time.
    pub fn set_tt(&mut self, tt: f64) {
        self.tt = tt;
        self.rehash();
    }

    /// Point the observer somewhere else.
    pub fn set_view(&mut self, view: DMat3) {
        self.view = view;
        self.rehash();
    }

    /// Convert a vector between frames.
    pub fn convert(&self, from: Frame, to: Frame, v: DVec3) -> DVec3 {
        match (from, to) {
            (Frame::Icrf, Frame::View) => self.view * v,
            (Frame::View, Frame::Icrf) => self.view.transpose() * v,
            _ => v,
        }
    }

    fn rehash(&mut self) {
        let mut hasher = FxHasher::default();
        self.tt.to_bits().hash(&mut hasher);
        for v in self.view.to_cols_array() {
            v.to_bits().hash(&mut hasher);
        }
        self.hash = hasher.finish();
    }
}
