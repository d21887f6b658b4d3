//! Screen label layout.
//!
//! Modules request labels every frame through [`LabelEngine::add`] and
//! [`LabelEngine::add_3d`]. The engine keeps labels alive across frames so
//! they can fade in and out, re-projects them, and hides floating labels
//! that overlap labels of equal or higher priority.

mod engine;
mod label;

pub use engine::{LabelEngine, LabelSettings};
pub use label::{Label, LabelAnchor, LabelStyle, MAX_PRIORITY};
