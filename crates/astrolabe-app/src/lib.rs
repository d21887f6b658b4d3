//! Astrolabe application layer.
//!
//! [`Sky`] owns the label engine, the sky modules and the external services
//! they draw on; [`frame_loop`] drives it at a fixed simulation rate.

mod error;
pub mod frame_loop;
mod sky;

pub use error::SkyError;
pub use sky::{Sky, SkyModule};
