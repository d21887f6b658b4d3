//! Configuration for the Astrolabe sky renderer.
//!
//! Settings persist to disk as a RON file, every section falls back to its
//! defaults, and command-line arguments override what was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, ConstellationsConfig, CultureConfig, DebugConfig, LabelsConfig,
    ViewConfig, default_config_dir,
};
pub use error::ConfigError;
