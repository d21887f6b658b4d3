//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

const APP_NAME: &str = "astrolabe";

/// Platform configuration directory for Astrolabe, e.g.
/// `~/.config/astrolabe` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport and observer settings.
    pub view: ViewConfig,
    /// Constellation display toggles.
    pub constellations: ConstellationsConfig,
    /// Label layout settings.
    pub labels: LabelsConfig,
    /// Sky culture and star data files.
    pub culture: CultureConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport and observer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Framebuffer pixels per logical pixel.
    pub pixel_scale: f64,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Vertical shift of the projection centre, in window units.
    pub y_offset: f64,
    /// Initial view direction, right ascension in degrees.
    pub ra_deg: f64,
    /// Initial view direction, declination in degrees.
    pub dec_deg: f64,
    /// Start time (TT, MJD).
    pub start_tt: f64,
    /// Simulated days per real second.
    pub time_speed: f64,
    /// Language used for labels, e.g. "en" or "ja".
    pub lang: String,
}

/// Constellation layer toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstellationsConfig {
    pub lines_visible: bool,
    pub labels_visible: bool,
    pub images_visible: bool,
    pub bounds_visible: bool,
    /// Grow lines from one end while fading in.
    pub lines_animation: bool,
    /// Only show the constellation under the screen centre.
    pub show_only_pointed: bool,
    /// Brightness multiplier for illustrations.
    pub illustrations_bscale: f64,
}

/// Label layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelsConfig {
    /// Allowed overlap in window units before a floating label is hidden.
    pub max_overlap: f64,
    /// Fade in/out time in seconds.
    pub fade_duration: f64,
    /// Maximum distance in window units for label picking.
    pub hit_tolerance: f64,
}

/// Sky culture data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CultureConfig {
    /// Sky culture definition (RON).
    pub culture_file: PathBuf,
    /// Star catalogue (RON).
    pub star_file: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Number of frames rendered by the headless driver.
    pub frames: u32,
}

// --- Default implementations ---

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pixel_scale: 1.0,
            fov_deg: 60.0,
            y_offset: 0.0,
            ra_deg: 85.0,
            dec_deg: 0.0,
            start_tt: 51544.5,
            time_speed: 0.0,
            lang: "en".to_string(),
        }
    }
}

impl Default for ConstellationsConfig {
    fn default() -> Self {
        Self {
            lines_visible: true,
            labels_visible: true,
            images_visible: false,
            bounds_visible: false,
            lines_animation: true,
            show_only_pointed: true,
            illustrations_bscale: 1.0,
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            max_overlap: 8.0,
            fade_duration: 0.2,
            hit_tolerance: 5.0,
        }
    }
}

impl Default for CultureConfig {
    fn default() -> Self {
        Self {
            culture_file: PathBuf::from("assets/western.ron"),
            star_file: PathBuf::from("assets/stars.ron"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 120,
        }
    }
}

// --- Persistence ---

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(ConfigError::ParseError)
}

impl Config {
    /// Read `config.ron` from `config_dir`, writing the defaults there
    /// first if the file does not exist.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Self::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            return Ok(config);
        }
        let config = read_file(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty RON to `config_dir/config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ConfigError::WriteError { path, source }
        };
        std::fs::create_dir_all(config_dir).map_err(write_error(config_dir))?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        let path = config_dir.join(CONFIG_FILE);
        std::fs::write(&path, text).map_err(write_error(&path))
    }

    /// Re-read the file. `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_file(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(fresh))
    }
}
