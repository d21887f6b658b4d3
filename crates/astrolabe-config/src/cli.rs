//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Astrolabe command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "astrolabe", about = "Constellation and label renderer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub fov: Option<f64>,

    /// Right ascension of the view direction in degrees.
    #[arg(long)]
    pub ra: Option<f64>,

    /// Declination of the view direction in degrees.
    #[arg(long)]
    pub dec: Option<f64>,

    /// Label language.
    #[arg(long)]
    pub lang: Option<String>,

    /// Sky culture file.
    #[arg(long)]
    pub culture: Option<PathBuf>,

    /// Star catalogue file.
    #[arg(long)]
    pub stars: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Show constellation illustrations.
    #[arg(long)]
    pub images: Option<bool>,

    /// Show constellation boundaries.
    #[arg(long)]
    pub bounds: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.view.width = w;
        }
        if let Some(h) = args.height {
            self.view.height = h;
        }
        if let Some(fov) = args.fov {
            self.view.fov_deg = fov;
        }
        if let Some(ra) = args.ra {
            self.view.ra_deg = ra;
        }
        if let Some(dec) = args.dec {
            self.view.dec_deg = dec;
        }
        if let Some(ref lang) = args.lang {
            self.view.lang = lang.clone();
        }
        if let Some(ref path) = args.culture {
            self.culture.culture_file = path.clone();
        }
        if let Some(ref path) = args.stars {
            self.culture.star_file = path.clone();
        }
        if let Some(frames) = args.frames {
            self.debug.frames = frames;
        }
        if let Some(images) = args.images {
            self.constellations.images_visible = images;
        }
        if let Some(bounds) = args.bounds {
            self.constellations.bounds_visible = bounds;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
