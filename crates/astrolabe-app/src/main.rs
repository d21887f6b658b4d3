use std::path::PathBuf;

use clap::Parser;
use glam::DVec3;
use tracing::info;

use astrolabe_app::frame_loop::{FIXED_DT, FrameLoop};
use astrolabe_app::{Sky, SkyError};
use astrolabe_catalog::StarArena;
use astrolabe_config::{CliArgs, Config, default_config_dir};
use astrolabe_constellations::SkyCulture;
use astrolabe_log::init_logging;
use astrolabe_math::from_spherical;
use astrolabe_render::{DrawCommand, Observer, Painter, SkyPainter, TextureCache, Viewport};

/// Simulated frame time of the headless driver (30 fps).
const FRAME_TIME: f64 = 2.0 * FIXED_DT;

/// Everything one headless frame touches.
struct Headless {
    sky: Sky,
    painter: SkyPainter,
    start_tt: f64,
    time_speed: f64,
    last_frame: Vec<DrawCommand>,
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}, using the working directory");
            PathBuf::from(".")
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(err) = run(&config) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), SkyError> {
    let stars = StarArena::load(&config.culture.star_file)?;
    let culture = SkyCulture::load(&config.culture.culture_file)?;

    // The headless back-end has every illustration at hand.
    let mut textures = TextureCache::new();
    for path in culture.constellations.iter().filter_map(|c| c.image_path()) {
        textures.mark_ready(&path);
    }

    let mut sky = Sky::from_config(config, Box::new(stars), Box::new(textures));
    let keys = sky.load_culture(culture);

    let view = &config.view;
    let dir = from_spherical(view.ra_deg.to_radians(), view.dec_deg.to_radians());
    let observer = Observer::looking_at(view.start_tt, dir, DVec3::Z);
    let mut viewport = Viewport::new(
        f64::from(view.width),
        f64::from(view.height),
        view.pixel_scale,
        view.fov_deg.to_radians(),
    );
    viewport.y_offset = view.y_offset;

    let mut state = Headless {
        sky,
        painter: SkyPainter::new(observer, viewport),
        start_tt: view.start_tt,
        time_speed: view.time_speed,
        last_frame: Vec::new(),
    };

    let mut frame_loop = FrameLoop::new();
    for frame in 0..config.debug.frames {
        frame_loop.tick(
            FRAME_TIME,
            &mut state,
            |s, dt, sim_time| {
                let mut observer = s.painter.observer().clone();
                observer.set_tt(s.start_tt + (sim_time + dt) * s.time_speed);
                s.painter.set_observer(observer);
                s.sky.update(dt);
            },
            |s, _| {
                s.sky.render(&mut s.painter);
                s.last_frame = s.painter.take_commands();
            },
        );
        if frame == 0 {
            let locator = state.sky.figure_locator();
            info!("Locator built from {} figures", locator.len());
            state.sky.set_locator(Box::new(locator));
        }
    }

    let count = |f: fn(&DrawCommand) -> bool| state.last_frame.iter().filter(|c| f(c)).count();
    info!(
        frames = frame_loop.frame_count(),
        updates = frame_loop.update_count(),
        figures = keys.len(),
        lines = count(|c| matches!(c, DrawCommand::Line { .. })),
        images = count(|c| matches!(c, DrawCommand::Quad { .. })),
        texts = count(|c| matches!(c, DrawCommand::Text { .. })),
        "Headless run finished"
    );
    for cmd in &state.last_frame {
        if let DrawCommand::Text { text, pos, .. } = cmd {
            info!("Label '{text}' at ({:.0}, {:.0})", pos.x, pos.y);
        }
    }

    let centre = state.painter.viewport().window_size / 2.0;
    match state.sky.label_at(centre, config.labels.hit_tolerance) {
        Some(key) => {
            let id = state
                .sky
                .constellations()
                .and_then(|set| set.get(key))
                .map_or("?", |con| con.id());
            info!("Label under the screen centre belongs to {id}");
        }
        None => info!("No label under the screen centre"),
    }
    Ok(())
}
