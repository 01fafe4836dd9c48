//! driftfocus headless driver.
//!
//! Runs the viewport engine without a window: items are created through a
//! logging backend, input comes from a scripted JSON session, and the frame
//! loop advances at a fixed `--fps` for `--frames` frames.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --manifest gallery.json --script session.json
//! ```
//!
//! A script is a JSON array of `{ "frame": n, "event": { ... } }` objects,
//! see [`driftfocus::events::input::InputEvent`] for the event format.

use bevy_ecs::prelude::*;
use clap::Parser;
use driftfocus::gallery::{
    build_schedule, init_world, load_script, log_summary, run_frame, spawn_gallery,
};
use driftfocus::resources::backend::LogBackend;
use driftfocus::resources::manifest::{GalleryManifest, ManifestItem};
use driftfocus::resources::viewportconfig::ViewportConfig;
use std::path::PathBuf;

/// driftfocus viewport engine
#[derive(Parser)]
#[command(version, about = "Headless driver for the driftfocus viewport engine.")]
struct Cli {
    /// INI configuration file. Missing files fall back to defaults.
    #[arg(long, value_name = "PATH", default_value = "./driftfocus.ini")]
    config: PathBuf,

    /// JSON gallery manifest. A small demo gallery is used when omitted.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// JSON input script.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Write the default configuration to `--config` and exit.
    #[arg(long)]
    write_config: bool,
}

fn demo_manifest() -> GalleryManifest {
    let projects = ["harbor", "loom", "quarry"];
    let items = (0..12)
        .map(|i| ManifestItem {
            source: format!("demo/{}-{:02}.jpg", projects[i % projects.len()], i),
            project: projects[i % projects.len()].to_string(),
            width: Some(400.0),
            height: Some(300.0),
        })
        .collect();
    GalleryManifest { items }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ViewportConfig::with_path(cli.config.clone());
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            log::error!("{}", e);
            std::process::exit(1);
        }
        log::info!("default config written to {}", cli.config.display());
        return;
    }
    if let Err(e) = config.load_from_file() {
        log::info!("{}; using defaults", e);
    }

    let manifest = match &cli.manifest {
        Some(path) => match GalleryManifest::load_from_file(&path.to_string_lossy()) {
            Ok(m) => m,
            Err(e) => {
                log::error!("Failed to load manifest {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => demo_manifest(),
    };

    let script = match &cli.script {
        Some(path) => match load_script(&path.to_string_lossy()) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to load script {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    let fps = if cli.fps.is_finite() && cli.fps > 0.0 {
        cli.fps
    } else {
        log::warn!("invalid fps {}, using 60", cli.fps);
        60.0
    };
    let dt = 1.0 / fps;

    let mut world = World::new();
    let input = init_world(
        &mut world,
        config,
        Box::new(LogBackend::default()),
        Box::new(LogBackend::default()),
    );
    let items = spawn_gallery(&mut world, &manifest);
    log::info!(
        "gallery ready: {} items in {} projects",
        items.len(),
        manifest.projects().len()
    );

    let mut schedule = build_schedule();
    let mut pending = script.into_iter().peekable();
    for frame in 0..cli.frames {
        while let Some(step) = pending.next_if(|s| s.frame <= frame) {
            if input.send(step.event).is_err() {
                log::error!("input queue closed");
                std::process::exit(1);
            }
        }
        run_frame(&mut world, &mut schedule, dt);
    }
    if pending.peek().is_some() {
        log::warn!("script events after frame {} were not delivered", cli.frames);
    }
    log_summary(&world);
}
