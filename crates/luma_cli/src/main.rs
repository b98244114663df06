//! luma - render a scene file (or the built-in demo) to an image.

mod cli;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use luma_core::{load_scene, SceneDescription};
use luma_renderer::{save_image, Camera, RenderConfig, RenderSession, Scene};

use cli::Args;

/// How often the main thread reports render progress.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let description = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the demo scene");
            SceneDescription::demo(args.seed.unwrap_or_default())
        }
    };

    // defaults < scene file < command line
    let settings = description.render.merged(&args.render_settings());
    let config = RenderConfig::from_settings(&settings);

    let scene = Scene::from_description(&description)
        .with_context(|| format!("Invalid scene '{}'", description.name))?;
    let camera = Camera::from_desc(&description.camera);

    let session = RenderSession::new(&scene, &camera, config).context("Invalid render settings")?;

    thread::scope(|s| -> Result<()> {
        let render = s.spawn(|| session.run());

        while !render.is_finished() {
            thread::sleep(PROGRESS_INTERVAL);
            let progress = session.progress();
            log::info!(
                "Tiles started: {}/{} ({:.0}%)",
                progress.claimed,
                progress.total,
                progress.fraction() * 100.0
            );
        }

        match render.join() {
            Ok(result) => result.context("Render failed"),
            Err(_) => anyhow::bail!("Render thread panicked"),
        }
    })?;

    let image = session.into_image();
    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
