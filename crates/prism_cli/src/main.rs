use anyhow::{bail, Context, Result};
use prism_core::{load_scene_file, RenderSettings};
use prism_renderer::{render_parallel, AbortHandle, Framebuffer, Progress, RenderSession, RenderState};
use std::env;
use std::time::Instant;

const USAGE: &str = "Usage: prism <scene-file> <output.png> [settings.json]";

/// Logs render progress every tenth of the image.
struct ProgressLog {
    last_decile: u32,
}

impl prism_renderer::DisplaySink for ProgressLog {
    fn show(&mut self, _framebuffer: &Framebuffer, progress: Progress) {
        let decile = (progress.fraction() * 10.0) as u32;
        if decile > self.last_decile {
            self.last_decile = decile;
            log::info!(
                "{:>3}% ({}/{} pixels)",
                decile * 10,
                progress.pixels_done,
                progress.pixels_total
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        bail!(USAGE);
    }
    let scene_path = &args[1];
    let output_path = &args[2];

    let settings = match args.get(3) {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => RenderSettings::default(),
    };

    let classified = load_scene_file(scene_path)
        .with_context(|| format!("Failed to load scene {}", scene_path))?;
    if classified.has_warnings() {
        for warning in &classified.warnings {
            eprintln!("warning: {}", warning);
        }
        log::warn!("{} scene elements skipped", classified.warnings.len());
    }
    let scene = classified.scene;

    let start = Instant::now();
    let framebuffer = if env::var("PRISM_PARALLEL").map_or(false, |v| v == "1") {
        render_parallel(&scene, &settings, &AbortHandle::new())?
    } else {
        let mut session = RenderSession::new(scene, settings);
        let state = session.run(&mut ProgressLog { last_decile: 0 })?;
        if state != RenderState::Finished {
            bail!("Render stopped in state {:?}", state);
        }
        session.into_framebuffer()
    };
    log::info!("Render time: {:.2?}", start.elapsed());

    framebuffer
        .save(output_path)
        .with_context(|| format!("Failed to write {}", output_path))?;
    log::info!("Saved to {}", output_path);

    Ok(())
}
