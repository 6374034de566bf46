use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use structopt::StructOpt;
use ve_viewer::prelude::*;
use ve_viewer::renderer::HeadlessBackend;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "ve_viewer", about = "Loads a scene and simulates frames without a window")]
struct CliArgs {
    /// The scene descriptor (`scene.toml`)
    scene: PathBuf,
    /// Viewer settings; defaults are used if omitted
    #[structopt(short = "c", long = "config")]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[structopt(short = "f", long = "frames", default_value = "60")]
    frames: u32,
    /// Key names to hold down during the simulation, e.g. `--hold W --hold Space`
    #[structopt(long = "hold")]
    hold: Vec<String>,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };

    let mut backend = HeadlessBackend::new();
    let scene = Scene::load(&args.scene, &mut backend)
        .with_context(|| format!("Could not build scene `{}`", args.scene.display()))?;
    info!(
        "Uploaded {} meshes and {} textures",
        backend.mesh_uploads(),
        backend.texture_uploads()
    );

    let mut input = Input::new(config.keys.clone());
    for name in &args.hold {
        if !input.key_named(name, true) {
            warn!("Key `{}` is not bound to anything", name);
        }
    }

    let delta = 1.0 / config.window.target_fps.max(1) as f32;
    let mut game_loop = GameLoop::new(scene, config);

    let mut draws = 0;
    for frame in 0..args.frames {
        let output = game_loop.update(&input.snapshot(), delta);
        debug!("Frame {}: {} draw calls", frame, output.draws.len());
        draws = output.draws.len();
    }

    let camera = game_loop.camera();
    info!(
        "Simulated {} frames: {} draw calls per frame, camera at {} (yaw {:.1}°, pitch {:.1}°)",
        args.frames,
        draws,
        camera.position(),
        camera.yaw(),
        camera.pitch()
    );

    Ok(())
}
