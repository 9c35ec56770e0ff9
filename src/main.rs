use std::path::PathBuf;

use anyhow::{ ensure, Context, Result };
use clap::Parser;
use log::info;

use tiny_ray_tracer::camera::Camera;
use tiny_ray_tracer::canvas::Canvas;
use tiny_ray_tracer::environment::{ Background, EnvironmentMap };
use tiny_ray_tracer::parallel::parallel_render;
use tiny_ray_tracer::scene::Scene;
use tiny_ray_tracer::consts::OUT_FILE;

/// Renders spheres over a checkered floor with reflections, refractions and
/// hard shadows.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON scene description; the reference scene is drawn without one
    #[clap(short, long)]
    scene: Option<PathBuf>,

    /// Panoramic image seen by rays that leave the scene
    #[clap(short, long)]
    environment: Option<PathBuf>,

    /// Output image; the extension picks the format
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Image width in pixels
    #[clap(long)]
    width: Option<usize>,

    /// Image height in pixels
    #[clap(long)]
    height: Option<usize>,

    /// Vertical field of view, in radians
    #[clap(long)]
    fov: Option<f64>,

    /// Reflection and refraction recursion limit
    #[clap(long)]
    max_depth: Option<usize>,

    /// Render on this many threads (0 for one per core)
    #[clap(short, long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {:?}", path))?,
        None => Scene::default(),
    };

    // Command line values win over the scene description
    if let Some(fov) = args.fov {
        ensure!(fov > 0.0 && fov < std::f64::consts::PI,
            "field of view {} is not within (0, pi)", fov);
    }
    let camera = Camera::new(
        args.width.unwrap_or(scene.camera.hsize),
        args.height.unwrap_or(scene.camera.vsize),
        args.fov.unwrap_or(scene.camera.field_of_view),
    );
    if let Some(max_depth) = args.max_depth {
        scene.world.max_depth = max_depth;
    }
    if args.environment.is_some() {
        scene.environment = args.environment.clone();
    }

    // Everything is loaded before the first pixel, so failures leave no image
    let environment = match &scene.environment {
        Some(path) => Some(EnvironmentMap::load(path)
            .context("failed to load environment map")?),
        None => None,
    };
    let background: &(dyn Background + Sync) = match &environment {
        Some(map) => map,
        None => &scene.background,
    };

    let canvas: Canvas = match args.threads {
        Some(threads) => parallel_render(&scene.world, &camera, background,
            threads)?,
        None => camera.render(&scene.world, background),
    };

    canvas.save(&args.output).context("failed to write output image")?;
    info!("Done.");

    Ok(())
}
