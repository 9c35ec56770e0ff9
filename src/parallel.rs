use log::info;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::environment::Background;
use crate::error::RenderError;

/// Renders a world with a pool of worker threads, one scanline per task.
///
/// Each scanline only writes its own row of the canvas, and the world and
/// background are only read, so the result is identical to `Camera::render`.
/// A `threads` count of zero lets rayon pick one thread per core.
pub fn parallel_render(world: &World, camera: &Camera,
    background: &(dyn Background + Sync), threads: usize)
    -> Result<Canvas, RenderError> {
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    let hsize = camera.hsize;
    let vsize = camera.vsize;

    info!("Rendering {}x{} pixels using {} threads...",
        hsize, vsize, pool.current_num_threads());

    let mut canvas = Canvas::new(hsize, vsize);
    if hsize > 0 {
        pool.install(|| {
            let rows = canvas.pixels_mut().par_chunks_mut(hsize);
            rows.enumerate().for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let ray = camera.ray_for_pixel(x, y);
                    *pixel = world.color_at(&ray, background, 0);
                }
            });
        });
    }

    Ok(canvas)
}

#[test]
fn parallel_matches_sequential() {
    use crate::color::Color;

    let world = World::default();
    let camera = Camera::new(32, 24, std::f64::consts::PI / 3.0);
    let background = Color::rgb(0.2, 0.7, 0.8);

    let sequential = camera.render(&world, &background);
    let parallel = parallel_render(&world, &camera, &background, 3).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn parallel_render_of_empty_canvas() {
    use crate::color::Color;

    let world = World::default();
    let camera = Camera::new(0, 0, std::f64::consts::PI / 3.0);
    let canvas = parallel_render(&world, &camera, &Color::black(), 1).unwrap();

    assert_eq!(canvas, Canvas::new(0, 0));
}
