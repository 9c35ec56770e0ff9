use log::info;

use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::world::World;
use crate::canvas::Canvas;
use crate::environment::Background;

/// A pinhole camera for generating a canvas.
///
/// The camera sits at the world origin and looks down the negative Z axis,
/// with Y up. Only the image size and the field of view can vary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// The vertical angle describing "how much" the camera can see.
    pub field_of_view: f64,

    /// Distance from the pinhole to the image plane, in pixels.
    focal_distance: f64,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let focal_distance = vsize as f64 / (2.0 * (field_of_view / 2.0).tan());

        Camera { hsize, vsize, field_of_view, focal_distance }
    }

    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray3D {
        // Offsets from the center of the canvas to the pixel's center
        let x = (px as f64 + 0.5) - self.hsize as f64 / 2.0;
        let y = -(py as f64 + 0.5) + self.vsize as f64 / 2.0;

        let direction = Tuple3D::new(x, y, -self.focal_distance).normalize();
        Ray3D::new(Tuple3D::zero(), direction)
    }

    /// Renders a world, one pixel after the other.
    ///
    /// The returned canvas holds raw radiance; see `Canvas::to_image` for
    /// the displayable version.
    pub fn render(&self, w: &World, background: &dyn Background) -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);

        info!("Rendering {}x{} pixels...", self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y);
                let color = w.color_at(&ray, background, 0);
                image.write_pixel(x, y, &color);
            }
        }

        image
    }
}

#[test]
fn ray_through_center() {
    let c = Camera::new(200, 100, std::f64::consts::PI / 2.0);

    // With an even size, the center lies between four pixels
    let r = c.ray_for_pixel(99, 49);
    assert_eq!(r.origin, Tuple3D::zero());
    assert!(r.direction.z < -0.999);
    assert!(r.direction.x < 0.0 && r.direction.y > 0.0);

    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(100, 50);
    assert_eq!(r.direction, Tuple3D::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(0, 0);

    // Top left: x = -100, y = 50, focal distance = 50.5
    let e = Tuple3D::new(-100.0, 50.0, -50.5).normalize();
    assert_eq!(r.direction, e);
}

#[test]
fn field_of_view_spans_image_height() {
    let fov = std::f64::consts::PI / 3.0;
    let c = Camera::new(1024, 768, fov);

    // The top edge of the image sits at half the field of view
    let top = Tuple3D::new(0.0, 384.0, -c.focal_distance).normalize();
    assert!(crate::feq(top.y.asin(), fov / 2.0));
}

#[test]
fn render_lone_sphere() {
    use crate::color::Color;
    use crate::geometry::Sphere;
    use crate::light::{ Albedo, Material, PointLight };

    let mut w = World::empty();
    w.spheres.push(Sphere::new(
        Tuple3D::new(-3.0, 0.0, -16.0),
        2.0,
        Material::new(Albedo::new(1.0, 0.0, 0.0, 0.0),
            Color::rgb(0.4, 0.4, 0.3), 1.0, 1.0),
    ));
    w.lights.push(PointLight::new(Tuple3D::new(-20.0, 20.0, 20.0), 1.5));

    let bg = Color::rgb(0.2, 0.7, 0.8);
    let c = Camera::new(64, 48, std::f64::consts::PI / 3.0);
    let image = c.render(&w, &bg);

    // The sphere sits left of the optical axis: -3/16 of the focal distance
    let focal = 48.0 / (2.0 * (std::f64::consts::PI / 6.0).tan());
    let px = (32.0 - 3.0 / 16.0 * focal) as usize;
    let sphere_pixel = image.read_pixel(px, 24).unwrap();
    assert_ne!(sphere_pixel, bg);

    // Far off to the upper right, beyond the sphere's angular radius
    assert_eq!(image.read_pixel(63, 0).unwrap(), bg);
    assert_eq!(image.read_pixel(60, 40).unwrap(), bg);
}
