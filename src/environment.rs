use std::f64::consts::PI;
use std::path::Path;

use log::info;

use crate::color::Color;
use crate::tuple::Tuple3D;
use crate::error::RenderError;

/// Whatever a ray sees when it leaves the scene.
pub trait Background {
    /// The color seen along a unit `direction`.
    fn background_at(&self, direction: &Tuple3D) -> Color;
}

/// A solid color background. Every escaping ray sees the same color.
impl Background for Color {
    fn background_at(&self, _direction: &Tuple3D) -> Color {
        *self
    }
}

/// A panoramic image wrapped around the scene.
///
/// Pixels are stored row-major and normalized to [0, 1]. Directions map to the
/// image with an equirectangular projection: longitude across, latitude down.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentMap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl EnvironmentMap {
    /// Creates an environment map from row-major pixels.
    ///
    /// Returns `None` if the dimensions don't match the pixel count, or if the
    /// map would be empty.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>)
        -> Option<EnvironmentMap> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }

        Some(EnvironmentMap { width, height, pixels })
    }

    /// Loads and decodes an environment map from an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<EnvironmentMap, RenderError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| RenderError::EnvironmentMap {
                path: path.into(),
                source,
            })?
            .into_rgb8();

        let (width, height) = decoded.dimensions();
        let pixels = decoded.pixels().map(|p| Color::from_rgb8(p.0)).collect();

        let map = EnvironmentMap::from_pixels(
            width as usize, height as usize, pixels
        ).ok_or_else(|| RenderError::EmptyEnvironmentMap(path.into()))?;

        info!("Loaded {}x{} environment map from {:?}.",
            map.width, map.height, path);
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reads a pixel. Coordinates are clamped to the map.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);

        self.pixels[x + y * self.width]
    }
}

impl Background for EnvironmentMap {
    fn background_at(&self, direction: &Tuple3D) -> Color {
        let d = direction.normalize();
        let u = 0.5 + d.z.atan2(d.x) / (2.0 * PI);
        let v = 0.5 - d.y.max(-1.0).min(1.0).asin() / PI;

        // Negative products saturate to zero on the cast
        let x = (u * self.width as f64) as usize;
        let y = (v * self.height as f64) as usize;

        self.pixel(x, y)
    }
}

#[cfg(test)]
fn gradient_map() -> EnvironmentMap {
    // 4x2: top row is bright, bottom row is dark, columns differ in red
    let mut pixels = Vec::new();
    for y in 0..2 {
        for x in 0..4 {
            pixels.push(Color::rgb(x as f64 / 4.0, 1.0 - y as f64, 0.5));
        }
    }

    EnvironmentMap::from_pixels(4, 2, pixels).unwrap()
}

#[test]
fn solid_background_ignores_direction() {
    let bg = Color::rgb(0.2, 0.7, 0.8);

    assert_eq!(bg.background_at(&Tuple3D::new(0.0, 1.0, 0.0)), bg);
    assert_eq!(bg.background_at(&Tuple3D::new(0.0, 0.0, -1.0)), bg);
}

#[test]
fn mismatched_pixels_are_rejected() {
    assert!(EnvironmentMap::from_pixels(2, 2, vec![Color::black(); 3])
        .is_none());
    assert!(EnvironmentMap::from_pixels(0, 0, Vec::new()).is_none());
}

#[test]
fn up_and_down_sample_top_and_bottom_rows() {
    let map = gradient_map();

    let up = map.background_at(&Tuple3D::new(0.0, 1.0, 0.0));
    let down = map.background_at(&Tuple3D::new(0.0, -1.0, 0.0));

    assert_eq!(up.g, 1.0);
    assert_eq!(down.g, 0.0);
}

#[test]
fn longitude_selects_column() {
    let map = gradient_map();

    // atan2(0, -1) = pi, so u = 1 and the column clamps to the last one
    let west = map.background_at(&Tuple3D::new(-1.0, 0.0, 0.0));
    assert_eq!(west.r, 0.75);

    // atan2(0, 1) = 0, so u = 0.5
    let east = map.background_at(&Tuple3D::new(1.0, 0.0, 0.0));
    assert_eq!(east.r, 0.5);

    // atan2(-1, 0) = -pi/2, so u = 0.25
    let forward = map.background_at(&Tuple3D::new(0.0, 0.0, -1.0));
    assert_eq!(forward.r, 0.25);
}

#[test]
fn dimensions_match_pixels() {
    let map = gradient_map();

    assert_eq!((map.width(), map.height()), (4, 2));
    assert_eq!(map.pixel(map.width() - 1, map.height() - 1),
        Color::rgb(0.75, 0.0, 0.5));
}

#[test]
fn pixel_reads_are_clamped() {
    let map = gradient_map();

    assert_eq!(map.pixel(100, 100), map.pixel(3, 1));
}

#[test]
fn loading_missing_file_fails() {
    let result = EnvironmentMap::load("./does/not/exist.png");

    assert!(matches!(result, Err(RenderError::EnvironmentMap { .. })));
}
