use std::path::Path;

use image::RgbImage;
use log::info;

use crate::color::Color;
use crate::error::RenderError;

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`.
///
/// The canvas stores the resultant radiance for each pixel ray, unclamped.
/// Once execution finishes, the `Canvas` is tone mapped and quantized into an
/// 8-bit image, which can be saved in any format the `image` crate encodes.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Creates a canvas from row-major pixels.
    ///
    /// Returns `None` if the pixel count doesn't match the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>)
        -> Option<Canvas> {
        if pixels.len() != width * height {
            return None;
        }

        Some(Canvas { width, height, pixels })
    }

    /// The pixels as a flat, row-major slice.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use tiny_ray_tracer::color::Color;
    /// # use tiny_ray_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Converts the canvas to a displayable 8-bit RGB image.
    ///
    /// Each pixel is tone mapped (scaled down if any component exceeds 1.0),
    /// then clamped and quantized. No gamma correction is applied.
    pub fn to_image(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width as u32, self.height as u32);

        for (i, pixel) in out.pixels_mut().enumerate() {
            pixel.0 = self.pixels[i].tone_map().to_rgb8();
        }

        out
    }

    /// Saves the canvas to an image file.
    ///
    /// The format is chosen from the extension of `path` (PNG, JPEG, or
    /// PPM).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        self.to_image().save(path)
            .map_err(|source| RenderError::Save { path: path.into(), source })?;

        info!("Saved render to {:?}.", path);
        Ok(())
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.read_pixel(0, 0).unwrap(), Color::black());
    assert_eq!(c.read_pixel(9, 19).unwrap(), Color::black());
    assert_eq!(c.read_pixel(10, 0), None);
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::white());

    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn image_is_tone_mapped_and_quantized() {
    let pixels = vec![
        Color::rgb(2.0, 1.0, 0.0),
        Color::rgb(0.5, 0.25, 1.0),
        Color::rgb(-1.0, 0.0, 0.0),
        Color::rgb(10.0, 10.0, 10.0),
    ];
    let c = Canvas::from_pixels(2, 2, pixels).unwrap();
    let img = c.to_image();

    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 127, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [127, 63, 255]);
    assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0]);
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255]);
}

#[test]
fn save_and_reload_png() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(1, 1, &Color::rgb(1.0, 0.0, 0.5));

    let path = std::env::temp_dir().join("tiny_ray_tracer_canvas_test.png");
    c.save(&path).unwrap();

    let reloaded = image::open(&path).unwrap().into_rgb8();
    assert_eq!(reloaded.dimensions(), (3, 2));
    assert_eq!(reloaded.get_pixel(1, 1).0, [255, 0, 127]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn save_to_unwritable_path_fails() {
    let c = Canvas::new(1, 1);
    let result = c.save("./no/such/directory/out.png");

    assert!(matches!(result, Err(RenderError::Save { .. })));
}
