use std::ops::{ Add, Mul };

use crate::feq;

/// A color, or more precisely, an amount of linear radiance.
///
/// Represented conventionally with red-green-blue (RGB) values. While shading,
/// components are unbounded and frequently exceed 1.0; they are only squeezed
/// into the displayable range by `tone_map` and `to_rgb8`.
///
/// # Examples
///
/// Modulate a surface color by a light:
///
/// ```
/// # use tiny_ray_tracer::color::Color;
/// let surface = Color::rgb(0.4, 0.4, 0.3);
/// let lit = surface * 1.5;
/// assert_eq!(lit, Color::rgb(0.6, 0.6, 0.45));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// A gray with all three components set to `v`.
    pub fn gray(v: f64) -> Color {
        Color { r: v, g: v, b: v }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::gray(0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::gray(1.0)
    }

    /// Converts 8-bit channels to a color in the range [0, 1].
    pub fn from_rgb8(rgb: [u8; 3]) -> Color {
        Color {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
        }
    }

    /// The brightest of the three components.
    pub fn max_component(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }

    /// Brings an overexposed color back into range without shifting its hue.
    ///
    /// If the largest component exceeds 1.0, all components are divided by it.
    /// Otherwise the color is returned untouched. No gamma is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tiny_ray_tracer::color::Color;
    /// let hot = Color::rgb(4.0, 2.0, 1.0);
    /// assert_eq!(hot.tone_map(), Color::rgb(1.0, 0.5, 0.25));
    ///
    /// let fine = Color::rgb(0.5, 0.2, 0.1);
    /// assert_eq!(fine.tone_map(), fine);
    /// ```
    pub fn tone_map(&self) -> Color {
        let max = self.max_component();
        if max > 1.0 {
            *self * (1.0 / max)
        } else {
            *self
        }
    }

    /// Quantizes a color to 8 bits per channel.
    ///
    /// Components are clamped to [0, 1] and scaled to [0, 255], truncating
    /// any fractional part.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |c: f64| (255.0 * c.max(0.0).min(1.0)) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn tone_map_preserves_hue() {
    let c = Color::rgb(3.0, 1.5, 0.0);
    let t = c.tone_map();

    assert_eq!(t, Color::rgb(1.0, 0.5, 0.0));
    assert!(feq(t.g / t.r, c.g / c.r));
}

#[test]
fn tone_map_leaves_dim_colors_alone() {
    let c = Color::rgb(1.0, 0.999, 0.2);

    assert_eq!(c.tone_map(), c);
}

#[test]
fn quantize_clamps_and_truncates() {
    assert_eq!(Color::rgb(-0.5, 0.5, 2.0).to_rgb8(), [0, 127, 255]);
    assert_eq!(Color::white().to_rgb8(), [255, 255, 255]);
    assert_eq!(Color::black().to_rgb8(), [0, 0, 0]);
}

#[test]
fn rgb8_normalizes_to_unit_range() {
    assert_eq!(Color::from_rgb8([255, 0, 51]), Color::rgb(1.0, 0.0, 0.2));
}
