use crate::tuple::Tuple3D;
use crate::color::Color;

pub trait Pattern {
    fn pattern_at(&self, p: Tuple3D) -> Color;
}

/// An alternating checker pattern laid across the XZ plane.
///
/// Tiles are `tile_size` wide. For a point `(x, y, z)`, if
/// `floor(x / tile_size) + floor(z / tile_size)` is even, the `primary` color
/// is applied to that point; otherwise, the `secondary` color is used. The Y
/// coordinate is ignored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckerPattern {
    primary: Color,
    secondary: Color,
    tile_size: f64,
}

impl Default for CheckerPattern {
    fn default() -> CheckerPattern {
        CheckerPattern::new(Color::gray(0.3), Color::rgb(0.3, 0.2, 0.1))
    }
}

impl CheckerPattern {
    /// Creates a checker pattern with 2-unit tiles.
    pub fn new(primary: Color, secondary: Color) -> CheckerPattern {
        CheckerPattern { primary, secondary, tile_size: 2.0 }
    }

    pub fn with_tile_size(mut self, tile_size: f64) -> CheckerPattern {
        self.tile_size = tile_size;
        self
    }

    pub fn checker_at(&self, p: Tuple3D) -> Color {
        let scale = 1.0 / self.tile_size;
        let tile = (scale * p.x).floor() + (scale * p.z).floor();

        if tile.rem_euclid(2.0) == 0.0 {
            self.primary
        } else {
            self.secondary
        }
    }
}

impl Pattern for CheckerPattern {
    fn pattern_at(&self, p: Tuple3D) -> Color {
        self.checker_at(p)
    }
}

#[test]
fn checker_pattern_is_constant_along_y() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    assert_eq!(pattern.checker_at(Tuple3D::new(0.5, 0.0, 0.5)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::new(0.5, -4.0, 0.5)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::new(0.5, 9.0, 0.5)),
        Color::white());
}

#[test]
fn checker_pattern_flips_every_two_units_along_x() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    assert_eq!(pattern.checker_at(Tuple3D::new( 0.0, 0.0, 0.5)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::new( 1.9, 0.0, 0.5)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::new( 2.0, 0.0, 0.5)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::new( 4.0, 0.0, 0.5)),
        Color::white());
    assert_eq!(pattern.checker_at(Tuple3D::new(-0.1, 0.0, 0.5)),
        Color::black());
    assert_eq!(pattern.checker_at(Tuple3D::new(-2.1, 0.0, 0.5)),
        Color::white());
}

#[test]
fn checker_pattern_flips_every_two_units_along_z() {
    let pattern = CheckerPattern::new(Color::white(), Color::black());

    for n in -10..10 {
        let z = n as f64 * 2.0 + 0.5;
        let here = pattern.checker_at(Tuple3D::new(0.5, 0.0, z));
        let next = pattern.checker_at(Tuple3D::new(0.5, 0.0, z + 2.0));

        assert_ne!(here, next);
    }
}

#[test]
fn checker_pattern_respects_tile_size() {
    let pattern = CheckerPattern::new(Color::white(), Color::black())
        .with_tile_size(1.0);

    assert_eq!(pattern.pattern_at(Tuple3D::new(0.5, 0.0, 0.5)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple3D::new(1.5, 0.0, 0.5)),
        Color::black());
}
