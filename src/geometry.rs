use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::color::Color;
use crate::light::{ Material, Albedo };
use crate::pattern::{ Pattern, CheckerPattern };
use crate::consts::VACUUM_RI;

/// A sphere with a center, a radius and a material.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Tuple3D,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Tuple3D, radius: f64, material: Material) -> Sphere {
        Sphere { center, radius, material }
    }

    /// Finds the distance along a ray to the nearest point on this sphere.
    ///
    /// The ray direction must be unit length. `t` is found geometrically:
    /// `tca` is the distance along the ray to the point closest to the
    /// center, and `thc` is half the chord the ray cuts through the sphere.
    ///
    /// A sphere whose center lies behind the ray origin (`tca < 0`) is never
    /// hit, even when the origin is inside that sphere. Secondary rays leaving
    /// the inside of a sphere away from its center therefore escape it.
    pub fn intersect(&self, ray: &Ray3D) -> Option<f64> {
        let l = self.center - ray.origin;
        let tca = l.dot(&ray.direction);
        if tca < 0.0 {
            return None;
        }

        let d2 = l.dot(&l) - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        // The origin is inside the sphere; the far side is the hit
        let t = if t0 < 0.0 { t1 } else { t0 };
        if t < 0.0 {
            None
        } else {
            Some(t)
        }
    }

    /// Returns the outward normal at a point on the sphere.
    pub fn normal_at(&self, at: &Tuple3D) -> Tuple3D {
        (*at - self.center).normalize()
    }
}

/// A horizontal, checkered, rectangular floor tile.
///
/// The floor lies in the plane `y = height` and only exists for `x` strictly
/// within `x_bounds` and `z` strictly within `z_bounds`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Floor {
    pub height: f64,
    pub x_bounds: (f64, f64),
    pub z_bounds: (f64, f64),
    pub pattern: CheckerPattern,

    /// Template for the material of every hit; its diffuse color is replaced
    /// by the pattern color at the hit point.
    pub material: Material,
}

impl Default for Floor {
    fn default() -> Floor {
        Floor {
            height: -4.0,
            x_bounds: (-10.0, 10.0),
            z_bounds: (-30.0, -10.0),
            pattern: CheckerPattern::default(),
            material: Material::new(
                Albedo::new(1.0, 0.2, 0.0, 0.0),
                Color::black(),
                50.0,
                VACUUM_RI,
            ),
        }
    }
}

impl Floor {
    /// Rays flatter than this never hit the floor.
    const MIN_SLOPE: f64 = 1e-3;

    /// Finds the distance along a ray to the floor, if it hits.
    pub fn intersect(&self, ray: &Ray3D) -> Option<f64> {
        if ray.direction.y.abs() <= Self::MIN_SLOPE {
            return None;
        }

        let t = -(ray.origin.y - self.height) / ray.direction.y;
        if t <= 0.0 {
            return None;
        }

        let p = ray.position(t);
        let inside_x = p.x > self.x_bounds.0 && p.x < self.x_bounds.1;
        let inside_z = p.z > self.z_bounds.0 && p.z < self.z_bounds.1;

        if inside_x && inside_z {
            Some(t)
        } else {
            None
        }
    }

    pub fn normal_at(&self, _at: &Tuple3D) -> Tuple3D {
        Tuple3D::new(0.0, 1.0, 0.0)
    }

    /// The material at a point on the floor, colored by the checker pattern.
    pub fn material_at(&self, at: &Tuple3D) -> Material {
        Material {
            diffuse_color: self.pattern.pattern_at(*at),
            ..self.material
        }
    }
}

#[test]
fn ray_from_center_hits_at_radius() {
    let s = Sphere::new(Tuple3D::new(1.0, -2.0, 3.0), 2.5,
        Default::default());
    let directions = [
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(-1.0, 0.0, 0.0),
        Tuple3D::new(0.3, -0.4, 0.5).normalize(),
    ];

    for d in directions.iter() {
        let r = Ray3D::new(s.center, *d);
        let t = s.intersect(&r).expect("Ray from center should hit sphere.");

        assert!(crate::feq(t, 2.5));
    }
}

#[test]
fn ray_through_sphere_hits_near_side() {
    let s = Sphere::new(Tuple3D::new(0.0, 0.0, -5.0), 1.0,
        Default::default());
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), Some(4.0));
}

#[test]
fn ray_pointing_away_misses() {
    let s = Sphere::new(Tuple3D::new(0.0, 0.0, -5.0), 1.0,
        Default::default());
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_passing_beside_misses() {
    let s = Sphere::new(Tuple3D::new(0.0, 2.0, -5.0), 1.0,
        Default::default());
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Sphere::new(Tuple3D::new(0.0, 1.0, -5.0), 1.0,
        Default::default());
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), Some(5.0));
}

#[test]
fn ray_inside_facing_away_from_center_misses() {
    // The center is behind the origin, so the sphere is rejected outright.
    let s = Sphere::new(Tuple3D::zero(), 2.0, Default::default());
    let r = Ray3D::new(Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Sphere::new(Tuple3D::new(1.0, 1.0, 1.0), 1.0, Default::default());
    let v = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(&Tuple3D::new(1.0 + v, 1.0 + v, 1.0 + v));

    assert_eq!(n, Tuple3D::new(v, v, v));
}

#[test]
fn ray_hits_floor_from_above() {
    let f = Floor::default();
    let r = Ray3D::new(Tuple3D::new(0.0, 0.0, -20.0),
        Tuple3D::new(0.0, -1.0, 0.0));

    assert_eq!(f.intersect(&r), Some(4.0));
}

#[test]
fn ray_hits_floor_from_below() {
    let f = Floor::default();
    let r = Ray3D::new(Tuple3D::new(0.0, -6.0, -20.0),
        Tuple3D::new(0.0, 1.0, 0.0));

    assert_eq!(f.intersect(&r), Some(2.0));
}

#[test]
fn floor_is_bounded() {
    let f = Floor::default();
    let down = Tuple3D::new(0.0, -1.0, 0.0);

    assert_eq!(f.intersect(&Ray3D::new(Tuple3D::new(0.0, 0.0, -5.0), down)),
        None);
    assert_eq!(f.intersect(&Ray3D::new(Tuple3D::new(10.0, 0.0, -20.0), down)),
        None);
    assert_eq!(f.intersect(&Ray3D::new(Tuple3D::new(0.0, 0.0, -30.5), down)),
        None);
}

#[test]
fn floor_ignores_flat_and_receding_rays() {
    let f = Floor::default();
    let origin = Tuple3D::new(0.0, 0.0, -20.0);

    let flat = Tuple3D::new(1.0, 0.0005, 0.0).normalize();
    assert_eq!(f.intersect(&Ray3D::new(origin, flat)), None);

    let up = Tuple3D::new(0.0, 1.0, 0.0);
    assert_eq!(f.intersect(&Ray3D::new(origin, up)), None);
}

#[test]
fn floor_material_follows_checker() {
    let f = Floor::default();
    let a = f.material_at(&Tuple3D::new(0.5, -4.0, -20.5));
    let b = f.material_at(&Tuple3D::new(2.5, -4.0, -20.5));

    assert_ne!(a.diffuse_color, b.diffuse_color);
    assert_eq!(a.albedo, Albedo::new(1.0, 0.2, 0.0, 0.0));
    assert_eq!(a.specular_exponent, 50.0);
    assert_eq!(a.refractive_index, 1.0);
}
