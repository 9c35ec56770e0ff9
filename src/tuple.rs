use std::ops::{ Add, Sub, Neg, Mul };

use crate::feq;
use crate::consts::VACUUM_RI;

/// A 3D tuple, used for both points and direction vectors.
///
/// Unlike a homogeneous tuple, there is no `w` component; whether a tuple is
/// a point or a vector is decided by how it is used.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple3D {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl PartialEq for Tuple3D {
    fn eq(&self, other: &Tuple3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl From<[f64; 3]> for Tuple3D {
    fn from(v: [f64; 3]) -> Tuple3D {
        Tuple3D { x: v[0], y: v[1], z: v[2] }
    }
}

impl Tuple3D {
    pub fn new(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    pub fn zero() -> Tuple3D {
        Tuple3D { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales a tuple to unit length.
    ///
    /// A zero-length tuple has no direction, and is returned unchanged.
    pub fn normalize(&self) -> Tuple3D {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self * (1.0 / mag)
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Tuple3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple3D) -> Tuple3D {
        *self - (*normal * 2.0 * self.dot(normal))
    }

    /// Refracts a vector through a surface with Snell's law.
    ///
    /// The incident vector travels from a medium with index `eta_i` into one
    /// with index `eta_t`. If the vector points out of the surface (it lies on
    /// the same side as `normal`), the normal is flipped and the indices are
    /// swapped, so the same call handles rays entering and leaving an object.
    ///
    /// On total internal reflection, the direction `(1, 0, 0)` is returned in
    /// place of a refracted vector. The result is not normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tiny_ray_tracer::tuple::Tuple3D;
    /// let i = Tuple3D::new(0.0, -1.0, 0.0);
    /// let n = Tuple3D::new(0.0, 1.0, 0.0);
    ///
    /// // Nothing bends at normal incidence
    /// assert_eq!(i.refract(&n, 1.5, 1.0), i);
    /// ```
    pub fn refract(&self, normal: &Tuple3D, eta_t: f64, eta_i: f64)
        -> Tuple3D {
        let cos_i = -self.dot(normal).max(-1.0).min(1.0);

        // The ray is inside the object; swap the media and flip the normal
        if cos_i < 0.0 {
            return self.refract(&-*normal, eta_i, eta_t);
        }

        let eta = eta_i / eta_t;
        let k = 1.0 - eta.powi(2) * (1.0 - cos_i.powi(2));

        if k < 0.0 {
            Tuple3D::new(1.0, 0.0, 0.0)
        } else {
            *self * eta + *normal * (eta * cos_i - k.sqrt())
        }
    }

    /// Refracts a vector entering a material from vacuum.
    pub fn refract_from_vacuum(&self, normal: &Tuple3D, eta_t: f64)
        -> Tuple3D {
        self.refract(normal, eta_t, VACUUM_RI)
    }
}

impl Add for Tuple3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Tuple3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Tuple3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a 3D tuple.
///
/// ```
/// use tiny_ray_tracer::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Tuple3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a 3D tuple.
///
/// ```rust
/// use tiny_ray_tracer::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * t, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Tuple3D> for f64 {
    type Output = Tuple3D;

    fn mul(self, other: Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

/* Tests */

#[test]
fn add_tuples() {
    let a1 = Tuple3D::new(3.0, -2.0, 5.0);
    let a2 = Tuple3D::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Tuple3D::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_tuples() {
    let p1 = Tuple3D::new(3.0, 2.0, 1.0);
    let p2 = Tuple3D::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple3D::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Tuple3D::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_fraction() {
    let a = Tuple3D::new(1.0, -2.0, 3.0);

    assert_eq!(a * 0.5, Tuple3D::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Tuple3D::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple3D::new(1.0, 2.0, 3.0);
    let e = Tuple3D::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalize_zero_is_identity() {
    let v = Tuple3D::zero();
    let n = v.normalize();

    assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    assert_eq!(n, Tuple3D::zero());
}

#[test]
fn dot_vectors() {
    let a = Tuple3D::new(1.0, 2.0, 3.0);
    let b = Tuple3D::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple3D::new(1.0, 2.0, 3.0);
    let b = Tuple3D::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple3D::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple3D::new(1.0, -2.0, 1.0));
}

#[test]
fn reflect_45() {
    let v = Tuple3D::new(1.0, -1.0, 0.0);
    let n = Tuple3D::new(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple3D::new(1.0, 1.0, 0.0));
}

#[test]
fn reflect_twice_is_identity() {
    let n = Tuple3D::new(1.0, 2.0, -0.5).normalize();
    let directions = [
        Tuple3D::new(0.3, -0.8, 0.1),
        Tuple3D::new(-1.0, 0.0, 0.0),
        Tuple3D::new(0.0, 0.6, -0.8),
    ];

    for i in directions.iter() {
        assert_eq!(i.reflect(&n).reflect(&n), *i);
    }
}

#[test]
fn refract_equal_indices_does_not_bend() {
    let n = Tuple3D::new(0.0, 1.0, 0.0);
    let entering = Tuple3D::new(0.6, -0.8, 0.0);
    let leaving = Tuple3D::new(0.6, 0.8, 0.0);

    assert_eq!(entering.refract(&n, 1.33, 1.33), entering);
    assert_eq!(leaving.refract(&n, 1.33, 1.33), leaving);
}

#[test]
fn refract_bends_towards_normal() {
    let n = Tuple3D::new(0.0, 1.0, 0.0);
    let i = Tuple3D::new(0.6, -0.8, 0.0);
    let t = i.refract_from_vacuum(&n, 1.5).normalize();

    // sin(theta_t) = sin(theta_i) / 1.5
    assert!(feq(t.x, 0.4));
    assert!(t.y < 0.0);
}

#[test]
fn refract_total_internal_reflection_sentinel() {
    // Leaving glass at a grazing angle
    let n = Tuple3D::new(0.0, 1.0, 0.0);
    let i = Tuple3D::new(0.9, 0.1, 0.0).normalize();

    assert_eq!(i.refract(&n, 1.5, 1.0), Tuple3D::new(1.0, 0.0, 0.0));
}
