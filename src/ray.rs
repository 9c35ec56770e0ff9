use crate::tuple::Tuple3D;
use crate::consts::SURFACE_OFFSET;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray3D {
    pub origin: Tuple3D,
    pub direction: Tuple3D,
}

impl Ray3D {
    /// Creates a ray. The direction is expected to be unit length.
    pub fn new(origin: Tuple3D, direction: Tuple3D) -> Ray3D {
        Ray3D { origin, direction }
    }

    pub fn position(&self, t: f64) -> Tuple3D {
        self.origin + (t * self.direction)
    }

    /// Spawns a secondary ray leaving a surface at `point`.
    ///
    /// The origin is nudged off the surface along `normal`, towards whichever
    /// side `direction` is heading. Otherwise the new ray could immediately
    /// hit the surface it starts on.
    pub fn spawn(point: Tuple3D, normal: Tuple3D, direction: Tuple3D)
        -> Ray3D {
        let origin = if direction.dot(&normal) < 0.0 {
            point - normal * SURFACE_OFFSET
        } else {
            point + normal * SURFACE_OFFSET
        };

        Ray3D { origin, direction }
    }
}

#[test]
fn ray_position() {
    let r = Ray3D::new(
                Tuple3D::new(2.0, 3.0, 4.0),
                Tuple3D::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple3D::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple3D::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple3D::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple3D::new(4.5, 3.0, 4.0));
}

#[test]
fn spawned_ray_leaves_the_surface() {
    let point = Tuple3D::new(0.0, 0.0, 0.0);
    let normal = Tuple3D::new(0.0, 1.0, 0.0);

    let outward = Ray3D::spawn(point, normal, Tuple3D::new(0.0, 1.0, 0.0));
    assert_eq!(outward.origin, Tuple3D::new(0.0, SURFACE_OFFSET, 0.0));

    let inward = Ray3D::spawn(point, normal, Tuple3D::new(0.6, -0.8, 0.0));
    assert_eq!(inward.origin, Tuple3D::new(0.0, -SURFACE_OFFSET, 0.0));
    assert_eq!(inward.direction, Tuple3D::new(0.6, -0.8, 0.0));
}
