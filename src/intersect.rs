use crate::tuple::Tuple3D;
use crate::ray::Ray3D;
use crate::light::Material;

/// A record for the closest intersection of a ray with a world.
///
/// Produced fresh by every `World::intersect` call. The material is copied
/// out of the surface, since the floor synthesizes a material per hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// The distance from the ray origin to the intersection.
    pub distance: f64,

    /// The point where the intersection occurs.
    pub point: Tuple3D,

    /// The unit normal at the intersection, pointing out of the surface.
    pub normal: Tuple3D,

    /// The material of the surface at the intersection.
    pub material: Material,
}

impl Hit {
    /// The ray mirrored off the surface.
    pub fn reflected(&self, incoming: &Ray3D) -> Ray3D {
        let direction = incoming.direction.reflect(&self.normal).normalize();
        Ray3D::spawn(self.point, self.normal, direction)
    }

    /// The ray bent through the surface by the material's refractive index.
    ///
    /// Under total internal reflection this is a ray along `+x`, not a
    /// physical reflection.
    pub fn refracted(&self, incoming: &Ray3D) -> Ray3D {
        let direction = incoming.direction
            .refract_from_vacuum(&self.normal, self.material.refractive_index)
            .normalize();
        Ray3D::spawn(self.point, self.normal, direction)
    }

    /// A shadow probe towards `target`, and the distance from the hit point
    /// to the target.
    pub fn probe(&self, target: Tuple3D) -> (Ray3D, f64) {
        let v = target - self.point;
        let ray = Ray3D::spawn(self.point, self.normal, v.normalize());

        (ray, v.magnitude())
    }
}

#[cfg(test)]
fn flat_hit(material: Material) -> Hit {
    Hit {
        distance: 1.0,
        point: Tuple3D::zero(),
        normal: Tuple3D::new(0.0, 1.0, 0.0),
        material,
    }
}

#[test]
fn reflected_ray_bounces_off_surface() {
    let hit = flat_hit(Default::default());
    let r = Ray3D::new(Tuple3D::new(-1.0, 1.0, 0.0),
        Tuple3D::new(1.0, -1.0, 0.0).normalize());

    let reflected = hit.reflected(&r);
    let v = 2.0f64.sqrt() / 2.0;

    assert_eq!(reflected.direction, Tuple3D::new(v, v, 0.0));
    assert!(reflected.origin.y > 0.0);
}

#[test]
fn refracted_ray_starts_under_surface() {
    let hit = flat_hit(Material::glass());
    let r = Ray3D::new(Tuple3D::new(-1.0, 1.0, 0.0),
        Tuple3D::new(1.0, -1.0, 0.0).normalize());

    let refracted = hit.refracted(&r);

    assert!(refracted.origin.y < 0.0);
    assert!(refracted.direction.y < 0.0);
    assert!(crate::feq(refracted.direction.magnitude(), 1.0));
    // Bent towards the normal
    assert!(refracted.direction.x < 2.0f64.sqrt() / 2.0);
}

#[test]
fn probe_points_at_target() {
    let hit = flat_hit(Default::default());
    let (probe, distance) = hit.probe(Tuple3D::new(0.0, 10.0, 0.0));

    assert_eq!(probe.direction, Tuple3D::new(0.0, 1.0, 0.0));
    assert!(probe.origin.y > 0.0);
    assert_eq!(distance, 10.0);
}
