use crate::ray::Ray3D;
use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::light::{ PointLight, Material, DirectLight, lighting };
use crate::geometry::{ Sphere, Floor };
use crate::intersect::Hit;
use crate::environment::Background;
use crate::consts::{ FAR_PLANE, MAX_RECURSION_DEPTH };

/// A world with spheres, lights and an optional floor.
///
/// Worlds collect all objects as well as lights for rendering. Most logic is
/// performed within worlds for the ray tracer. A world is never modified while
/// it is being rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<PointLight>,
    pub floor: Option<Floor>,

    /// Rays deeper than this in the reflection/refraction tree see only the
    /// background. Bounds the render time, at the cost of losing light in
    /// deep chains of mirrors and glass.
    pub max_depth: usize,
}

impl Default for World {
    /// The reference scene: four spheres over a checkered floor, three lights.
    fn default() -> World {
        let spheres = vec![
            Sphere::new(Tuple3D::new(-3.0, 0.0, -16.0), 2.0, Material::ivory()),
            Sphere::new(Tuple3D::new(-1.0, -1.5, -12.0), 2.0, Material::glass()),
            Sphere::new(Tuple3D::new(1.5, -0.5, -18.0), 3.0,
                Material::red_rubber()),
            Sphere::new(Tuple3D::new(7.0, 5.0, -18.0), 4.0, Material::mirror()),
        ];

        let lights = vec![
            PointLight::new(Tuple3D::new(-20.0, 20.0, 20.0), 1.5),
            PointLight::new(Tuple3D::new(30.0, 50.0, -25.0), 1.8),
            PointLight::new(Tuple3D::new(30.0, 20.0, 30.0), 1.7),
        ];

        World {
            spheres,
            lights,
            floor: Some(Floor::default()),
            max_depth: MAX_RECURSION_DEPTH,
        }
    }
}

impl World {
    /// Creates the reference world.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates an empty world with no spheres, lights or floor.
    pub fn empty() -> World {
        World {
            spheres: Vec::new(),
            lights: Vec::new(),
            floor: None,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Finds the closest intersection of a ray with the world.
    ///
    /// Spheres are scanned linearly, then the floor is tested. Anything at or
    /// beyond `FAR_PLANE` counts as a miss.
    pub fn intersect(&self, r: &Ray3D) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        let mut nearest = f64::MAX;

        for sphere in self.spheres.iter() {
            match sphere.intersect(r) {
                Some(t) if t < nearest => {
                    let point = r.position(t);
                    nearest = t;
                    closest = Some(Hit {
                        distance: t,
                        point,
                        normal: sphere.normal_at(&point),
                        material: sphere.material,
                    });
                },
                _ => (),
            }
        }

        if let Some(floor) = self.floor.as_ref() {
            match floor.intersect(r) {
                Some(t) if t < nearest => {
                    let point = r.position(t);
                    nearest = t;
                    closest = Some(Hit {
                        distance: t,
                        point,
                        normal: floor.normal_at(&point),
                        material: floor.material_at(&point),
                    });
                },
                _ => (),
            }
        }

        if nearest < FAR_PLANE {
            closest
        } else {
            None
        }
    }

    /// Determines whether `light` is hidden from a hit point.
    ///
    /// Shadows are hard; any object strictly between the point and the light
    /// blocks it completely.
    pub fn is_shadowed(&self, hit: &Hit, light: &PointLight) -> bool {
        let (probe, distance) = hit.probe(light.position);

        match self.intersect(&probe) {
            Some(blocker) => blocker.distance < distance,
            None => false,
        }
    }

    /// Sums the diffuse and specular light reaching a hit from every light.
    pub fn direct_light(&self, hit: &Hit, r: &Ray3D) -> DirectLight {
        let mut direct = DirectLight::default();

        for light in self.lights.iter() {
            if self.is_shadowed(hit, light) {
                continue;
            }

            let lightv = (light.position - hit.point).normalize();
            direct.accumulate(light, &hit.material, lightv, hit.normal,
                r.direction);
        }

        direct
    }

    /// Determines the color seen along a ray.
    ///
    /// `depth` is the number of reflections or refractions the ray has
    /// already gone through; primary rays start at 0. Rays which miss
    /// everything, or which are deeper than `max_depth`, take their color from
    /// `background`.
    pub fn color_at(&self, r: &Ray3D, background: &dyn Background,
        depth: usize) -> Color {
        if depth > self.max_depth {
            return background.background_at(&r.direction);
        }

        let hit = match self.intersect(r) {
            Some(hit) => hit,
            None => return background.background_at(&r.direction),
        };

        let reflected = self.color_at(&hit.reflected(r), background, depth + 1);
        let refracted = self.color_at(&hit.refracted(r), background, depth + 1);
        let direct = self.direct_light(&hit, r);

        lighting(&hit.material, direct, reflected, refracted)
    }
}

#[cfg(test)]
use crate::light::Albedo;

#[cfg(test)]
fn matte() -> Material {
    Material::new(Albedo::new(1.0, 0.0, 0.0, 0.0), Color::rgb(0.4, 0.4, 0.3),
        1.0, 1.0)
}

#[cfg(test)]
fn lone_sphere_world() -> World {
    let mut w = World::empty();
    w.spheres.push(Sphere::new(Tuple3D::new(-3.0, 0.0, -16.0), 2.0, matte()));
    w.lights.push(PointLight::new(Tuple3D::new(-20.0, 20.0, 20.0), 1.5));
    w
}

/// Counts how often the background is sampled.
#[cfg(test)]
struct CountingBackground {
    samples: std::cell::Cell<usize>,
}

#[cfg(test)]
impl Background for CountingBackground {
    fn background_at(&self, _direction: &Tuple3D) -> Color {
        self.samples.set(self.samples.get() + 1);
        Color::black()
    }
}

#[test]
fn empty_world_shows_only_background() {
    use crate::environment::EnvironmentMap;

    let w = World::empty();
    let pixels = (0..8).map(|i| Color::gray(i as f64 / 8.0)).collect();
    let map = EnvironmentMap::from_pixels(4, 2, pixels).unwrap();

    let directions = [
        Tuple3D::new(0.0, 0.0, -1.0),
        Tuple3D::new(0.3, 0.9, 0.1).normalize(),
        Tuple3D::new(-0.5, -0.5, 0.7).normalize(),
    ];

    for d in directions.iter() {
        let r = Ray3D::new(Tuple3D::zero(), *d);

        assert!(w.intersect(&r).is_none());
        assert_eq!(w.color_at(&r, &map, 0), map.background_at(d));
    }
}

#[test]
fn intersect_finds_closest_sphere() {
    let mut w = World::empty();
    w.spheres.push(Sphere::new(Tuple3D::new(0.0, 0.0, -10.0), 1.0, matte()));
    w.spheres.push(Sphere::new(Tuple3D::new(0.0, 0.0, -5.0), 1.0,
        Material::glass()));

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));
    let hit = w.intersect(&r).expect("Ray should hit a sphere.");

    assert_eq!(hit.distance, 4.0);
    assert_eq!(hit.point, Tuple3D::new(0.0, 0.0, -4.0));
    assert_eq!(hit.normal, Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(hit.material, Material::glass());
}

#[test]
fn sphere_in_front_of_floor_wins() {
    let mut w = World::empty();
    w.floor = Some(Floor::default());
    w.spheres.push(Sphere::new(Tuple3D::new(0.0, -2.0, -20.0), 1.0, matte()));

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, -2.0, -20.0)
        .normalize());
    let hit = w.intersect(&r).unwrap();
    assert_eq!(hit.material, matte());

    // A ray passing beside the sphere reaches the floor
    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(3.0, -4.0, -20.0)
        .normalize());
    let hit = w.intersect(&r).unwrap();
    assert_eq!(hit.normal, Tuple3D::new(0.0, 1.0, 0.0));
    assert!(crate::feq(hit.point.y, -4.0));
}

#[test]
fn hits_beyond_far_plane_are_misses() {
    let mut w = World::empty();
    w.spheres.push(Sphere::new(Tuple3D::new(0.0, 0.0, -2000.0), 10.0,
        matte()));

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));

    assert!(w.intersect(&r).is_none());
}

#[test]
fn shadow_sphere_between_point_and_light() {
    let w = lone_sphere_world();
    let hit = Hit {
        distance: 1.0,
        point: Tuple3D::new(-3.0, 0.0, -19.0),
        normal: Tuple3D::new(0.0, 0.0, -1.0),
        material: matte(),
    };

    assert!(w.is_shadowed(&hit, &w.lights[0]));
}

#[test]
fn shadow_object_behind_light() {
    let w = lone_sphere_world();
    let hit = Hit {
        distance: 1.0,
        point: Tuple3D::new(-40.0, 40.0, 40.0),
        normal: Tuple3D::new(0.0, 1.0, 0.0),
        material: matte(),
    };

    assert!(!w.is_shadowed(&hit, &w.lights[0]));
}

#[test]
fn lit_side_of_sphere_is_not_background() {
    let w = lone_sphere_world();
    let bg = Color::rgb(0.2, 0.7, 0.8);

    let toward_center = Tuple3D::new(-3.0, 0.0, -16.0).normalize();
    let c = w.color_at(&Ray3D::new(Tuple3D::zero(), toward_center), &bg, 0);

    assert_ne!(c, bg);
    assert!(c.r > 0.0);
}

#[test]
fn shadowed_light_contributes_nothing() {
    let mut w = lone_sphere_world();

    // A blocker sitting right between the light and the lone sphere
    w.spheres.push(Sphere::new(Tuple3D::new(-7.0, 5.0, -4.0), 4.0, matte()));

    let toward_center = Tuple3D::new(-3.0, 0.0, -16.0).normalize();
    let r = Ray3D::new(Tuple3D::zero(), toward_center);
    let hit = w.intersect(&r).unwrap();

    assert_eq!(w.direct_light(&hit, &r), DirectLight::default());
}

#[test]
fn recursion_stops_past_max_depth() {
    let w = lone_sphere_world();
    let bg = CountingBackground { samples: std::cell::Cell::new(0) };

    let toward_center = Tuple3D::new(-3.0, 0.0, -16.0).normalize();
    let r = Ray3D::new(Tuple3D::zero(), toward_center);
    let c = w.color_at(&r, &bg, w.max_depth + 1);

    assert_eq!(c, Color::black());
    assert_eq!(bg.samples.get(), 1);
}

#[test]
fn recursion_continues_at_max_depth() {
    // No lights, so every background sample comes from a secondary ray
    let mut w = World::empty();
    w.spheres.push(Sphere::new(Tuple3D::zero(), 100.0, Material::glass()));
    w.max_depth = 0;

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(0.0, 0.0, -1.0));
    let bg = CountingBackground { samples: std::cell::Cell::new(0) };
    w.color_at(&r, &bg, 0);

    // The primary ray is shaded; its reflection and refraction are not
    assert_eq!(bg.samples.get(), 2);

    w.max_depth = 2;
    let solid = Color::rgb(0.2, 0.7, 0.8);
    let c = w.color_at(&r, &solid, w.max_depth);

    // Reflected and refracted background, weighted 0.1 and 0.8 by the glass
    assert_ne!(c, solid);
    assert_eq!(c, solid * 0.9);
}

#[test]
fn recursion_is_bounded() {
    // A glass shell around the reference scene stops rays escaping early
    let mut w = World::new();
    w.spheres.push(Sphere::new(Tuple3D::zero(), 100.0, Material::glass()));

    for max_depth in 0..5 {
        w.max_depth = max_depth;
        let bg = CountingBackground { samples: std::cell::Cell::new(0) };

        for d in [
            Tuple3D::new(0.0, 0.0, -1.0),
            Tuple3D::new(-0.2, 0.0, -1.0).normalize(),
            Tuple3D::new(0.1, -0.3, -1.0).normalize(),
        ].iter() {
            bg.samples.set(0);
            w.color_at(&Ray3D::new(Tuple3D::zero(), *d), &bg, 0);

            // A full binary tree of depth `max_depth + 1` has this many leaves;
            // the whole tree then has at most twice as many calls, minus one.
            let leaves = 1 << (max_depth + 1);
            assert!(bg.samples.get() >= 1);
            assert!(bg.samples.get() <= leaves);
        }
    }
}

#[test]
fn recursion_limit_of_three_caps_calls_at_31() {
    let mut w = World::new();
    w.max_depth = 3;
    let bg = CountingBackground { samples: std::cell::Cell::new(0) };

    let r = Ray3D::new(Tuple3D::zero(), Tuple3D::new(-1.0, -1.5, -12.0)
        .normalize());
    w.color_at(&r, &bg, 0);

    let leaves = bg.samples.get();
    assert!(2 * leaves - 1 <= 31);
}

#[test]
fn default_world_is_reference_scene() {
    let w = World::default();

    assert_eq!(w.spheres.len(), 4);
    assert_eq!(w.lights.len(), 3);
    assert!(w.floor.is_some());
    assert_eq!(w.max_depth, 4);
}
