use crate::color::Color;
use crate::tuple::Tuple3D;
use crate::consts::{ GLASS_RI, VACUUM_RI };

/// A point light.
///
/// A very simple light source. Emits white light of some `intensity` from a
/// single `position`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub position: Tuple3D,
    pub intensity: f64,
}

impl PointLight {
    pub fn new(position: Tuple3D, intensity: f64) -> PointLight {
        PointLight { position, intensity }
    }
}

/// Weights for the four contributions combined by `lighting`.
///
/// The weights are used verbatim. They need not sum to one, and a single
/// weight may exceed one (a mirror uses a strong specular weight).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Albedo {
    pub diffuse: f64,
    pub specular: f64,
    pub reflective: f64,
    pub refractive: f64,
}

impl Albedo {
    pub fn new(diffuse: f64, specular: f64, reflective: f64, refractive: f64)
        -> Albedo {
        Albedo { diffuse, specular, reflective, refractive }
    }
}

impl From<[f64; 4]> for Albedo {
    fn from(v: [f64; 4]) -> Albedo {
        Albedo::new(v[0], v[1], v[2], v[3])
    }
}

/// A material record.
///
/// Materials use the Phong model for local light (diffuse color, specular
/// exponent), plus reflection and refraction weights for the Whitted model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub albedo: Albedo,
    pub diffuse_color: Color,
    pub specular_exponent: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            albedo: Albedo::new(1.0, 0.0, 0.0, 0.0),
            diffuse_color: Color::white(),
            specular_exponent: 1.0,
            refractive_index: VACUUM_RI,
        }
    }
}

impl Material {
    pub fn new(albedo: Albedo, diffuse_color: Color, specular_exponent: f64,
        refractive_index: f64) -> Material {
        Material { albedo, diffuse_color, specular_exponent, refractive_index }
    }

    /// A matte off-white with a soft highlight.
    pub fn ivory() -> Material {
        Material::new(
            Albedo::new(0.6, 0.3, 0.1, 0.0),
            Color::rgb(0.4, 0.4, 0.3),
            50.0,
            VACUUM_RI,
        )
    }

    /// Mostly transparent, with a sharp highlight.
    pub fn glass() -> Material {
        Material::new(
            Albedo::new(0.0, 0.5, 0.1, 0.8),
            Color::rgb(0.6, 0.7, 0.8),
            125.0,
            GLASS_RI,
        )
    }

    pub fn red_rubber() -> Material {
        Material::new(
            Albedo::new(0.9, 0.1, 0.0, 0.0),
            Color::rgb(0.3, 0.1, 0.1),
            10.0,
            VACUUM_RI,
        )
    }

    pub fn mirror() -> Material {
        Material::new(
            Albedo::new(0.0, 10.0, 0.8, 0.0),
            Color::white(),
            1425.0,
            VACUUM_RI,
        )
    }

    /// Looks up a named preset, as used by scene descriptions.
    pub fn preset(name: &str) -> Option<Material> {
        match name {
            "ivory" => Some(Material::ivory()),
            "glass" => Some(Material::glass()),
            "red_rubber" => Some(Material::red_rubber()),
            "mirror" => Some(Material::mirror()),
            _ => None,
        }
    }
}

/// Light arriving at a point directly from the light sources.
///
/// Intensities are scalars; light sources are white, so only the surface
/// colors tint the result.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DirectLight {
    pub diffuse: f64,
    pub specular: f64,
}

impl DirectLight {
    /// Accumulates one unoccluded light.
    ///
    /// `lightv` points from the surface towards the light, `normalv` is the
    /// surface normal and `rayv` is the direction of the ray that hit the
    /// surface.
    pub fn accumulate(&mut self, light: &PointLight, m: &Material,
        lightv: Tuple3D, normalv: Tuple3D, rayv: Tuple3D) {
        self.diffuse += light.intensity * lightv.dot(&normalv).max(0.0);

        // The mirrored light direction, compared against the incoming ray
        let reflect_dot_ray = lightv.reflect(&normalv).dot(&rayv).max(0.0);
        self.specular += light.intensity
            * reflect_dot_ray.powf(m.specular_exponent);
    }
}

/// Calculates the color of a surface point.
///
/// This is the Whitted shading equation: the diffuse color lit by the
/// diffuse intensity, a white specular highlight, and the colors seen along
/// the reflected and refracted rays. Each term is scaled by its albedo weight;
/// nothing is normalized or clamped here.
pub fn lighting(m: &Material, direct: DirectLight, reflected: Color,
    refracted: Color) -> Color {
    let diffuse = m.diffuse_color * direct.diffuse * m.albedo.diffuse;
    let specular = Color::white() * direct.specular * m.albedo.specular;
    let reflection = reflected * m.albedo.reflective;
    let refraction = refracted * m.albedo.refractive;

    diffuse + specular + reflection + refraction
}

#[test]
fn eye_between_light_and_surface() {
    let m = Material::ivory();
    let light = PointLight::new(Tuple3D::new(0.0, 0.0, 10.0), 1.0);

    let lightv = Tuple3D::new(0.0, 0.0, 1.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let rayv = Tuple3D::new(0.0, 0.0, -1.0);

    let mut direct = DirectLight::default();
    direct.accumulate(&light, &m, lightv, normalv, rayv);

    assert_eq!(direct, DirectLight { diffuse: 1.0, specular: 1.0 });
}

#[test]
fn light_behind_surface_contributes_nothing() {
    let m = Material::ivory();
    let light = PointLight::new(Tuple3D::new(0.0, 0.0, -10.0), 1.5);

    let lightv = Tuple3D::new(0.0, 0.0, -1.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let rayv = Tuple3D::new(0.0, 0.0, -1.0);

    let mut direct = DirectLight::default();
    direct.accumulate(&light, &m, lightv, normalv, rayv);

    assert_eq!(direct, DirectLight::default());
}

#[test]
fn highlight_falls_off_with_exponent() {
    let dull = Material { specular_exponent: 1.0, ..Material::ivory() };
    let sharp = Material { specular_exponent: 100.0, ..Material::ivory() };
    let light = PointLight::new(Tuple3D::new(0.0, 10.0, 10.0), 1.0);

    let lightv = Tuple3D::new(0.0, 1.0, 1.0).normalize();
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let rayv = Tuple3D::new(0.0, 0.0, -1.0);

    let mut d = DirectLight::default();
    d.accumulate(&light, &dull, lightv, normalv, rayv);
    let mut s = DirectLight::default();
    s.accumulate(&light, &sharp, lightv, normalv, rayv);

    assert_eq!(d.diffuse, s.diffuse);
    assert!(s.specular < d.specular);
}

#[test]
fn lighting_weights_each_term() {
    let m = Material::new(
        Albedo::new(0.5, 0.25, 2.0, 0.1),
        Color::rgb(1.0, 0.0, 0.0),
        1.0,
        1.0,
    );
    let direct = DirectLight { diffuse: 2.0, specular: 0.4 };

    let c = lighting(&m, direct, Color::rgb(0.0, 0.5, 0.0),
        Color::rgb(0.0, 0.0, 1.0));

    // diffuse (1, 0, 0), specular (0.1, 0.1, 0.1), reflection (0, 1, 0),
    // refraction (0, 0, 0.1)
    assert_eq!(c, Color::rgb(1.1, 1.1, 0.2));
}

#[test]
fn presets_by_name() {
    assert_eq!(Material::preset("glass"), Some(Material::glass()));
    assert_eq!(Material::preset("mirror").unwrap().albedo.specular, 10.0);
    assert_eq!(Material::preset("velvet"), None);
}
