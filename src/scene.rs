use std::convert::TryFrom;
use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, info, warn };
use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::light::{ Albedo, Material, PointLight };
use crate::pattern::CheckerPattern;
use crate::geometry::{ Sphere, Floor };
use crate::world::World;
use crate::camera::Camera;
use crate::error::RenderError;
use crate::consts::{
    CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW, MAX_RECURSION_DEPTH,
    BACKGROUND_RGB
};

/// Everything needed for one render: what to draw, how to look at it, and
/// what lies behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,

    /// Panorama sampled by escaping rays. Takes precedence over `background`.
    pub environment: Option<PathBuf>,
    pub background: Color,
}

impl Default for Scene {
    /// The reference scene at the default resolution, on a solid background.
    fn default() -> Scene {
        Scene {
            world: World::default(),
            camera: Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW),
            environment: None,
            background: BACKGROUND_RGB.into(),
        }
    }
}

impl Scene {
    /// Reads a scene description from a JSON file.
    ///
    /// A relative environment map path is resolved against the directory of
    /// the scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, RenderError> {
        let path = path.as_ref();
        debug!("Reading scene description {:?}...", path);

        let text = fs::read_to_string(path)?;
        let mut scene = Scene::from_json(&text)?;

        if let Some(dir) = path.parent() {
            scene.environment = scene.environment.map(|env| dir.join(env));
        }

        if scene.world.lights.is_empty() {
            warn!("Scene {:?} has no lights; surfaces will only show \
                reflections and refractions.", path);
        }

        info!("Loaded scene {:?}: {} spheres, {} lights.", path,
            scene.world.spheres.len(), scene.world.lights.len());
        Ok(scene)
    }

    /// Parses a scene description from a JSON string.
    pub fn from_json(text: &str) -> Result<Scene, RenderError> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        Scene::try_from(scene_json)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = RenderError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, RenderError> {
        let fov = scene_json.field_of_view;
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(RenderError::InvalidScene(
                format!("field of view {} is not within (0, pi)", fov)));
        }

        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            fov,
        );

        let mut world = World::empty();
        world.max_depth = scene_json.max_depth;
        world.lights = scene_json.lights.iter().map(|l| l.into()).collect();
        world.spheres = scene_json.spheres.into_iter()
            .map(Sphere::try_from)
            .collect::<Result<_, _>>()?;
        world.floor = scene_json.floor.map(Floor::try_from).transpose()?;

        Ok(Scene {
            world,
            camera,
            environment: scene_json.environment,
            background: scene_json.background.into(),
        })
    }
}

/// On-disk form of a `Scene`. Every field may be omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,
    max_depth: usize,

    environment: Option<PathBuf>,
    background: [f64; 3],

    lights: Vec<LightJson>,
    spheres: Vec<SphereJson>,

    /// No floor is drawn unless this is present; `{}` gives the default one.
    floor: Option<FloorJson>,
}

impl Default for SceneJson {
    fn default() -> SceneJson {
        SceneJson {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            field_of_view: FIELD_OF_VIEW,
            max_depth: MAX_RECURSION_DEPTH,
            environment: None,
            background: BACKGROUND_RGB,
            lights: Vec::new(),
            spheres: Vec::new(),
            floor: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LightJson {
    position: [f64; 3],
    intensity: f64,
}

impl From<&LightJson> for PointLight {
    fn from(light_json: &LightJson) -> PointLight {
        PointLight::new(light_json.position.into(), light_json.intensity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct SphereJson {
    center: [f64; 3],
    radius: f64,
    material: MaterialJson,
}

impl TryFrom<SphereJson> for Sphere {
    type Error = RenderError;

    fn try_from(sphere_json: SphereJson) -> Result<Sphere, RenderError> {
        if !(sphere_json.radius > 0.0) {
            return Err(RenderError::InvalidScene(
                format!("sphere radius {} is not positive", sphere_json.radius)));
        }

        let center: Tuple3D = sphere_json.center.into();
        let material = Material::try_from(sphere_json.material)?;
        Ok(Sphere::new(center, sphere_json.radius, material))
    }
}

/// Either the name of a preset (`"ivory"`) or a full material.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum MaterialJson {
    Preset(String),
    Inline {
        albedo: [f64; 4],
        diffuse_color: [f64; 3],
        specular_exponent: f64,
        refractive_index: f64,
    },
}

impl TryFrom<MaterialJson> for Material {
    type Error = RenderError;

    fn try_from(material_json: MaterialJson) -> Result<Material, RenderError> {
        match material_json {
            MaterialJson::Preset(name) => Material::preset(&name)
                .ok_or(RenderError::UnknownMaterial(name)),
            MaterialJson::Inline {
                albedo, diffuse_color, specular_exponent, refractive_index
            } => Ok(Material::new(
                Albedo::from(albedo),
                Color::from(diffuse_color),
                specular_exponent,
                refractive_index,
            )),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FloorJson {
    height: Option<f64>,
    x_bounds: Option<(f64, f64)>,
    z_bounds: Option<(f64, f64)>,
    tile_size: Option<f64>,
}

impl TryFrom<FloorJson> for Floor {
    type Error = RenderError;

    fn try_from(floor_json: FloorJson) -> Result<Floor, RenderError> {
        let mut floor = Floor::default();

        if let Some(height) = floor_json.height {
            floor.height = height;
        }
        if let Some(x_bounds) = floor_json.x_bounds {
            floor.x_bounds = x_bounds;
        }
        if let Some(z_bounds) = floor_json.z_bounds {
            floor.z_bounds = z_bounds;
        }
        if let Some(tile_size) = floor_json.tile_size {
            if !(tile_size > 0.0) {
                return Err(RenderError::InvalidScene(
                    format!("floor tile size {} is not positive", tile_size)));
            }
            floor.pattern = CheckerPattern::default().with_tile_size(tile_size);
        }

        Ok(floor)
    }
}

/* Tests */

#[test]
fn empty_description_uses_defaults() {
    let scene = Scene::from_json("{}").unwrap();

    assert_eq!(scene.camera,
        Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW));
    assert_eq!(scene.world, World::empty());
    assert_eq!(scene.environment, None);
    assert_eq!(scene.background, Color::rgb(0.2, 0.7, 0.8));
}

#[test]
fn reference_description_matches_default_scene() {
    let json = include_str!("../scenes/reference.json");
    let scene = Scene::from_json(json).unwrap();

    assert_eq!(scene, Scene::default());
}

#[test]
fn inline_material() {
    let scene = Scene::from_json(r#"{
        "spheres": [{
            "center": [0, 0, -5],
            "radius": 1,
            "material": {
                "albedo": [0.9, 0.1, 0.0, 0.0],
                "diffuse_color": [1, 0, 0],
                "specular_exponent": 10,
                "refractive_index": 1
            }
        }]
    }"#).unwrap();

    let m = scene.world.spheres[0].material;
    assert_eq!(m.albedo, Albedo::new(0.9, 0.1, 0.0, 0.0));
    assert_eq!(m.diffuse_color, Color::rgb(1.0, 0.0, 0.0));
    assert!(crate::feq(m.specular_exponent, 10.0));
}

#[test]
fn camera_and_floor_overrides() {
    let scene = Scene::from_json(r#"{
        "canvas_width": 320,
        "canvas_height": 240,
        "field_of_view": 1.0,
        "max_depth": 2,
        "environment": "envmap.jpg",
        "floor": { "height": -2, "tile_size": 1 }
    }"#).unwrap();

    assert_eq!(scene.camera, Camera::new(320, 240, 1.0));
    assert_eq!(scene.world.max_depth, 2);
    assert_eq!(scene.environment, Some(PathBuf::from("envmap.jpg")));

    let floor = scene.world.floor.unwrap();
    assert!(crate::feq(floor.height, -2.0));
    assert_eq!(floor.x_bounds, Floor::default().x_bounds);
    assert_eq!(floor.pattern, CheckerPattern::default().with_tile_size(1.0));
}

#[test]
fn unknown_preset_is_rejected() {
    let result = Scene::from_json(r#"{
        "spheres": [{ "center": [0, 0, -5], "radius": 1, "material": "jade" }]
    }"#);

    assert!(matches!(result, Err(RenderError::UnknownMaterial(name))
        if name == "jade"));
}

#[test]
fn invalid_values_are_rejected() {
    let radius = Scene::from_json(r#"{
        "spheres": [{ "center": [0, 0, -5], "radius": 0, "material": "ivory" }]
    }"#);
    assert!(matches!(radius, Err(RenderError::InvalidScene(_))));

    let fov = Scene::from_json(r#"{ "field_of_view": 0 }"#);
    assert!(matches!(fov, Err(RenderError::InvalidScene(_))));

    let tile = Scene::from_json(r#"{ "floor": { "tile_size": -1 } }"#);
    assert!(matches!(tile, Err(RenderError::InvalidScene(_))));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = Scene::from_json(r#"{ "spheres": [ "#);
    assert!(matches!(result, Err(RenderError::Parse(_))));

    let result = Scene::from_json(r#"{ "sphere": [] }"#);
    assert!(matches!(result, Err(RenderError::Parse(_))));
}

#[test]
fn load_resolves_environment_next_to_scene() {
    let dir = std::env::temp_dir().join("tiny_ray_tracer_scene_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scene.json");
    fs::write(&path, r#"{ "environment": "envmap.jpg" }"#).unwrap();

    let scene = Scene::load(&path).unwrap();
    assert_eq!(scene.environment, Some(dir.join("envmap.jpg")));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_missing_file_is_an_io_error() {
    let result = Scene::load("./no/such/scene.json");
    assert!(matches!(result, Err(RenderError::Io(_))));
}
