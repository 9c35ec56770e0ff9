pub mod consts;
pub mod error;

pub mod tuple;
pub mod ray;
pub mod light;
pub mod pattern;

pub mod geometry;
pub mod intersect;
pub mod world;
pub mod camera;
pub mod parallel;

pub mod color;
pub mod canvas;
pub mod environment;

pub mod scene;

use consts::FEQ_EPSILON;
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
