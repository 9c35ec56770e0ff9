// Default render parameters
pub const CANVAS_WIDTH: usize = 1024;
pub const CANVAS_HEIGHT: usize = 768;
pub const FIELD_OF_VIEW: f64 = std::f64::consts::PI / 3.0;
pub const OUT_FILE: &'static str = "./out.png";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Offset applied to secondary ray origins, prevents "acne"
pub const SURFACE_OFFSET: f64 = 1e-3;

// Rays travelling further than this have escaped the scene
pub const FAR_PLANE: f64 = 1000.0;

// Maximum recursion depth for reflection and refraction
pub const MAX_RECURSION_DEPTH: usize = 4;

// Background used when no environment map is configured
pub const BACKGROUND_RGB: [f64; 3] = [0.2, 0.7, 0.8];

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const GLASS_RI: f64 = 1.5;
