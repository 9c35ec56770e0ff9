use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures which stop a render before an image is produced.
///
/// Numeric corner cases in the shading math are never reported here; they
/// have local fallbacks.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to load environment map {path:?}: {source}")]
    EnvironmentMap {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("environment map {0:?} has no pixels")]
    EmptyEnvironmentMap(PathBuf),

    #[error("failed to save image {path:?}: {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to read scene description: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("unknown material preset {0:?}")]
    UnknownMaterial(String),

    #[error("invalid scene: {0}")]
    InvalidScene(String),
}
