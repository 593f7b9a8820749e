use annotation::AnnotationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Cannot read shape image {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No shape images found in {}", dir.display())]
    NoShapes { dir: PathBuf },

    #[error("Shape {width}x{height} does not fit a {canvas}x{canvas} canvas")]
    ShapeExceedsCanvas { width: u32, height: u32, canvas: u32 },

    #[error(
        "Could not place a {width}x{height} shape without overlap after {attempts} attempts ({placed} already placed)"
    )]
    PlacementInfeasible {
        width: u32,
        height: u32,
        placed: usize,
        attempts: u32,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}
