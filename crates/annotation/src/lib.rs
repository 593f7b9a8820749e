//! YOLO-style text annotations shared by the synthesizer and the evaluator.
//!
//! One record per line, space separated:
//! `<class_id> <center_x> <center_y> <width> <height> [<confidence>]`,
//! coordinates normalized to the image dimensions.

pub mod codec;
pub mod errors;
pub mod reader;
pub mod types;
pub mod writer;

pub use errors::AnnotationError;
pub use reader::{AnnotationReader, list_annotation_files};
pub use types::{Annotation, BoundingBox, RecordKind};
pub use writer::AnnotationWriter;
