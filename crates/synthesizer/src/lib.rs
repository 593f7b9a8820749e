pub mod compositor;
pub mod config;
pub mod errors;
pub mod logging;
pub mod planner;
pub mod service;
pub mod shapes;
pub mod transform;

pub use compositor::{ComposedImage, Compositor};
pub use config::SynthesizerConfig;
pub use errors::SynthesisError;
pub use planner::{Placement, PlacementPlanner};
pub use service::{GenerationReport, SynthesisService};
pub use shapes::{Shape, ShapeLibrary};
pub use transform::ShapeTransform;
