use annotation::AnnotationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Class id {class_id} is outside [0, {num_classes})")]
    ClassOutOfRange { class_id: u32, num_classes: u32 },
}

/// Failure while evaluating a single image.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error(transparent)]
    Match(#[from] MatchError),
}
