use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing annotation file: {}", path.display())]
    MissingAnnotationFile { path: PathBuf },

    #[error("Malformed record at {}:{line}: {reason}", file.display())]
    MalformedRecord {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(
        "Class id {class_id} at {}:{line} is outside [0, {num_classes})",
        file.display()
    )]
    ClassOutOfRange {
        file: PathBuf,
        line: usize,
        class_id: u32,
        num_classes: u32,
    },
}

impl AnnotationError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
