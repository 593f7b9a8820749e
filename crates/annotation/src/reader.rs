use crate::codec::parse_line;
use crate::errors::AnnotationError;
use crate::types::{Annotation, RecordKind};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::io;
use std::path::Path;

/// Strict annotation file reader.
///
/// Blank lines are skipped; every other line must parse as a record of the
/// configured kind. When `num_classes` is set, class ids outside
/// `[0, num_classes)` are rejected.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationReader {
    kind: RecordKind,
    num_classes: Option<u32>,
}

impl AnnotationReader {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            num_classes: None,
        }
    }

    pub fn with_num_classes(mut self, num_classes: u32) -> Self {
        self.num_classes = Some(num_classes);
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn read(&self, path: &Path) -> Result<Vec<Annotation>, AnnotationError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AnnotationError::MissingAnnotationFile {
                path: path.to_path_buf(),
            },
            _ => AnnotationError::file_access(path, e),
        })?;
        self.parse(path, &text)
    }

    /// Parse already-loaded file contents; `file` is only used in errors.
    pub fn parse(&self, file: &Path, text: &str) -> Result<Vec<Annotation>, AnnotationError> {
        let mut records = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = idx + 1;

            let record =
                parse_line(line, self.kind).map_err(|reason| AnnotationError::MalformedRecord {
                    file: file.to_path_buf(),
                    line: line_number,
                    reason,
                })?;

            if let Some(num_classes) = self.num_classes
                && record.class_id >= num_classes
            {
                return Err(AnnotationError::ClassOutOfRange {
                    file: file.to_path_buf(),
                    line: line_number,
                    class_id: record.class_id,
                    num_classes,
                });
            }

            records.push(record);
        }

        tracing::trace!(
            file = %file.display(),
            records = records.len(),
            kind = ?self.kind,
            "Parsed annotation file"
        );

        Ok(records)
    }
}

/// File names of every `*.txt` annotation directly inside `dir`, sorted.
///
/// A `.txt` entry whose name is not valid UTF-8 is an error rather than
/// silently dropped from the set.
pub fn list_annotation_files(dir: &Path) -> Result<BTreeSet<String>, AnnotationError> {
    let entries = std::fs::read_dir(dir).map_err(|e| AnnotationError::file_access(dir, e))?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let path = entry.map_err(|e| AnnotationError::file_access(dir, e))?.path();
        if path.extension() != Some(OsStr::new("txt")) || !path.is_file() {
            continue;
        }
        let name = path.file_name().and_then(OsStr::to_str).ok_or_else(|| {
            AnnotationError::file_access(
                &path,
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
            )
        })?;
        names.insert(name.to_string());
    }

    Ok(names)
}
