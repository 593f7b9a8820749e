use crate::codec::format_line;
use crate::errors::AnnotationError;
use crate::types::Annotation;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered writer producing one annotation file.
pub struct AnnotationWriter {
    path: PathBuf,
    out: BufWriter<File>,
    written: usize,
}

impl AnnotationWriter {
    pub fn create(path: &Path) -> Result<Self, AnnotationError> {
        let file = File::create(path).map_err(|e| AnnotationError::file_access(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn write(&mut self, annotation: &Annotation) -> Result<(), AnnotationError> {
        writeln!(self.out, "{}", format_line(annotation))
            .map_err(|e| AnnotationError::file_access(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Flush and close, returning the number of records written.
    pub fn finish(mut self) -> Result<usize, AnnotationError> {
        self.out
            .flush()
            .map_err(|e| AnnotationError::file_access(&self.path, e))?;
        Ok(self.written)
    }
}
