use crate::compositor::{ComposedImage, Compositor};
use crate::config::SynthesizerConfig;
use crate::errors::SynthesisError;
use crate::shapes::ShapeLibrary;
use annotation::AnnotationWriter;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct ImageFailure {
    pub index: u32,
    pub error: SynthesisError,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub images_requested: u32,
    pub images_written: u32,
    pub shapes_per_image: usize,
    pub failures: Vec<ImageFailure>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SynthesisService {
    config: SynthesizerConfig,
    rng: fastrand::Rng,
    progress: ProgressBar,
}

impl SynthesisService {
    pub fn new(config: SynthesizerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            rng,
            progress: ProgressBar::hidden(),
        }
    }

    /// Show a progress bar on stderr while generating.
    pub fn with_progress(mut self) -> Self {
        let style = ProgressStyle::with_template("{bar:40} {pos}/{len} images ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        self.progress = ProgressBar::new(u64::from(self.config.nout)).with_style(style);
        self
    }

    /// Generate every requested image.
    ///
    /// Setup problems (unreadable shapes, output folders) abort the run; a
    /// failure on one image is recorded and generation moves on.
    pub fn run(&mut self) -> anyhow::Result<GenerationReport> {
        let _s = common::span!("synthesize");

        create_dir(&self.config.output_folder).context("Failed to create output folder")?;
        create_dir(&self.config.annotation_folder)
            .context("Failed to create annotation folder")?;

        let library = ShapeLibrary::load(&self.config.input_folder)
            .context("Failed to load shape images")?;
        let copies = library.copies_per_image(self.config.out_dims, self.config.shape_percent);
        let compositor = Compositor::new(
            &library,
            self.config.out_dims,
            copies,
            self.config.max_attempts,
        );

        tracing::info!(
            shapes = library.len(),
            total_shape_area = library.total_area(),
            copies_per_image = copies,
            shapes_per_image = compositor.shapes_per_image(),
            "Shape library loaded"
        );
        if copies == 0 {
            tracing::warn!(
                "Shapes are larger than the requested coverage; images will be blank"
            );
        }

        let mut images_written = 0;
        let mut failures = Vec::new();

        self.progress.set_length(u64::from(self.config.nout));
        for index in 0..self.config.nout {
            match self.generate_image(index, &compositor) {
                Ok(()) => images_written += 1,
                Err(error) => {
                    tracing::warn!(index, error = %error, "Image generation failed");
                    failures.push(ImageFailure { index, error });
                }
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        tracing::info!(
            images_written,
            failures = failures.len(),
            "Generation finished"
        );

        Ok(GenerationReport {
            images_requested: self.config.nout,
            images_written,
            shapes_per_image: compositor.shapes_per_image(),
            failures,
        })
    }

    /// Compose and write one image. On any error both outputs for `index`
    /// are removed so no annotation is left without its image.
    fn generate_image(&mut self, index: u32, compositor: &Compositor<'_>) -> Result<(), SynthesisError> {
        let _s = common::span_debug!("generate_image", index);

        let result = compositor
            .compose(&mut self.rng)
            .and_then(|composed| self.write_outputs(index, &composed));
        if result.is_err() {
            self.discard_outputs(index);
        }
        result
    }

    /// The image is encoded before its annotation so a failed encode never
    /// leaves a label behind.
    fn write_outputs(&self, index: u32, composed: &ComposedImage) -> Result<(), SynthesisError> {
        let image_path = self.config.image_path(index);
        composed
            .image
            .save(&image_path)
            .map_err(|source| SynthesisError::Encode {
                path: image_path.clone(),
                source,
            })?;

        let annotation_path = self.config.annotation_path(index);
        let mut writer = AnnotationWriter::create(&annotation_path)?;
        for annotation in &composed.annotations {
            writer.write(annotation)?;
        }
        let written = writer.finish()?;

        tracing::debug!(
            image = %image_path.display(),
            annotations = written,
            "Image written"
        );
        Ok(())
    }

    fn discard_outputs(&self, index: u32) {
        for path in [self.config.image_path(index), self.config.annotation_path(index)] {
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed partial output"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partial output"
                ),
            }
        }
    }
}

fn create_dir(path: &Path) -> Result<(), SynthesisError> {
    std::fs::create_dir_all(path).map_err(|source| SynthesisError::Io {
        path: path.to_path_buf(),
        source,
    })
}
