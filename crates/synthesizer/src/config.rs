use anyhow::ensure;
use clap::Parser;
use std::path::PathBuf;

pub use common::Environment;

/// Generate images with distributed shapes and matching annotations.
#[derive(Debug, Clone, Parser)]
#[command(name = "synthesizer", version)]
pub struct SynthesizerConfig {
    /// Folder containing the shape images
    #[arg(long)]
    pub input_folder: PathBuf,

    /// Folder where generated images are saved
    #[arg(long)]
    pub output_folder: PathBuf,

    /// Folder where annotations of generated images are saved
    #[arg(long)]
    pub annotation_folder: PathBuf,

    /// Number of output images to generate
    #[arg(long)]
    pub nout: u32,

    /// Side length of the square output images in pixels
    #[arg(long)]
    pub out_dims: u32,

    /// Percentage of the image area to cover with shapes
    #[arg(long, alias = "shape_percent", default_value_t = 16)]
    pub shape_percent: u32,

    /// Rejected placement samples allowed per shape before giving up on an image
    #[arg(long, default_value_t = 10_000)]
    pub max_attempts: u32,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(skip = Environment::from_env())]
    pub environment: Environment,
}

impl SynthesizerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.out_dims > 0, "output dimensions must be positive");
        ensure!(
            (1..=100).contains(&self.shape_percent),
            "shape percent must be in [1, 100], got {}",
            self.shape_percent
        );
        ensure!(self.max_attempts > 0, "max attempts must be positive");
        Ok(())
    }

    pub fn image_path(&self, index: u32) -> PathBuf {
        self.output_folder.join(format!("image_{index}.png"))
    }

    pub fn annotation_path(&self, index: u32) -> PathBuf {
        self.annotation_folder.join(format!("image_{index}.txt"))
    }
}
