use clap::Parser;
use synthesizer::{SynthesisService, SynthesizerConfig, logging::setup_logging};

fn main() -> anyhow::Result<()> {
    let config = SynthesizerConfig::parse();
    setup_logging(&config);
    config.validate()?;

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    let mut service = SynthesisService::new(config.clone()).with_progress();
    let report = service.run()?;

    for failure in &report.failures {
        eprintln!("image_{}: {}", failure.index, failure.error);
    }

    println!(
        "Generated {}/{} images with {} shapes each in {}",
        report.images_written,
        report.images_requested,
        report.shapes_per_image,
        config.output_folder.display()
    );

    if !report.is_complete() {
        anyhow::bail!("{} image(s) failed", report.failures.len());
    }

    Ok(())
}
