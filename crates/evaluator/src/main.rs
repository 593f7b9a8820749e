use clap::Parser;
use evaluator::{
    EvaluationService, EvaluatorConfig, ReportFormat, logging::setup_logging, report::render_text,
};

fn main() -> anyhow::Result<()> {
    let config = EvaluatorConfig::parse();
    setup_logging(&config);
    config.validate()?;

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    let service = EvaluationService::new(config.clone());
    let report = service.run()?;

    match config.format {
        ReportFormat::Text => print!("{}", render_text(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !report.is_complete() {
        anyhow::bail!(
            "{} image(s) could not be evaluated",
            report.failures.len()
        );
    }

    Ok(())
}
