use crate::config::EvaluatorConfig;

pub fn setup_logging(config: &EvaluatorConfig) {
    common::setup_logging(config.environment);
}
