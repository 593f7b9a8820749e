use crate::config::SynthesizerConfig;

pub fn setup_logging(config: &SynthesizerConfig) {
    common::setup_logging(config.environment);
}
