//! Error types for the synthesis engine's edges
//!
//! Synthesis itself never fails; these only surface while loading
//! configuration or decoding a captured descriptor.

use thiserror::Error;

/// Synthesis error enumeration
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Config file could not be read
    #[error("failed to read synthesis config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid YAML for [`crate::SynthesisConfig`]
    #[error("failed to parse synthesis config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Config parsed but violates a limit
    #[error("invalid synthesis config: {0}")]
    InvalidConfig(String),

    /// Captured descriptor payload is not valid JSON
    #[error("invalid element descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

impl SynthesisError {
    /// Whether the error came from configuration rather than input data
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SynthesisError::ConfigIo(_)
                | SynthesisError::ConfigParse(_)
                | SynthesisError::InvalidConfig(_)
        )
    }
}
