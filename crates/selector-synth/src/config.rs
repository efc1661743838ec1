//! Synthesis limits, loadable from YAML

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SynthesisError;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "SELECTOR_SYNTH_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Tiered pipeline keeps this many candidates after sorting.
    pub max_candidates: usize,
    /// Fallbacks reported next to the robust primary.
    pub max_fallbacks: usize,
    /// Flat pipeline pool size before scoring.
    pub exhaustive_pool_limit: usize,
    /// Fallbacks reported next to the exhaustive primary.
    pub exhaustive_fallbacks: usize,
    /// Characters of text used in text-based selectors and XPath.
    pub text_snippet_chars: usize,
    /// Longest text that still gets an exact-text selector.
    pub exact_text_max_chars: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_candidates: 8,
            max_fallbacks: 7,
            exhaustive_pool_limit: 20,
            exhaustive_fallbacks: 4,
            text_snippet_chars: 50,
            exact_text_max_chars: 50,
        }
    }
}

impl SynthesisConfig {
    /// Defaults unless `path` names an existing file.
    pub fn load_from_path(path: Option<PathBuf>) -> Result<Self, SynthesisError> {
        let config = match path {
            Some(ref path) if path.exists() => {
                debug!("Loading synthesis config from {}", path.display());
                let raw = fs::read_to_string(path)?;
                serde_yaml::from_str::<SynthesisConfig>(&raw)?
            }
            _ => SynthesisConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the path from [`CONFIG_ENV`]; blank means unset.
    pub fn from_env() -> Result<Self, SynthesisError> {
        let path = match std::env::var(CONFIG_ENV) {
            Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value.trim())),
            _ => None,
        };
        Self::load_from_path(path)
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        if self.max_candidates == 0 {
            return Err(SynthesisError::InvalidConfig(
                "max_candidates must be > 0".to_string(),
            ));
        }
        if self.max_fallbacks >= self.max_candidates {
            return Err(SynthesisError::InvalidConfig(format!(
                "max_fallbacks ({}) must be below max_candidates ({})",
                self.max_fallbacks, self.max_candidates
            )));
        }
        if self.exhaustive_pool_limit == 0 {
            return Err(SynthesisError::InvalidConfig(
                "exhaustive_pool_limit must be > 0".to_string(),
            ));
        }
        if self.text_snippet_chars == 0 {
            return Err(SynthesisError::InvalidConfig(
                "text_snippet_chars must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
