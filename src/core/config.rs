use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{ConvoReadyError, Result};


pub const ENV_PREFIX: &str = "CONVOREADY";


/// Tuning knobs for the scenario matcher.
///
/// `min_similarity` and `confidence_scale` were picked empirically against the
/// shipped profiles. They are tunables, not derived constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Scores must be strictly above this cosine value to be reported.
    pub min_similarity: f64,
    /// Multiplier turning a cosine score into a 0-100 display percentage.
    pub confidence_scale: f64,
    pub max_ngram: usize,
    pub min_token_chars: usize,
    pub max_keywords: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_similarity: crate::DEFAULT_MIN_SIMILARITY,
            confidence_scale: crate::DEFAULT_CONFIDENCE_SCALE,
            max_ngram: 2,
            min_token_chars: 2,
            max_keywords: crate::scenario::DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl MatcherConfig {

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.min_similarity) {
            return Err(ConvoReadyError::config(format!(
                "min_similarity must be in [0, 1), got {}",
                self.min_similarity
            )));
        }
        if !(self.confidence_scale.is_finite() && self.confidence_scale > 0.0) {
            return Err(ConvoReadyError::config(format!(
                "confidence_scale must be a positive number, got {}",
                self.confidence_scale
            )));
        }
        if self.max_ngram == 0 {
            return Err(ConvoReadyError::config("max_ngram must be at least 1"));
        }
        if self.min_token_chars == 0 {
            return Err(ConvoReadyError::config("min_token_chars must be at least 1"));
        }
        Ok(())
    }

    /// Load from an optional TOML file, overridden by `CONVOREADY_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let config: Self = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate().inspect_err(|e| warn!("Rejected matcher config: {}", e))?;
        Ok(config)
    }


    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }


    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
