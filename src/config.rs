//! Evaluator configuration.
//!
//! Defaults can be overridden through environment variables:
//!
//! - `PWD_MAX_LENGTH`: maximum accepted password length in characters (default 256)
//! - `PWD_MIN_SCORE`: minimum score (0-4) for a password to be valid (default 3)
//! - `PWD_MIN_LENGTH`: minimum length required by the policy check (default 8)

use std::str::FromStr;

use crate::classify::{Score, ScoreThresholds};

pub const MAX_LENGTH_ENV: &str = "PWD_MAX_LENGTH";
pub const MIN_SCORE_ENV: &str = "PWD_MIN_SCORE";
pub const MIN_LENGTH_ENV: &str = "PWD_MIN_LENGTH";

const DEFAULT_MAX_LENGTH: usize = 256;
const DEFAULT_MIN_LENGTH: usize = 8;

/// Static composition rules checked alongside guessability.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    pub min_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    /// Longer inputs are rejected before any matching runs.
    pub max_length: usize,
    /// Score a password must reach to be reported as valid.
    pub min_score: Score,
    pub score_thresholds: ScoreThresholds,
    pub policy: PolicyConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_score: Score::THREE,
            score_thresholds: ScoreThresholds::default(),
            policy: PolicyConfig::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Builds the default configuration and applies environment overrides.
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(max_length) = env_value::<usize>(MAX_LENGTH_ENV) {
            config.max_length = max_length;
        }
        if let Some(score) = env_value::<u8>(MIN_SCORE_ENV).and_then(Score::new) {
            config.min_score = score;
        }
        if let Some(min_length) = env_value::<usize>(MIN_LENGTH_ENV) {
            config.policy.min_length = min_length;
        }
        config
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var_os(key)?;
    match raw.to_str().map(|value| value.trim().parse()) {
        Some(Ok(value)) => Some(value),
        _ => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            None
        }
    }
}
