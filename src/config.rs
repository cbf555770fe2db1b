//! Configuration structures for training
//!
//! Training hyperparameters are read from JSON:
//!
//! ```json
//! {
//!   "learning_rate": 0.01,
//!   "iterations": 200,
//!   "seed": 42,
//!   "log_every": 50,
//!   "threshold": 0.3
//! }
//! ```

use crate::error::{MlpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Decision boundary for binary classification of the sigmoid output.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Hyperparameters for the online training loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Step size for gradient descent
    pub learning_rate: f64,

    /// Passes over the dataset
    pub iterations: usize,

    /// Seed for weight initialisation; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Emit an info-level loss report every `log_every` iterations
    #[serde(default)]
    pub log_every: Option<usize>,

    /// Classification threshold (default 0.3)
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl TrainingConfig {
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(MlpError::InvalidConfig(
                "learning_rate must be positive and finite".to_string(),
            ));
        }

        if self.iterations == 0 {
            return Err(MlpError::InvalidConfig(
                "iterations must be greater than 0".to_string(),
            ));
        }

        if self.log_every == Some(0) {
            return Err(MlpError::InvalidConfig(
                "log_every must be greater than 0".to_string(),
            ));
        }

        if let Some(threshold) = self.threshold {
            if !(threshold > 0.0 && threshold < 1.0) {
                return Err(MlpError::InvalidConfig(format!(
                    "threshold must lie in (0, 1), got {}",
                    threshold
                )));
            }
        }

        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            iterations: 100,
            seed: Some(42),
            log_every: None,
            threshold: None,
        }
    }
}

/// Loads a training configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use backprop_mlp::config::load_config;
///
/// let cfg = load_config("config/mlp_relu_sigmoid.json").unwrap();
/// assert!(cfg.learning_rate > 0.0);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
