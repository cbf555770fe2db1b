//! Architecture configuration structures
//!
//! Describes a network as a JSON list of dense layers so the topology can be
//! changed without code changes. The default is the 2 → 3 → 3 → 1 network.
//!
//! ```json
//! {
//!   "layers": [
//!     { "input_size": 2, "output_size": 3, "activation": "relu" },
//!     { "input_size": 3, "output_size": 3, "activation": "relu" },
//!     { "input_size": 3, "output_size": 1, "activation": "sigmoid" }
//!   ]
//! }
//! ```

use crate::error::{MlpError, Result};
use crate::utils::activations::Activation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One dense layer: dimensions and activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub input_size: usize,
    pub output_size: usize,
    /// "relu", "sigmoid" or "none" (default)
    #[serde(default)]
    pub activation: Activation,
}

/// Ordered layer list applied front to back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureConfig {
    pub layers: Vec<LayerConfig>,
}

impl ArchitectureConfig {
    /// 2 → 3 (ReLU) → 3 (ReLU) → 1 (Sigmoid).
    pub fn default_topology() -> Self {
        let layer = |input_size, output_size, activation| LayerConfig {
            input_size,
            output_size,
            activation,
        };
        Self {
            layers: vec![
                layer(2, 3, Activation::Relu),
                layer(3, 3, Activation::Relu),
                layer(3, 1, Activation::Sigmoid),
            ],
        }
    }

    /// Checks that:
    /// - there is at least one layer
    /// - every size is positive
    /// - layer i's output size matches layer i+1's input size
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(MlpError::InvalidConfig(
                "architecture must have at least one layer".to_string(),
            ));
        }

        for (index, layer) in self.layers.iter().enumerate() {
            if layer.input_size == 0 || layer.output_size == 0 {
                return Err(MlpError::InvalidConfig(format!(
                    "layer {}: input_size and output_size must be greater than 0",
                    index
                )));
            }
        }

        for (index, pair) in self.layers.windows(2).enumerate() {
            if pair[0].output_size != pair[1].input_size {
                return Err(MlpError::LayerConnection {
                    index: index + 1,
                    expected: pair[0].output_size,
                    actual: pair[1].input_size,
                });
            }
        }

        Ok(())
    }
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self::default_topology()
    }
}

/// Loads and validates an architecture from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use backprop_mlp::architecture::load_architecture;
///
/// let arch = load_architecture("config/architectures/mlp_2_3_3_1.json").unwrap();
/// assert_eq!(arch.layers.len(), 3);
/// ```
pub fn load_architecture<P: AsRef<Path>>(path: P) -> Result<ArchitectureConfig> {
    let contents = fs::read_to_string(path)?;
    let config: ArchitectureConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
