//! Activation functions for neural networks
//!
//! Each activation is applied elementwise to a matrix. Derivatives are
//! evaluated on the *post-activation* value, i.e. on the layer's output, not
//! on its pre-activation input:
//! - ReLU: `max(0, x)`, derivative `1` where the output is `> 0`, else `0`
//! - Sigmoid: `1 / (1 + exp(-x))`, derivative `y * (1 - y)`
//! - Identity: no-op, derivative `1`

use crate::utils::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// Sigmoid of a single value.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming y = sigmoid(z).
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Closed set of activations a layer can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    /// No activation; serialized as `"none"`.
    #[default]
    #[serde(rename = "none", alias = "identity")]
    Identity,
}

impl Activation {
    /// Applies the activation elementwise, producing a new matrix.
    pub fn apply(&self, matrix: &Matrix) -> Matrix {
        match self {
            Activation::Relu => matrix.mapv(|x| x.max(0.0)),
            Activation::Sigmoid => matrix.mapv(sigmoid),
            Activation::Identity => matrix.clone(),
        }
    }

    /// Derivative evaluated on the activation's own output.
    ///
    /// For ReLU the value at exactly 0 is 0.
    pub fn derivative(&self, output: &Matrix) -> Matrix {
        match self {
            Activation::Relu => output.mapv(|y| if y > 0.0 { 1.0 } else { 0.0 }),
            Activation::Sigmoid => output.mapv(sigmoid_derivative),
            Activation::Identity => output.mapv(|_| 1.0),
        }
    }

    /// Configuration name of this activation.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Identity => "none",
        }
    }

    /// Parses a configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "relu" => Some(Activation::Relu),
            "sigmoid" => Some(Activation::Sigmoid),
            "none" | "identity" => Some(Activation::Identity),
            _ => None,
        }
    }
}
