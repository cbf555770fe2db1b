//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer that performs the transformation
//! `output = activation(input × weights + bias)`.

use crate::error::{MlpError, Result};
use crate::layers::{Layer, LayerGradients};
use crate::optimizers::Optimizer;
use crate::utils::activations::Activation;
use crate::utils::matrix::{add_row_broadcast, matmul, random_matrix, zero_matrix, Matrix};
use rand::Rng;

/// Dense (fully connected) layer with weights, bias and an activation.
///
/// Performs `y = f(xW + b)` where x is the input (batch_size × input_size),
/// W is the weight matrix (input_size × output_size), b is the bias row
/// (1 × output_size) broadcast across the batch, and f is the activation.
///
/// # Example
///
/// ```
/// use backprop_mlp::layers::{DenseLayer, Layer};
/// use backprop_mlp::utils::Activation;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let layer = DenseLayer::new(2, 3, Activation::Relu, &mut rng);
/// assert_eq!(layer.input_size(), 2);
/// assert_eq!(layer.output_size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Matrix,
    bias: Matrix,
    activation: Activation,
}

impl DenseLayer {
    /// Create a new DenseLayer with He-scaled normal weights and zero bias.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        Self {
            weights: random_matrix(input_size, output_size, rng),
            bias: zero_matrix(1, output_size),
            activation,
        }
    }

    /// Create a layer from explicit parameters.
    ///
    /// # Errors
    ///
    /// Fails unless `bias` is `1 × weights.ncols()`.
    pub fn from_parameters(weights: Matrix, bias: Matrix, activation: Activation) -> Result<Self> {
        if bias.dim() != (1, weights.ncols()) {
            return Err(MlpError::shape(
                "DenseLayer::from_parameters",
                (1, weights.ncols()),
                bias.dim(),
            ));
        }
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }
}

impl Layer for DenseLayer {
    fn forward(&self, input: &Matrix) -> Result<Matrix> {
        let product = matmul(input, &self.weights)?;
        let affine = add_row_broadcast(&product, &self.bias)?;
        Ok(self.activation.apply(&affine))
    }

    fn check_gradients(&self, index: usize, gradients: &LayerGradients) -> Result<()> {
        if gradients.weights.dim() != self.weights.dim() {
            return Err(MlpError::ParameterShape {
                layer: index,
                expected: self.weights.dim(),
                actual: gradients.weights.dim(),
            });
        }
        if gradients.bias.dim() != self.bias.dim() {
            return Err(MlpError::ParameterShape {
                layer: index,
                expected: self.bias.dim(),
                actual: gradients.bias.dim(),
            });
        }
        Ok(())
    }

    fn update_parameters(
        &mut self,
        gradients: &LayerGradients,
        optimizer: &mut dyn Optimizer,
    ) -> Result<()> {
        optimizer.update(&mut self.weights, &gradients.weights)?;
        optimizer.update(&mut self.bias, &gradients.bias)
    }

    fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    fn parameter_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}
