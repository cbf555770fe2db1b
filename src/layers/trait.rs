//! Layer trait definition for neural network layers
//!
//! The trait gives the network and trainer a uniform interface for forward
//! propagation, gradient validation and parameter updates.

use crate::error::Result;
use crate::optimizers::Optimizer;
use crate::utils::matrix::Matrix;

/// Gradient pair for a single layer, shaped like its weights and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub bias: Matrix,
}

/// Core trait for neural network layers.
///
/// Layers are pure functions of their parameters during the forward pass;
/// parameters only change through [`Layer::update_parameters`].
///
/// # Example
///
/// ```ignore
/// let output = layer.forward(&input)?;
/// layer.check_gradients(0, &grads)?;
/// layer.update_parameters(&grads, &mut optimizer)?;
/// ```
pub trait Layer {
    /// Forward propagation through the layer.
    ///
    /// # Arguments
    ///
    /// * `input` - Input matrix (batch_size × input_size)
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch when `input` has the wrong column count.
    fn forward(&self, input: &Matrix) -> Result<Matrix>;

    /// Verifies that `gradients` match this layer's parameter shapes.
    ///
    /// `index` is the layer's position in the network, used for reporting.
    fn check_gradients(&self, index: usize, gradients: &LayerGradients) -> Result<()>;

    /// Applies one optimizer step to weights and bias.
    fn update_parameters(
        &mut self,
        gradients: &LayerGradients,
        optimizer: &mut dyn Optimizer,
    ) -> Result<()>;

    /// Number of input features per sample.
    fn input_size(&self) -> usize;

    /// Number of output features per sample.
    fn output_size(&self) -> usize;

    /// Total count of weights and biases.
    fn parameter_count(&self) -> usize;
}
