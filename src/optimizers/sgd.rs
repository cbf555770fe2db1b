//! Gradient descent optimizer implementation
//!
//! Vanilla gradient descent: `w = w - η * ∇L/∂w`, no momentum and no
//! adaptive learning rates.

use crate::error::{MlpError, Result};
use crate::optimizers::Optimizer;
use crate::utils::matrix::Matrix;

/// Plain gradient descent with a fixed learning rate.
///
/// # Example
///
/// ```
/// use backprop_mlp::optimizers::{Optimizer, SGD};
///
/// let optimizer = SGD::new(0.01);
/// assert_eq!(optimizer.learning_rate(), 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct SGD {
    learning_rate: f64,
}

impl SGD {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for SGD {
    fn update(&mut self, parameters: &mut Matrix, gradients: &Matrix) -> Result<()> {
        if parameters.dim() != gradients.dim() {
            return Err(MlpError::shape(
                "SGD::update",
                parameters.dim(),
                gradients.dim(),
            ));
        }
        parameters.scaled_add(-self.learning_rate, gradients);
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}
