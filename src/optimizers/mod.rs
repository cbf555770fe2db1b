//! Optimizer abstractions for parameter updates
//!
//! Optimizers define how gradients turn into parameter changes. Only plain
//! gradient descent is provided: `parameter = parameter - learning_rate * gradient`.
//!
//! # Example
//!
//! ```
//! use backprop_mlp::optimizers::{Optimizer, SGD};
//! use ndarray::array;
//!
//! let mut optimizer = SGD::new(0.5);
//! let mut weights = array![[1.0, 2.0]];
//! optimizer.update(&mut weights, &array![[1.0, -1.0]]).unwrap();
//! assert_eq!(weights, array![[0.5, 2.5]]);
//! ```

pub mod sgd;

pub use sgd::SGD;

use crate::error::Result;
use crate::utils::matrix::Matrix;

/// Core trait for optimizers.
pub trait Optimizer {
    /// Update parameters in place using their gradient.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch if `parameters` and `gradients` differ in
    /// shape; `parameters` is left untouched in that case.
    fn update(&mut self, parameters: &mut Matrix, gradients: &Matrix) -> Result<()>;

    /// Get the learning rate for this optimizer.
    fn learning_rate(&self) -> f64;
}
