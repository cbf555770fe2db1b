//! Shared utilities for the network
//!
//! Matrix construction, loss and reduction helpers, plus the activation
//! functions layers are configured with.

pub mod activations;
pub mod matrix;

pub use activations::Activation;
pub use matrix::{mean_squared_error, random_matrix, sum_along_axis0, zero_matrix, Matrix};
