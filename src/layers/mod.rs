//! Layer abstractions for neural networks
//!
//! This module provides the Layer trait and the dense layer the network is
//! composed of.

mod r#trait;
pub mod dense;

pub use dense::DenseLayer;
pub use r#trait::{Layer, LayerGradients};
