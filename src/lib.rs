//! Minimal feed-forward MLP trainer
//!
//! Builds a small multilayer perceptron over dense f64 matrices, runs forward
//! inference, and trains it one sample at a time with manual backpropagation
//! and plain gradient descent.
//!
//! # Modules
//!
//! - `utils`: matrix primitives and activation functions
//! - `layers`: Layer trait and the dense layer
//! - `network`: layer sequence, forward pass and forward trace
//! - `training`: backward pass, parameter update and the training loop
//! - `optimizers`: gradient descent update rule
//! - `architecture` / `config`: JSON topology and training configuration
//! - `error`: error taxonomy
//!
//! # Example
//!
//! ```
//! use backprop_mlp::network::Network;
//! use backprop_mlp::training::{classify, Trainer};
//! use ndarray::array;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut network = Network::default_topology(&mut rng);
//! let mut trainer = Trainer::new(0.01);
//!
//! let report = trainer
//!     .train(&mut network, &array![[1.0, 0.0]], &array![[1.0]], 10)
//!     .unwrap();
//! assert_eq!(report.losses.len(), 10);
//!
//! let prediction = network.predict(&array![[1.0, 0.0]]).unwrap();
//! assert_eq!(classify(&prediction, 0.3).len(), 1);
//! ```

pub mod architecture;
pub mod config;
pub mod error;
pub mod layers;
pub mod network;
pub mod optimizers;
pub mod training;
pub mod utils;

pub use error::{MlpError, Result};
pub use network::{ForwardTrace, Network, TraceEntry};
pub use training::{GradientSet, Trainer, TrainingReport};
