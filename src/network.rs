//! Sequential network of dense layers
//!
//! A [`Network`] exclusively owns its layers. The forward pass records every
//! layer's input and output in a [`ForwardTrace`], which the trainer consumes
//! in reverse order to compute gradients.

use crate::architecture::ArchitectureConfig;
use crate::error::{MlpError, Result};
use crate::layers::{DenseLayer, Layer};
use crate::utils::activations::Activation;
use crate::utils::matrix::Matrix;
use rand::Rng;

/// Input received and output produced by one layer during a forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub input: Matrix,
    pub output: Matrix,
}

/// Per-layer record of one forward pass, in layer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardTrace {
    entries: Vec<TraceEntry>,
}

impl ForwardTrace {
    pub fn from_entries(entries: Vec<TraceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output of the last layer, if any layer ran.
    pub fn prediction(&self) -> Option<&Matrix> {
        self.entries.last().map(|entry| &entry.output)
    }
}

/// Ordered sequence of dense layers with a fixed topology.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

impl Network {
    /// Builds a network, checking that consecutive layers connect.
    ///
    /// # Errors
    ///
    /// [`MlpError::LayerConnection`] when layer `i`'s input size differs from
    /// layer `i - 1`'s output size, [`MlpError::InvalidConfig`] for an empty
    /// layer list.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(MlpError::InvalidConfig(
                "network must have at least one layer".to_string(),
            ));
        }

        for (index, pair) in layers.windows(2).enumerate() {
            let expected = pair[0].output_size();
            let actual = pair[1].input_size();
            if expected != actual {
                return Err(MlpError::LayerConnection {
                    index: index + 1,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self { layers })
    }

    /// The 2 → 3 → 3 → 1 network: ReLU, ReLU, Sigmoid.
    pub fn default_topology<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            layers: vec![
                DenseLayer::new(2, 3, Activation::Relu, rng),
                DenseLayer::new(3, 3, Activation::Relu, rng),
                DenseLayer::new(3, 1, Activation::Sigmoid, rng),
            ],
        }
    }

    /// Builds randomly initialised layers from an architecture description.
    pub fn from_architecture<R: Rng + ?Sized>(
        architecture: &ArchitectureConfig,
        rng: &mut R,
    ) -> Result<Self> {
        architecture.validate()?;
        let layers = architecture
            .layers
            .iter()
            .map(|layer| {
                DenseLayer::new(
                    layer.input_size,
                    layer.output_size,
                    layer.activation,
                    &mut *rng,
                )
            })
            .collect();
        Self::new(layers)
    }

    /// Runs every layer in order, retaining each input/output pair.
    pub fn forward(&self, input: &Matrix) -> Result<(Matrix, ForwardTrace)> {
        let mut entries = Vec::with_capacity(self.layers.len());
        let mut current = input.clone();

        for layer in &self.layers {
            let output = layer.forward(&current)?;
            entries.push(TraceEntry {
                input: current,
                output: output.clone(),
            });
            current = output;
        }

        Ok((current, ForwardTrace::from_entries(entries)))
    }

    /// Forward pass without keeping the trace.
    pub fn predict(&self, input: &Matrix) -> Result<Matrix> {
        self.layers
            .iter()
            .try_fold(input.clone(), |current, layer| layer.forward(&current))
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [DenseLayer] {
        &mut self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.parameter_count()).sum()
    }
}
