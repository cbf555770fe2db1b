//! Backpropagation and online gradient descent
//!
//! The [`Trainer`] walks a [`ForwardTrace`] from the output layer back to the
//! input layer, producing one weight/bias gradient pair per layer, and then
//! applies every update with the same learning rate. Gradients are computed
//! in full before any parameter changes.
//!
//! The output error signal is seeded as `prediction - target` whatever the
//! output activation is. For the sigmoid output used here this is the
//! gradient of cross-entropy with respect to the pre-activation, not of the
//! reported squared error; it does not generalise to other output
//! activations.

use crate::config::TrainingConfig;
use crate::error::{MlpError, Result};
use crate::layers::{Layer, LayerGradients};
use crate::network::{ForwardTrace, Network};
use crate::optimizers::{Optimizer, SGD};
use crate::utils::matrix::{hadamard, matmul, mean_squared_error, subtract, sum_along_axis0, Matrix};
use ndarray::Axis;
use tracing::{debug, info, warn};

/// One gradient pair per layer, in layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSet {
    layers: Vec<LayerGradients>,
}

impl GradientSet {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LayerGradients> {
        self.layers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerGradients> {
        self.layers.iter()
    }
}

/// Loss history from [`Trainer::train`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    /// Mean per-sample loss of each iteration over the dataset
    pub losses: Vec<f64>,
}

impl TrainingReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Per-sample gradient descent trainer.
#[derive(Debug, Clone)]
pub struct Trainer {
    optimizer: SGD,
    log_every: Option<usize>,
}

impl Trainer {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            optimizer: SGD::new(learning_rate),
            log_every: None,
        }
    }

    pub fn from_config(config: &TrainingConfig) -> Self {
        Self {
            optimizer: SGD::new(config.learning_rate),
            log_every: config.log_every,
        }
    }

    /// Emit an info-level loss report every `n` iterations of [`Trainer::train`].
    pub fn with_log_every(mut self, n: usize) -> Self {
        self.log_every = Some(n);
        self
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    /// Computes the loss and every layer's gradients without touching
    /// the network.
    ///
    /// # Errors
    ///
    /// [`MlpError::TraceLength`] when the trace does not have one entry per
    /// layer; a shape mismatch when `target` does not match the prediction.
    pub fn backward(
        &self,
        network: &Network,
        trace: &ForwardTrace,
        target: &Matrix,
    ) -> Result<(f64, GradientSet)> {
        let layers = network.layers();
        if trace.len() != layers.len() || layers.is_empty() {
            return Err(MlpError::TraceLength {
                expected: layers.len(),
                actual: trace.len(),
            });
        }

        let entries = trace.entries();
        let prediction = &entries[entries.len() - 1].output;
        let loss = mean_squared_error(target, prediction)?;

        let mut delta = subtract(prediction, target)?;
        let mut gradients = Vec::with_capacity(layers.len());

        for index in (0..layers.len()).rev() {
            let layer_input = &entries[index].input;
            let weights = matmul(&layer_input.t().to_owned(), &delta)?;
            let bias = sum_along_axis0(&delta);

            if index > 0 {
                let propagated = matmul(&delta, &layers[index].weights().t().to_owned())?;
                let derivative = layers[index - 1].activation().derivative(layer_input);
                delta = hadamard(&propagated, &derivative)?;
            }

            gradients.push(LayerGradients { weights, bias });
        }

        gradients.reverse();
        Ok((loss, GradientSet { layers: gradients }))
    }

    /// Applies a full gradient set. Every gradient is shape-checked before
    /// the first parameter is modified, so either all layers update or none.
    ///
    /// # Errors
    ///
    /// [`MlpError::GradientCount`] when the set does not have one entry per
    /// layer; [`MlpError::ParameterShape`] when any gradient is mis-shaped.
    pub fn apply(&mut self, network: &mut Network, gradients: &GradientSet) -> Result<()> {
        if gradients.len() != network.len() {
            return Err(MlpError::GradientCount {
                expected: network.len(),
                actual: gradients.len(),
            });
        }

        for (index, (layer, grads)) in network
            .layers()
            .iter()
            .zip(gradients.iter())
            .enumerate()
        {
            layer.check_gradients(index, grads)?;
        }

        for (layer, grads) in network.layers_mut().iter_mut().zip(gradients.iter()) {
            layer.update_parameters(grads, &mut self.optimizer)?;
        }

        Ok(())
    }

    /// One backward pass and update for a single forward trace.
    ///
    /// Returns the squared-error loss measured before the update.
    pub fn step(
        &mut self,
        network: &mut Network,
        trace: &ForwardTrace,
        target: &Matrix,
    ) -> Result<f64> {
        let (loss, gradients) = self.backward(network, trace, target)?;
        self.apply(network, &gradients)?;
        Ok(loss)
    }

    /// Online training: for each iteration, every row of `inputs` in order
    /// goes through forward, loss, backward and update before the next row.
    ///
    /// `inputs` is `samples × input_size`, `targets` is `samples × output_size`.
    /// An empty training set is rejected, since its loss would be `0 / 0`.
    pub fn train(
        &mut self,
        network: &mut Network,
        inputs: &Matrix,
        targets: &Matrix,
        iterations: usize,
    ) -> Result<TrainingReport> {
        if inputs.nrows() != targets.nrows() {
            return Err(MlpError::shape(
                "Trainer::train",
                (inputs.nrows(), network.output_size()),
                targets.dim(),
            ));
        }

        if inputs.nrows() == 0 {
            return Err(MlpError::InvalidConfig(
                "training set has no rows".to_string(),
            ));
        }

        let samples = inputs.nrows();
        let mut report = TrainingReport {
            losses: Vec::with_capacity(iterations),
        };

        for iteration in 0..iterations {
            let mut total_loss = 0.0;

            for sample in 0..samples {
                let input = inputs.row(sample).insert_axis(Axis(0)).to_owned();
                let target = targets.row(sample).insert_axis(Axis(0)).to_owned();

                let (_, trace) = network.forward(&input)?;
                let loss = self.step(network, &trace, &target)?;
                debug!(iteration, sample, loss, "training step");
                total_loss += loss;
            }

            let mean_loss = total_loss / samples as f64;
            if !mean_loss.is_finite() {
                warn!(iteration, loss = mean_loss, "loss is no longer finite");
            }
            if let Some(every) = self.log_every {
                if (iteration + 1) % every == 0 {
                    info!(iteration = iteration + 1, loss = mean_loss, "training progress");
                }
            }
            report.losses.push(mean_loss);
        }

        if let Some(loss) = report.final_loss() {
            info!(iterations, samples, loss, "training finished");
        }
        Ok(report)
    }
}

/// Thresholded binary class for every entry of `prediction`, row-major:
/// `0` below `threshold`, `1` otherwise.
pub fn classify(prediction: &Matrix, threshold: f64) -> Vec<u8> {
    prediction
        .iter()
        .map(|&value| if value < threshold { 0 } else { 1 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::DenseLayer;
    use crate::utils::activations::Activation;
    use ndarray::array;

    fn two_layer_network() -> Network {
        Network::new(vec![
            DenseLayer::from_parameters(
                array![[1.0, -1.0], [0.5, 2.0]],
                array![[0.0, 0.0]],
                Activation::Relu,
            )
            .unwrap(),
            DenseLayer::from_parameters(array![[2.0], [1.0]], array![[0.0]], Activation::Sigmoid)
                .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_backward_hand_computed() {
        // h = relu([1, 0]·W1) = relu([1, -1]) = [1, 0]
        // p = sigmoid(2) ; delta_out = p - 1
        let network = two_layer_network();
        let (prediction, trace) = network.forward(&array![[1.0, 0.0]]).unwrap();
        let trainer = Trainer::new(0.1);
        let (_, grads) = trainer.backward(&network, &trace, &array![[1.0]]).unwrap();

        let d = prediction[[0, 0]] - 1.0;
        let out = grads.get(1).unwrap();
        assert!((out.weights[[0, 0]] - d).abs() < 1e-12);
        assert_eq!(out.weights[[1, 0]], 0.0);
        assert!((out.bias[[0, 0]] - d).abs() < 1e-12);

        // delta_hidden = [2d, d] ⊙ relu'([1, 0]) = [2d, 0]
        let hidden = grads.get(0).unwrap();
        assert!((hidden.weights[[0, 0]] - 2.0 * d).abs() < 1e-12);
        assert_eq!(hidden.weights[[0, 1]], 0.0);
        assert_eq!(hidden.weights.row(1).to_vec(), vec![0.0, 0.0]);
        assert!((hidden.bias[[0, 0]] - 2.0 * d).abs() < 1e-12);
    }

    #[test]
    fn test_step_uses_pre_update_parameters() {
        let mut network = two_layer_network();
        let before = network.clone();
        let (_, trace) = network.forward(&array![[1.0, 0.0]]).unwrap();
        let mut trainer = Trainer::new(0.5);

        let (_, grads) = trainer.backward(&network, &trace, &array![[1.0]]).unwrap();
        trainer.step(&mut network, &trace, &array![[1.0]]).unwrap();

        let layers = network.layers().iter().zip(before.layers());
        for ((after, old), g) in layers.zip(grads.iter()) {
            let expected = old.weights() - &(&g.weights * 0.5);
            assert_eq!(after.weights(), &expected);
            let expected_bias = old.bias() - &(&g.bias * 0.5);
            assert_eq!(after.bias(), &expected_bias);
        }
    }

    #[test]
    fn test_trace_length_mismatch() {
        let mut network = two_layer_network();
        let (_, trace) = network.forward(&array![[1.0, 0.0]]).unwrap();
        let short = ForwardTrace::from_entries(trace.entries()[..1].to_vec());
        let mut trainer = Trainer::new(0.1);

        assert!(matches!(
            trainer.step(&mut network, &short, &array![[1.0]]),
            Err(MlpError::TraceLength {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_gradient_count_mismatch_leaves_network() {
        let mut network = two_layer_network();
        let before = network.clone();
        let (_, trace) = network.forward(&array![[1.0, 0.0]]).unwrap();
        let mut trainer = Trainer::new(0.1);
        let (_, mut grads) = trainer.backward(&network, &trace, &array![[1.0]]).unwrap();
        grads.layers.pop();

        let result = trainer.apply(&mut network, &grads);
        assert!(matches!(
            result,
            Err(MlpError::GradientCount {
                expected: 2,
                actual: 1
            })
        ));
        assert!(result.unwrap_err().to_string().starts_with("Gradient set"));
        for (after, old) in network.layers().iter().zip(before.layers()) {
            assert_eq!(after.weights(), old.weights());
        }
    }

    #[test]
    fn test_from_config_carries_settings() {
        let config = TrainingConfig {
            learning_rate: 0.25,
            log_every: Some(10),
            ..TrainingConfig::default()
        };
        let trainer = Trainer::from_config(&config);
        assert_eq!(trainer.learning_rate(), 0.25);
        assert_eq!(trainer.log_every, Some(10));

        let trainer = Trainer::new(0.1).with_log_every(3);
        assert_eq!(trainer.log_every, Some(3));
    }

    #[test]
    fn test_target_shape_mismatch_leaves_network() {
        let mut network = two_layer_network();
        let before = network.clone();
        let (_, trace) = network.forward(&array![[1.0, 0.0]]).unwrap();
        let mut trainer = Trainer::new(0.1);

        assert!(trainer
            .step(&mut network, &trace, &array![[1.0, 0.0]])
            .is_err());
        for (after, old) in network.layers().iter().zip(before.layers()) {
            assert_eq!(after.weights(), old.weights());
            assert_eq!(after.bias(), old.bias());
        }
    }

    #[test]
    fn test_classify_threshold() {
        let prediction = array![[0.0], [0.29], [0.3], [0.5], [1.0]];
        assert_eq!(classify(&prediction, 0.3), vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_train_rejects_row_mismatch() {
        let mut network = two_layer_network();
        let mut trainer = Trainer::new(0.1);
        let result = trainer.train(
            &mut network,
            &array![[1.0, 0.0], [0.0, 1.0]],
            &array![[1.0]],
            1,
        );
        assert!(result.is_err());
    }
}
