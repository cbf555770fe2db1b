//! Error types for matrix, layer and training operations
//!
//! Every failure in this crate is a programming or configuration defect, so
//! nothing here is retryable. Errors carry the shapes involved so the caller
//! can see exactly which operand was wrong.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MlpError>;

/// Errors raised by the network, trainer and configuration loaders.
#[derive(Debug, Error)]
pub enum MlpError {
    /// Operands of a matrix operation violate its algebraic precondition.
    #[error("Shape mismatch in {op}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A layer's input size disagrees with the previous layer's output size.
    #[error("Layer connection mismatch at layer {index}: expected input size {expected}, got {actual}")]
    LayerConnection {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A forward trace does not have one entry per layer.
    #[error("Forward trace has {actual} entries but the network has {expected} layers")]
    TraceLength { expected: usize, actual: usize },

    /// A gradient set does not have one entry per layer.
    #[error("Gradient set has {actual} entries but the network has {expected} layers")]
    GradientCount { expected: usize, actual: usize },

    /// A gradient does not match the parameter it would update.
    #[error("Gradient for layer {layer} has shape {actual:?}, parameter has {expected:?}")]
    ParameterShape {
        layer: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MlpError {
    pub(crate) fn shape(op: &'static str, expected: (usize, usize), actual: (usize, usize)) -> Self {
        MlpError::ShapeMismatch {
            op,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message_carries_shapes() {
        let err = MlpError::shape("mean_squared_error", (1, 1), (1, 2));
        let message = err.to_string();
        assert!(message.contains("mean_squared_error"));
        assert!(message.contains("(1, 1)"));
        assert!(message.contains("(1, 2)"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: MlpError = parse.unwrap_err().into();
        assert!(matches!(err, MlpError::Json(_)));
    }
}
