//! Dense f64 matrix primitives
//!
//! Matrices are `ndarray::Array2<f64>` values. Operations return new matrices;
//! any operation with a shape precondition checks it and returns
//! [`MlpError::ShapeMismatch`] instead of broadcasting or truncating.

use crate::error::{MlpError, Result};
use ndarray::{Array2, Axis};
use rand::Rng;
use rand_distr::StandardNormal;

/// Row-major 2D array of f64 used for inputs, parameters and activations.
pub type Matrix = Array2<f64>;

/// Random matrix with He-style scaling keyed off the row count (fan-in).
///
/// Each entry is an independent draw from N(0, 1) multiplied by
/// `sqrt(2 / rows)`.
///
/// # Example
///
/// ```
/// use backprop_mlp::utils::matrix::random_matrix;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let w = random_matrix(2, 3, &mut rng);
/// assert_eq!(w.dim(), (2, 3));
/// ```
pub fn random_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let scale = (2.0 / rows as f64).sqrt();
    Array2::from_shape_fn((rows, cols), |_| {
        let draw: f64 = rng.sample(StandardNormal);
        draw * scale
    })
}

/// Same as [`random_matrix`] but seeded from the thread-local generator.
pub fn random_matrix_from_entropy(rows: usize, cols: usize) -> Matrix {
    random_matrix(rows, cols, &mut rand::thread_rng())
}

/// All-zero matrix.
pub fn zero_matrix(rows: usize, cols: usize) -> Matrix {
    Array2::zeros((rows, cols))
}

/// Build a matrix from row-major data.
pub fn from_rows(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
    let len = data.len();
    Array2::from_shape_vec((rows, cols), data)
        .map_err(|_| MlpError::shape("from_rows", (rows, cols), (1, len)))
}

/// Mean of squared elementwise differences over all entries.
///
/// Fails when the two matrices have different shapes. Two empty matrices
/// of the same shape yield `NaN`.
pub fn mean_squared_error(expected: &Matrix, predicted: &Matrix) -> Result<f64> {
    if expected.dim() != predicted.dim() {
        return Err(MlpError::shape(
            "mean_squared_error",
            expected.dim(),
            predicted.dim(),
        ));
    }

    let sum: f64 = expected
        .iter()
        .zip(predicted.iter())
        .map(|(e, p)| {
            let diff = e - p;
            diff * diff
        })
        .sum();

    Ok(sum / expected.len() as f64)
}

/// Column sums collapsed into a single `1 × cols` row.
pub fn sum_along_axis0(matrix: &Matrix) -> Matrix {
    matrix.sum_axis(Axis(0)).insert_axis(Axis(0))
}

/// Matrix product `a · b`; inner dimensions must agree.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.ncols() != b.nrows() {
        return Err(MlpError::shape("matmul", (a.ncols(), b.ncols()), b.dim()));
    }
    Ok(a.dot(b))
}

/// Adds a `1 × cols` row to every row of `matrix`.
pub fn add_row_broadcast(matrix: &Matrix, row: &Matrix) -> Result<Matrix> {
    if row.dim() != (1, matrix.ncols()) {
        return Err(MlpError::shape(
            "add_row_broadcast",
            (1, matrix.ncols()),
            row.dim(),
        ));
    }
    Ok(matrix + &row.row(0))
}

/// Elementwise product.
pub fn hadamard(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.dim() != b.dim() {
        return Err(MlpError::shape("hadamard", a.dim(), b.dim()));
    }
    Ok(a * b)
}

/// Elementwise difference `a - b`.
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.dim() != b.dim() {
        return Err(MlpError::shape("subtract", a.dim(), b.dim()));
    }
    Ok(a - b)
}
