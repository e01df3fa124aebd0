//! Spectral and stochasticity checks for constructed matrices.

use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;

use crate::error::StochasticError;
use crate::spectrum::Spectrum;

/// Maximum allowed deviation of a row sum from 1.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Most negative entry still accepted as non-negative.
pub const NEGATIVITY_TOLERANCE: f64 = 1e-12;

/// Computes all eigenvalues of a square matrix.
///
/// Uses a real Schur decomposition, so complex-conjugate pairs are returned
/// for non-symmetric input. The result is sorted by descending real part,
/// then by descending imaginary part.
///
/// # Errors
///
/// Returns [`StochasticError::NotSquare`] for a non-square matrix.
pub fn eigenvalues(matrix: &Array2<f64>) -> Result<Vec<Complex64>, StochasticError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(StochasticError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Ok(Vec::new());
    }

    let dense = DMatrix::from_fn(rows, cols, |i, j| matrix[[i, j]]);
    let mut values: Vec<Complex64> = dense.complex_eigenvalues().iter().copied().collect();
    values.sort_by(|a, b| b.re.total_cmp(&a.re).then(b.im.total_cmp(&a.im)));
    Ok(values)
}

/// Root-mean-square deviation between the measured and requested spectrum.
///
/// Drops the largest eigenvalue of `matrix` (the implicit 1) and pairs the
/// rest with `spectrum` in descending order. Each run of equal requested
/// values is compared against the mean of its measured eigenvalues: a
/// repeated eigenvalue is usually defective, so the solver scatters it by
/// about the square root of machine epsilon while the cluster mean stays
/// accurate to machine epsilon. An empty spectrum has zero deviation.
///
/// # Errors
///
/// - [`StochasticError::NotSquare`] for a non-square matrix.
/// - [`StochasticError::DimensionMismatch`] if `matrix` is not
///   `spectrum.dim()` square.
pub fn spectral_rmsd(matrix: &Array2<f64>, spectrum: &Spectrum) -> Result<f64, StochasticError> {
    let measured = eigenvalues(matrix)?;
    if measured.len() != spectrum.dim() {
        return Err(StochasticError::DimensionMismatch {
            expected: spectrum.dim(),
            got: measured.len(),
        });
    }
    if spectrum.is_empty() {
        return Ok(0.0);
    }

    let measured = &measured[1..];
    let mut sum_sq = 0.0;
    let mut offset = 0;
    for run in spectrum.values().chunk_by(|a, b| a == b) {
        let cluster = &measured[offset..offset + run.len()];
        let mean = cluster.iter().sum::<Complex64>() / run.len() as f64;
        sum_sq += run.len() as f64 * (mean - run[0]).norm_sqr();
        offset += run.len();
    }
    Ok((sum_sq / spectrum.len() as f64).sqrt())
}

/// Validates that a matrix is row-stochastic.
///
/// Checks that the matrix is square and non-empty, every entry is finite and
/// at least `-negativity_tolerance`, and every row sums to 1 within
/// `row_tolerance`.
///
/// # Errors
///
/// Returns [`StochasticError::NotSquare`] or
/// [`StochasticError::NotStochastic`] describing the first violation.
pub fn validate_stochastic(
    matrix: &Array2<f64>,
    row_tolerance: f64,
    negativity_tolerance: f64,
) -> Result<(), StochasticError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(StochasticError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(StochasticError::NotStochastic {
            reason: "matrix is empty".to_string(),
        });
    }

    for (i, row) in matrix.rows().into_iter().enumerate() {
        for (j, &p) in row.iter().enumerate() {
            if !p.is_finite() {
                return Err(StochasticError::NotStochastic {
                    reason: format!("entry [{i}][{j}] is not finite: {p}"),
                });
            }
            if p < -negativity_tolerance {
                return Err(StochasticError::NotStochastic {
                    reason: format!("entry [{i}][{j}] is negative: {p}"),
                });
            }
        }
        let sum = row.sum();
        if (sum - 1.0).abs() > row_tolerance {
            return Err(StochasticError::NotStochastic {
                reason: format!("row {i} sums to {sum}, expected 1"),
            });
        }
    }
    Ok(())
}
