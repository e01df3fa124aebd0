//! Splitting one diagonal element into a 2x2 block.
//!
//! Splitting a diagonal element `m` with ratio `r` produces
//!
//! ```text
//! S = (m / r_max) * | r          r_max - r |
//!                   | r - r_min  1 - r     |
//! ```
//!
//! with `r_min = e / (e + m)` and `r_max = m / (e + m)`. Both rows of `S` sum
//! to `m` and `trace(S) = e + m`, so replacing `m` with `S` (and duplicating
//! its row) adds exactly one eigenvalue `e` to the matrix.

use tracing::trace;

use crate::error::StochasticError;

/// The result of splitting a diagonal element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    block: [[f64; 2]; 2],
    ratio: f64,
}

impl Split {
    /// Returns the 2x2 diagonal block.
    pub fn block(&self) -> &[[f64; 2]; 2] {
        &self.block
    }

    /// Returns the sampled mixing ratio `r`.
    ///
    /// Off-diagonal mass flowing into the split element is divided in
    /// proportion `r : 1 - r` between the two new columns.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

/// Returns the feasible interval `(r_min, r_max)` for the mixing ratio.
///
/// `r_min = max(0, e / (e + m))`, `r_max = min(1, m / (e + m))`. The interval
/// is non-empty when `m >= e >= 0` and `m > 0`.
pub fn ratio_bounds(eigenvalue: f64, matrix_element: f64) -> (f64, f64) {
    let total = eigenvalue + matrix_element;
    let r_min = (eigenvalue / total).max(0.0);
    let r_max = (matrix_element / total).min(1.0);
    (r_min, r_max)
}

/// Splits a diagonal element so that one new eigenvalue appears.
///
/// Samples `r` uniformly from [`ratio_bounds`] using `rng` and builds the
/// block described in the module docs.
///
/// # Errors
///
/// - [`StochasticError::UnsupportedSpectrum`] if `eigenvalue` is negative.
/// - [`StochasticError::InfeasibleSplit`] if `matrix_element` is not positive
///   or is smaller than `|eigenvalue|`.
/// - [`StochasticError::InvalidSpectrum`] if `eigenvalue` is not finite.
pub fn split_element(
    eigenvalue: f64,
    matrix_element: f64,
    rng: &mut impl rand::Rng,
) -> Result<Split, StochasticError> {
    if !eigenvalue.is_finite() {
        return Err(StochasticError::InvalidSpectrum {
            reason: format!("eigenvalue {eigenvalue} is not finite"),
        });
    }
    if eigenvalue < 0.0 {
        return Err(StochasticError::UnsupportedSpectrum { eigenvalue });
    }
    // Negated comparison so that NaN elements are rejected too.
    if !(matrix_element > 0.0 && matrix_element >= eigenvalue.abs()) {
        return Err(StochasticError::InfeasibleSplit {
            eigenvalue,
            matrix_element,
        });
    }

    let (r_min, r_max) = ratio_bounds(eigenvalue, matrix_element);
    let r = rng.random_range(r_min..=r_max);
    trace!(eigenvalue, matrix_element, r_min, r_max, r, "split ratio sampled");

    let scale = matrix_element / r_max;
    let block = [
        [scale * r, scale * (r_max - r)],
        [scale * (r - r_min), scale * (1.0 - r)],
    ];

    Ok(Split { block, ratio: r })
}
