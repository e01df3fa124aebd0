//! Choosing the diagonal element that hosts the next eigenvalue.

use ndarray::Array2;
use rand::seq::IndexedRandom;

use crate::config::Selection;
use crate::error::StochasticError;

/// Returns the indices of diagonal entries strictly greater than `eigenvalue`.
pub fn feasible_elements(eigenvalue: f64, matrix: &Array2<f64>) -> Vec<usize> {
    matrix
        .diag()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d > eigenvalue)
        .map(|(i, _)| i)
        .collect()
}

/// Chooses a diagonal element of `matrix` to split for `eigenvalue`.
///
/// Candidates are the diagonal entries strictly greater than `eigenvalue`;
/// `selection` decides among them. Only [`Selection::Uniform`] draws from
/// `rng`.
///
/// # Errors
///
/// Returns [`StochasticError::NotSquare`] for a non-square matrix and
/// [`StochasticError::NoFeasibleElement`] when no diagonal entry qualifies.
pub fn select_element(
    eigenvalue: f64,
    matrix: &Array2<f64>,
    selection: Selection,
    rng: &mut impl rand::Rng,
) -> Result<usize, StochasticError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(StochasticError::NotSquare { rows, cols });
    }

    let candidates = feasible_elements(eigenvalue, matrix);
    let chosen = match selection {
        Selection::Uniform => candidates.choose(rng).copied(),
        Selection::FirstFeasible => candidates.first().copied(),
        Selection::LargestDiagonal => candidates.iter().copied().reduce(|best, i| {
            if matrix[[i, i]] > matrix[[best, best]] {
                i
            } else {
                best
            }
        }),
    };

    chosen.ok_or_else(|| StochasticError::NoFeasibleElement {
        eigenvalue,
        max_diagonal: matrix.diag().iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}
