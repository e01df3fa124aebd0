//! The embiggening loop.

use ndarray::Array2;
use tracing::debug;

use crate::config::Selection;
use crate::embiggen::embiggen_matrix;
use crate::error::StochasticError;
use crate::select::select_element;
use crate::spectrum::Spectrum;

/// Builds a row-stochastic matrix whose non-trivial eigenvalues are `spectrum`.
///
/// Starts from the 1x1 matrix `[[1.0]]` and splits it with the largest
/// eigenvalue. Each remaining eigenvalue, in descending order, is then placed
/// on a diagonal element chosen by `selection` and embedded with
/// [`embiggen_matrix`]. An empty spectrum yields `[[1.0]]`.
///
/// The result is not verified; see [`construct`](crate::construct).
///
/// # Errors
///
/// Returns [`StochasticError::NoFeasibleElement`] if the selector finds no
/// host for an eigenvalue, or any error raised while splitting.
#[tracing::instrument(skip(spectrum, rng), fields(dim = spectrum.dim()))]
pub fn build_matrix(
    spectrum: &Spectrum,
    selection: Selection,
    rng: &mut impl rand::Rng,
) -> Result<Array2<f64>, StochasticError> {
    let mut matrix = Array2::from_elem((1, 1), 1.0);
    let mut eigenvalues = spectrum.iter();

    if let Some(first) = eigenvalues.next() {
        matrix = embiggen_matrix(first, &matrix, 0, rng)?;
        debug!(eigenvalue = first, dim = 2, "initial split");
    }

    for eigenvalue in eigenvalues {
        let index = select_element(eigenvalue, &matrix, selection, rng)?;
        matrix = embiggen_matrix(eigenvalue, &matrix, index, rng)?;
        debug!(eigenvalue, index, dim = matrix.nrows(), "embiggened");
    }

    Ok(matrix)
}
