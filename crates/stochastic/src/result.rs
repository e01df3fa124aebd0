//! Output type for stochastic matrix construction.

use ndarray::Array2;

use crate::spectrum::Spectrum;

/// A verified row-stochastic matrix and its deviation report.
#[derive(Debug, Clone)]
pub struct StochasticMatrix {
    matrix: Array2<f64>,
    spectrum: Spectrum,
    /// Root-mean-square deviation of the measured non-trivial eigenvalues.
    rmsd: f64,
}

impl StochasticMatrix {
    /// Creates a new `StochasticMatrix`.
    pub(crate) fn new(matrix: Array2<f64>, spectrum: Spectrum, rmsd: f64) -> Self {
        Self {
            matrix,
            spectrum,
            rmsd,
        }
    }

    /// Returns the matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Returns the validated spectrum the matrix was built from.
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    /// Returns the spectral RMSD measured during verification.
    pub fn rmsd(&self) -> f64 {
        self.rmsd
    }

    /// Returns the matrix dimension.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Consumes the result, returning the matrix.
    pub fn into_matrix(self) -> Array2<f64> {
        self.matrix
    }
}
