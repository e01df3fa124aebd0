//! JSON documents written by `generate` and `check`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use invspec_stochastic::StochasticMatrix;

/// Document written by `generate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Validated spectrum, sorted descending (eigenvalue 1 omitted).
    pub eigenvalues: Vec<f64>,
    pub seed: Option<u64>,
    pub selection: String,
    pub tolerance: f64,
    pub matrices: Vec<MatrixEntry>,
}

/// One constructed matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub index: usize,
    pub dim: usize,
    pub rmsd: f64,
    /// Row-major entries.
    pub matrix: Vec<Vec<f64>>,
}

impl MatrixEntry {
    pub fn new(index: usize, sample: &StochasticMatrix) -> Self {
        Self {
            index,
            dim: sample.dim(),
            rmsd: sample.rmsd(),
            matrix: to_rows(sample.matrix()),
        }
    }
}

/// Report written by `check`.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub tolerance: f64,
    pub n_matrices: usize,
    pub n_failed: usize,
    pub reports: Vec<MatrixReport>,
}

/// Verification result for one matrix.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixReport {
    pub index: usize,
    pub dim: usize,
    pub stochastic: bool,
    /// Why the matrix is not stochastic, if it is not.
    pub stochastic_error: Option<String>,
    /// `None` when the dimension does not match the spectrum.
    pub rmsd: Option<f64>,
    pub passed: bool,
    /// `[re, im]` pairs, sorted by descending real part.
    pub eigenvalues: Vec<[f64; 2]>,
}

/// Converts a matrix to nested row vectors.
pub fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Converts nested row vectors back to a matrix.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        bail!(
            "ragged matrix: row {i} has {} entries, expected {n_cols}",
            row.len()
        );
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat).context("failed to shape matrix")
}

/// Serializes a document as pretty-printed JSON.
pub fn to_json<T: Serialize>(doc: &T) -> Result<String> {
    serde_json::to_string_pretty(doc).context("failed to serialize JSON")
}

/// Writes JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, json)
                .with_context(|| format!("failed to write output: {}", p.display()))?;
            info!(path = %p.display(), "output written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
