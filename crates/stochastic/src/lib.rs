//! Row-stochastic matrices with a prescribed spectrum.
//!
//! Given target eigenvalues in `[0, 1)`, this crate constructs a
//! row-stochastic matrix whose eigenvalues are exactly those values plus the
//! eigenvalue 1 that every stochastic matrix carries. Construction is
//! randomised: each call samples one of many valid matrices.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌─────────────────────────────┐     ┌──────────────┐
//!  │  spectrum     │────▶│  build                      │────▶│  verify      │
//!  │  (validate)   │     │  select ─▶ split ─▶ embiggen │     │  (RMSD)      │
//!  └──────────────┘     └─────────────────────────────┘     └──────────────┘
//! ```
//!
//! Starting from `[[1.0]]`, each eigenvalue splits one diagonal entry into a
//! 2x2 block, growing the matrix by one state while keeping every eigenvalue
//! already embedded.
//!
//! # Quick start
//!
//! ```
//! use invspec_stochastic::stochastic_matrix;
//!
//! let m = stochastic_matrix(&[0.9, 0.8], Some(123)).unwrap();
//! assert_eq!(m.dim(), (3, 3));
//! for row in m.rows() {
//!     assert!((row.sum() - 1.0).abs() < 1e-9);
//! }
//! ```
//!
//! For reuse of one generator across calls, or several independent samples,
//! see [`construct`] and [`stochastic_matrices`].

pub mod build;
pub mod config;
pub mod embiggen;
pub mod error;
pub mod result;
pub mod select;
pub mod spectrum;
pub mod split;
pub mod verify;

pub use build::build_matrix;
pub use config::{BuildConfig, DEFAULT_TOLERANCE, Selection};
pub use embiggen::embiggen_matrix;
pub use error::StochasticError;
pub use result::StochasticMatrix;
pub use select::{feasible_elements, select_element};
pub use spectrum::{Spectrum, get_valid_spectrum};
pub use split::{Split, ratio_bounds, split_element};
pub use verify::{
    NEGATIVITY_TOLERANCE, ROW_SUM_TOLERANCE, eigenvalues, spectral_rmsd, validate_stochastic,
};

use ndarray::Array2;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

/// Builds a seeded or OS-sourced RNG.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Constructs a row-stochastic matrix with the given non-trivial eigenvalues.
///
/// Uses the default [`BuildConfig`]. With `seed = Some(k)` the result is
/// bit-identical across calls; with `None` the generator is seeded from the
/// operating system.
///
/// # Errors
///
/// See [`construct`].
pub fn stochastic_matrix<T>(
    eigenvalues: &[T],
    seed: Option<u64>,
) -> Result<Array2<f64>, StochasticError>
where
    T: Copy + Into<Complex64>,
{
    let mut rng = make_rng(seed);
    construct(eigenvalues, &BuildConfig::new(), &mut rng).map(StochasticMatrix::into_matrix)
}

/// Validates, builds and verifies one stochastic matrix.
///
/// # Errors
///
/// - [`StochasticError::InvalidConfig`] if `config` is invalid.
/// - [`StochasticError::InvalidSpectrum`] or
///   [`StochasticError::UnsupportedSpectrum`] from validation.
/// - [`StochasticError::NoFeasibleElement`] or
///   [`StochasticError::InfeasibleSplit`] from the build.
/// - [`StochasticError::NotStochastic`] or
///   [`StochasticError::ConstructionFailed`] if verification fails. No matrix
///   is returned in that case.
pub fn construct<T>(
    eigenvalues: &[T],
    config: &BuildConfig,
    rng: &mut impl rand::Rng,
) -> Result<StochasticMatrix, StochasticError>
where
    T: Copy + Into<Complex64>,
{
    config.validate()?;
    let spectrum = get_valid_spectrum(eigenvalues)?;
    construct_validated(spectrum, config, rng)
}

/// Builds and verifies a matrix for an already validated spectrum.
#[tracing::instrument(skip_all, fields(dim = spectrum.dim(), selection = ?config.selection()))]
fn construct_validated(
    spectrum: Spectrum,
    config: &BuildConfig,
    rng: &mut impl rand::Rng,
) -> Result<StochasticMatrix, StochasticError> {
    let matrix = build_matrix(&spectrum, config.selection(), rng)?;

    validate_stochastic(&matrix, ROW_SUM_TOLERANCE, NEGATIVITY_TOLERANCE)?;

    let rmsd = spectral_rmsd(&matrix, &spectrum)?;
    if rmsd > config.tolerance() {
        warn!(rmsd, tolerance = config.tolerance(), "spectral verification failed");
        return Err(StochasticError::ConstructionFailed {
            rmsd,
            tolerance: config.tolerance(),
        });
    }
    debug!(rmsd, "matrix verified");

    Ok(StochasticMatrix::new(matrix, spectrum, rmsd))
}

/// An unbounded sequence of independently sampled stochastic matrices.
///
/// Created by [`stochastic_matrices`]. Every item runs a full build and
/// verification with the sampler's generator; use [`Iterator::take`] to bound
/// the sequence.
#[derive(Debug)]
pub struct MatrixSampler<R> {
    spectrum: Spectrum,
    config: BuildConfig,
    rng: R,
}

impl<R: rand::Rng> MatrixSampler<R> {
    /// Returns the validated spectrum shared by every sample.
    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }
}

impl<R: rand::Rng> Iterator for MatrixSampler<R> {
    type Item = Result<StochasticMatrix, StochasticError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(construct_validated(
            self.spectrum.clone(),
            &self.config,
            &mut self.rng,
        ))
    }
}

/// Creates a sampler yielding independent matrices for one spectrum.
///
/// The spectrum and configuration are validated once, here; sampling errors
/// are reported per item.
///
/// # Errors
///
/// Returns [`StochasticError::InvalidConfig`],
/// [`StochasticError::InvalidSpectrum`] or
/// [`StochasticError::UnsupportedSpectrum`].
///
/// # Example
///
/// ```
/// use invspec_stochastic::{BuildConfig, make_rng, stochastic_matrices};
///
/// let sampler = stochastic_matrices(&[0.5, 0.25], &BuildConfig::new(), make_rng(Some(7))).unwrap();
/// let matrices: Vec<_> = sampler.take(3).collect::<Result<_, _>>().unwrap();
/// assert_eq!(matrices.len(), 3);
/// ```
pub fn stochastic_matrices<T, R>(
    eigenvalues: &[T],
    config: &BuildConfig,
    rng: R,
) -> Result<MatrixSampler<R>, StochasticError>
where
    T: Copy + Into<Complex64>,
    R: rand::Rng,
{
    config.validate()?;
    let spectrum = get_valid_spectrum(eigenvalues)?;
    Ok(MatrixSampler {
        spectrum,
        config: config.clone(),
        rng,
    })
}
