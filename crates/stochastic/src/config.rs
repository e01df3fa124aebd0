//! Configuration for stochastic matrix construction.

use crate::error::StochasticError;

/// Default RMSD tolerance between requested and measured eigenvalues.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Policy for choosing which diagonal entry hosts the next eigenvalue.
///
/// Only diagonal entries strictly greater than the eigenvalue are candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Uniformly random among all candidates.
    #[default]
    Uniform,
    /// The largest candidate; lowest index on ties. Draws no randomness.
    LargestDiagonal,
    /// The lowest-index candidate. Draws no randomness.
    FirstFeasible,
}

/// Configuration for building a stochastic matrix.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use invspec_stochastic::{BuildConfig, Selection};
///
/// let config = BuildConfig::new()
///     .with_selection(Selection::LargestDiagonal)
///     .with_tolerance(1e-9);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BuildConfig {
    selection: Selection,
    tolerance: f64,
}

impl BuildConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `selection = Uniform`, `tolerance = 1e-10`.
    pub fn new() -> Self {
        Self {
            selection: Selection::Uniform,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the element selection policy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the spectral RMSD tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the element selection policy.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the spectral RMSD tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validates this configuration.
    ///
    /// The tolerance must be finite and positive.
    pub fn validate(&self) -> Result<(), StochasticError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(StochasticError::InvalidConfig {
                reason: format!(
                    "tolerance must be finite and positive, got {}",
                    self.tolerance
                ),
            });
        }
        Ok(())
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}
