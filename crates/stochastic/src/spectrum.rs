//! Validation of requested spectra.
//!
//! A [`Spectrum`] holds the non-trivial eigenvalues of the matrix to build.
//! The eigenvalue 1 is always present in a row-stochastic matrix and is never
//! listed explicitly.

use num_complex::Complex64;

use crate::error::StochasticError;

/// A validated spectrum: real values in `[0, 1)`, sorted descending.
///
/// Only [`get_valid_spectrum`] creates a `Spectrum`, so every instance
/// satisfies these invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    values: Vec<f64>,
}

impl Spectrum {
    /// Returns the eigenvalues, sorted descending.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of non-trivial eigenvalues.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no non-trivial eigenvalue was requested.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the dimension of the matrix realising this spectrum.
    pub fn dim(&self) -> usize {
        self.values.len() + 1
    }

    /// Iterates the eigenvalues in descending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Consumes the spectrum, returning the sorted values.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Validates a requested spectrum and sorts it descending.
///
/// Accepts real or complex values. Checks, in order:
///
/// 1. every value is finite,
/// 2. no value is `>= 1` (the eigenvalue 1 is implicit),
/// 3. no value is negative,
/// 4. no value has a non-zero imaginary part.
///
/// Comparisons in steps 2 and 3 use the real part.
///
/// # Errors
///
/// Returns [`StochasticError::InvalidSpectrum`] for steps 1, 2 and 4 and
/// [`StochasticError::UnsupportedSpectrum`] for step 3.
///
/// # Example
///
/// ```
/// use invspec_stochastic::get_valid_spectrum;
///
/// let spectrum = get_valid_spectrum(&[0.2, 0.9, 0.5]).unwrap();
/// assert_eq!(spectrum.values(), &[0.9, 0.5, 0.2]);
/// ```
pub fn get_valid_spectrum<T>(eigenvalues: &[T]) -> Result<Spectrum, StochasticError>
where
    T: Copy + Into<Complex64>,
{
    let mut values: Vec<Complex64> = eigenvalues.iter().map(|&v| v.into()).collect();

    if let Some(v) = values.iter().find(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Err(StochasticError::InvalidSpectrum {
            reason: format!("eigenvalue {v} is not finite"),
        });
    }

    values.sort_by(|a, b| b.re.total_cmp(&a.re));

    if let Some(v) = values.first().filter(|v| v.re >= 1.0) {
        return Err(StochasticError::InvalidSpectrum {
            reason: format!(
                "eigenvalues must be strictly less than 1 (eigenvalue 1 is included by default), got {v}"
            ),
        });
    }
    if let Some(v) = values.iter().find(|v| v.re < 0.0) {
        return Err(StochasticError::UnsupportedSpectrum { eigenvalue: v.re });
    }
    if let Some(v) = values.iter().find(|v| v.im != 0.0) {
        return Err(StochasticError::InvalidSpectrum {
            reason: format!("eigenvalues must be real, got {v}"),
        });
    }

    Ok(Spectrum {
        values: values.into_iter().map(|v| v.re).collect(),
    })
}
