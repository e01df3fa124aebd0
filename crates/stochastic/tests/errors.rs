//! Integration tests for StochasticError variants.

use invspec_stochastic::{
    BuildConfig, DEFAULT_TOLERANCE, Selection, StochasticError, construct, embiggen_matrix,
    get_valid_spectrum, make_rng, select_element, split_element, stochastic_matrix,
};
use ndarray::array;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

#[test]
fn error_eigenvalue_one() {
    let result = get_valid_spectrum(&[1.0]);
    assert!(matches!(result, Err(StochasticError::InvalidSpectrum { .. })));
}

#[test]
fn error_negative_eigenvalue() {
    let result = get_valid_spectrum(&[-0.1]);
    assert!(matches!(
        result,
        Err(StochasticError::UnsupportedSpectrum { .. })
    ));
}

#[test]
fn error_complex_eigenvalue() {
    let result = get_valid_spectrum(&[Complex64::new(0.5, 0.1)]);
    assert!(matches!(result, Err(StochasticError::InvalidSpectrum { .. })));
}

#[test]
fn error_propagates_from_entry_point() {
    assert!(matches!(
        stochastic_matrix(&[0.5, 1.0], Some(1)),
        Err(StochasticError::InvalidSpectrum { .. })
    ));
    assert!(matches!(
        stochastic_matrix(&[0.5, -0.5], Some(1)),
        Err(StochasticError::UnsupportedSpectrum { .. })
    ));
}

#[test]
fn error_infeasible_split() {
    let result = split_element(0.9, 0.1, &mut rng());
    assert!(matches!(
        result,
        Err(StochasticError::InfeasibleSplit {
            eigenvalue: 0.9,
            matrix_element: 0.1
        })
    ));
}

#[test]
fn error_embiggen_on_small_element() {
    let matrix = array![[0.1, 0.9], [0.5, 0.5]];
    let result = embiggen_matrix(0.3, &matrix, 0, &mut rng());
    assert!(matches!(
        result,
        Err(StochasticError::InfeasibleSplit { .. })
    ));
}

#[test]
fn error_no_feasible_element() {
    let matrix = array![[0.1, 0.9], [0.5, 0.5]];
    let result = select_element(0.5, &matrix, Selection::Uniform, &mut rng());
    assert!(matches!(
        result,
        Err(StochasticError::NoFeasibleElement { .. })
    ));
}

#[test]
fn error_construction_failed_on_impossible_tolerance() {
    // Six eigenvalues with no short binary expansion: rounding in the
    // eigen solve leaves a nonzero deviation, far above the smallest
    // positive tolerance.
    let config = BuildConfig::new().with_tolerance(f64::MIN_POSITIVE);
    let spectrum = [0.91, 0.73, 0.58, 0.37, 0.22, 0.13];
    let result = construct(&spectrum, &config, &mut make_rng(Some(6)));
    match result {
        Err(StochasticError::ConstructionFailed { rmsd, tolerance }) => {
            assert_eq!(tolerance, f64::MIN_POSITIVE);
            assert!(rmsd > tolerance);
            assert!(rmsd < DEFAULT_TOLERANCE);
        }
        other => panic!("expected ConstructionFailed, got {other:?}"),
    }
}

#[test]
fn error_invalid_config() {
    let config = BuildConfig::new().with_tolerance(f64::NAN);
    let result = construct(&[0.5], &config, &mut rng());
    assert!(matches!(result, Err(StochasticError::InvalidConfig { .. })));
}
