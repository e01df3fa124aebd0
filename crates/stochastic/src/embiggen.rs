//! Growing a stochastic matrix by one dimension.
//!
//! Splitting state `i` of an `n`x`n` matrix `A` gives an `(n+1)`x`(n+1)`
//! matrix laid out as
//!
//! ```text
//!          ..i      i          i+1            i+2..
//! ..i   | A11    r*c1       (1-r)*c1       A12  |
//! i     | r1     S[0][0]    S[0][1]        r2   |
//! i+1   | r1     S[1][0]    S[1][1]        r2   |
//! i+2.. | A21    r*c2       (1-r)*c2       A22  |
//! ```
//!
//! where `c1`, `c2` are the column above and below `A[i,i]`, `r1`, `r2` the
//! row left and right of it, and `S` is the block from
//! [`split_element`](crate::split_element). Lumping states `i` and `i+1` back
//! together recovers `A`, so every eigenvalue of `A` survives, and the trace
//! grows by exactly the inserted eigenvalue.

use ndarray::{Array2, s};

use crate::error::StochasticError;
use crate::split::split_element;

/// Embeds `eigenvalue` into `matrix` by splitting diagonal element
/// `element_index`.
///
/// Returns a new matrix one dimension larger; the input is not modified.
/// Row-stochasticity is preserved and the spectrum of the result is the
/// spectrum of `matrix` plus `eigenvalue`.
///
/// # Errors
///
/// - [`StochasticError::NotSquare`] if `matrix` is not square.
/// - [`StochasticError::IndexOutOfBounds`] if `element_index` is not a
///   diagonal position.
/// - Any error of [`split_element`], notably
///   [`StochasticError::InfeasibleSplit`] when `matrix[i, i] < |eigenvalue|`.
///
/// # Example
///
/// ```
/// use invspec_stochastic::embiggen_matrix;
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let matrix = array![[0.9, 0.1], [0.1, 0.9]];
/// let mut rng = StdRng::seed_from_u64(1);
/// let grown = embiggen_matrix(0.7, &matrix, 0, &mut rng).unwrap();
/// assert_eq!(grown.dim(), (3, 3));
/// ```
pub fn embiggen_matrix(
    eigenvalue: f64,
    matrix: &Array2<f64>,
    element_index: usize,
    rng: &mut impl rand::Rng,
) -> Result<Array2<f64>, StochasticError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(StochasticError::NotSquare { rows, cols });
    }
    let n = rows;
    let i = element_index;
    if i >= n {
        return Err(StochasticError::IndexOutOfBounds { index: i, dim: n });
    }

    let split = split_element(eigenvalue, matrix[[i, i]], rng)?;
    let r = split.ratio();

    let mut grown = Array2::<f64>::zeros((n + 1, n + 1));

    // Blocks untouched by the split.
    grown
        .slice_mut(s![..i, ..i])
        .assign(&matrix.slice(s![..i, ..i]));
    grown
        .slice_mut(s![..i, (i + 2)..])
        .assign(&matrix.slice(s![..i, (i + 1)..]));
    grown
        .slice_mut(s![(i + 2).., ..i])
        .assign(&matrix.slice(s![(i + 1).., ..i]));
    grown
        .slice_mut(s![(i + 2).., (i + 2)..])
        .assign(&matrix.slice(s![(i + 1).., (i + 1)..]));

    // Column i is divided r : 1 - r between the two new columns.
    let above = matrix.slice(s![..i, i]);
    let below = matrix.slice(s![(i + 1).., i]);
    grown.slice_mut(s![..i, i]).assign(&(&above * r));
    grown.slice_mut(s![..i, i + 1]).assign(&(&above * (1.0 - r)));
    grown.slice_mut(s![(i + 2).., i]).assign(&(&below * r));
    grown
        .slice_mut(s![(i + 2).., i + 1])
        .assign(&(&below * (1.0 - r)));

    // Row i is duplicated outside the diagonal block.
    for new_row in [i, i + 1] {
        grown
            .slice_mut(s![new_row, ..i])
            .assign(&matrix.slice(s![i, ..i]));
        grown
            .slice_mut(s![new_row, (i + 2)..])
            .assign(&matrix.slice(s![i, (i + 1)..]));
    }

    let block = split.block();
    for (a, row) in block.iter().enumerate() {
        for (b, &value) in row.iter().enumerate() {
            grown[[i + a, i + b]] = value;
        }
    }

    Ok(grown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_row_stochastic(m: &Array2<f64>) {
        for (i, row) in m.rows().into_iter().enumerate() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
            assert!(row.iter().all(|&x| x >= 0.0), "row {i} has negative entry");
        }
    }

    #[test]
    fn from_trivial_matrix() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = embiggen_matrix(0.4, &array![[1.0]], 0, &mut rng).unwrap();
        assert_eq!(m.dim(), (2, 2));
        assert_row_stochastic(&m);
        // For 2x2 stochastic matrices the second eigenvalue is trace - 1.
        assert_abs_diff_eq!(m[[0, 0]] + m[[1, 1]] - 1.0, 0.4, epsilon = 1e-14);
    }

    #[test]
    fn trace_grows_by_eigenvalue() {
        let base = array![[0.9, 0.1], [0.1, 0.9]];
        let mut rng = StdRng::seed_from_u64(2);
        for index in 0..2 {
            let m = embiggen_matrix(0.7, &base, index, &mut rng).unwrap();
            assert_abs_diff_eq!(m.diag().sum(), base.diag().sum() + 0.7, epsilon = 1e-14);
            assert_row_stochastic(&m);
        }
    }

    #[test]
    fn lumping_recovers_input() {
        let base = array![[0.5, 0.3, 0.2], [0.1, 0.8, 0.1], [0.25, 0.25, 0.5]];
        let mut rng = StdRng::seed_from_u64(3);
        let i = 1;
        let m = embiggen_matrix(0.35, &base, i, &mut rng).unwrap();
        assert_eq!(m.dim(), (4, 4));

        // Merge columns i and i+1, then both split rows must equal row i of base.
        let mut lumped = Array2::<f64>::zeros((4, 3));
        for r in 0..4 {
            lumped[[r, 0]] = m[[r, 0]];
            lumped[[r, 1]] = m[[r, 1]] + m[[r, 2]];
            lumped[[r, 2]] = m[[r, 3]];
        }
        for c in 0..3 {
            assert_abs_diff_eq!(lumped[[0, c]], base[[0, c]], epsilon = 1e-14);
            assert_abs_diff_eq!(lumped[[1, c]], base[[1, c]], epsilon = 1e-14);
            assert_abs_diff_eq!(lumped[[2, c]], base[[1, c]], epsilon = 1e-14);
            assert_abs_diff_eq!(lumped[[3, c]], base[[2, c]], epsilon = 1e-14);
        }
    }

    #[test]
    fn last_index() {
        let base = array![[0.6, 0.4], [0.3, 0.7]];
        let mut rng = StdRng::seed_from_u64(4);
        let m = embiggen_matrix(0.2, &base, 1, &mut rng).unwrap();
        assert_eq!(m.dim(), (3, 3));
        assert_abs_diff_eq!(m[[0, 0]], 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(m[[0, 1]] + m[[0, 2]], 0.4, epsilon = 1e-15);
        assert_row_stochastic(&m);
    }

    #[test]
    fn input_untouched() {
        let base = array![[0.9, 0.1], [0.1, 0.9]];
        let copy = base.clone();
        let mut rng = StdRng::seed_from_u64(5);
        let _ = embiggen_matrix(0.5, &base, 0, &mut rng).unwrap();
        assert_eq!(base, copy);
    }

    #[test]
    fn index_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = embiggen_matrix(0.5, &array![[1.0]], 1, &mut rng);
        assert!(matches!(
            result,
            Err(StochasticError::IndexOutOfBounds { index: 1, dim: 1 })
        ));
    }

    #[test]
    fn not_square() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = embiggen_matrix(0.5, &Array2::zeros((1, 2)), 0, &mut rng);
        assert!(matches!(
            result,
            Err(StochasticError::NotSquare { rows: 1, cols: 2 })
        ));
    }

    #[test]
    fn infeasible_element() {
        let base = array![[0.2, 0.8], [0.1, 0.9]];
        let mut rng = StdRng::seed_from_u64(0);
        let result = embiggen_matrix(0.5, &base, 0, &mut rng);
        assert!(matches!(
            result,
            Err(StochasticError::InfeasibleSplit { .. })
        ));
    }
}
