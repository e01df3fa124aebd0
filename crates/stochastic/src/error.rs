//! Error types for the invspec-stochastic crate.

/// Error type for all fallible operations in the invspec-stochastic crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StochasticError {
    /// Returned when a requested spectrum is malformed: a value `>= 1`,
    /// a value with a non-zero imaginary part, or a non-finite value.
    #[error("invalid spectrum: {reason}")]
    InvalidSpectrum {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a negative eigenvalue is requested.
    ///
    /// The splitting construction cannot place negative eigenvalues.
    #[error("unsupported spectrum: negative eigenvalue {eigenvalue} cannot be constructed")]
    UnsupportedSpectrum {
        /// The offending eigenvalue.
        eigenvalue: f64,
    },

    /// Returned when no diagonal entry of the current matrix is strictly
    /// greater than the eigenvalue to insert.
    #[error(
        "no feasible diagonal element for eigenvalue {eigenvalue} (largest diagonal entry is {max_diagonal})"
    )]
    NoFeasibleElement {
        /// The eigenvalue that could not be placed.
        eigenvalue: f64,
        /// The largest diagonal entry of the current matrix.
        max_diagonal: f64,
    },

    /// Returned when a matrix element is too small to host an eigenvalue.
    #[error("infeasible split: matrix element {matrix_element} cannot host eigenvalue {eigenvalue}")]
    InfeasibleSplit {
        /// The eigenvalue being inserted.
        eigenvalue: f64,
        /// The diagonal element chosen for splitting.
        matrix_element: f64,
    },

    /// Returned when the constructed matrix's spectrum deviates from the
    /// request by more than the configured tolerance.
    #[error("construction failed: spectral RMSD {rmsd:e} exceeds tolerance {tolerance:e}")]
    ConstructionFailed {
        /// Measured root-mean-square deviation.
        rmsd: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    /// Returned when a matrix is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when an element index is outside the matrix.
    #[error("element index {index} out of bounds for dimension {dim}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Matrix dimension.
        dim: usize,
    },

    /// Returned when a matrix dimension does not match the spectrum length.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },

    /// Returned when a matrix violates non-negativity or unit row sums.
    #[error("matrix is not row-stochastic: {reason}")]
    NotStochastic {
        /// Description of the violation.
        reason: String,
    },

    /// Returned when a build configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
