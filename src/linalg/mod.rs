pub(crate) mod cholesky;
pub(crate) mod gauss_jordan;
pub(crate) mod gaussian;
pub(crate) mod ldl;
pub(crate) mod lu;
pub(crate) mod permutation;
pub mod positive_definite;
pub(crate) mod row_ops;
pub(crate) mod symmetric_eigen;
pub mod tolerance;
pub(crate) mod triangular;

pub use cholesky::Cholesky;
pub use gauss_jordan::GaussJordanElimination;
pub use gaussian::GaussianElimination;
pub use ldl::Ldl;
pub use lu::LuDecomposition;
pub use permutation::PermutationMatrix;
pub use row_ops::RowOperations;
pub use symmetric_eigen::SymmetricEigen;
pub use tolerance::{Precision, ZeroTest};
pub use triangular::{LowerTriangular, UpperTriangular};

/// Errors from linear algebra operations.
///
/// Returned by fallible constructors (`LuDecomposition::new`,
/// `Cholesky::new`, the positive-definite repairs) and by `solve`/`inverse`.
/// Elimination itself never fails: a column without a usable pivot is
/// skipped, and rank deficiency shows up in `rank()` / `pivot_columns()`.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::{LinalgError, LuDecomposition};
///
/// let rect = DynMatrix::zeros(2, 3, 0.0_f64);
/// assert_eq!(
///     LuDecomposition::new(&rect).unwrap_err(),
///     LinalgError::NotSquare { nrows: 2, ncols: 3 },
/// );
///
/// let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// let lu = LuDecomposition::new(&singular).unwrap();
/// assert_eq!(lu.rank(), 1);
/// assert_eq!(lu.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    Singular,
    /// Matrix is not positive definite (required for Cholesky).
    NotPositiveDefinite,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
    /// A square matrix was required.
    NotSquare { nrows: usize, ncols: usize },
    /// A constructor parameter is out of its valid range.
    InvalidParameter(&'static str),
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotPositiveDefinite => write!(f, "matrix is not positive definite"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
            LinalgError::NotSquare { nrows, ncols } => {
                write!(f, "square matrix required, got {}x{}", nrows, ncols)
            }
            LinalgError::InvalidParameter(what) => write!(f, "invalid parameter: {}", what),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Fail with `NotSquare` unless `a` is square.
pub(crate) fn require_square<T>(
    a: &impl crate::traits::MatrixRef<T>,
) -> Result<usize, LinalgError> {
    if a.nrows() != a.ncols() {
        return Err(LinalgError::NotSquare {
            nrows: a.nrows(),
            ncols: a.ncols(),
        });
    }
    Ok(a.nrows())
}
