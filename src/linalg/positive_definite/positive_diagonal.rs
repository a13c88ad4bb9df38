use alloc::vec::Vec;

use crate::linalg::positive_definite::PositiveDefiniteRepair;
use crate::linalg::tolerance::auto_epsilon;
use crate::linalg::{require_square, LinalgError, SymmetricEigen};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Eigenvalue flooring: `A = Q·Λ·Qᵀ`, every `λ` below `small` is raised to
/// `small`, and `A⁺ = Q·Λ⁺·Qᵀ` is rebuilt.
///
/// `λ` counts as below the floor only when `small - λ > epsilon`. When no
/// eigenvalue is raised, [`matrix`](Self::matrix) is a clone of the input,
/// bit for bit, rather than a reconstruction carrying round-off.
///
/// The input must be symmetric: entries mirrored across the diagonal may
/// differ by at most `epsilon`, otherwise `InvalidParameter` is returned.
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::positive_definite::PositiveDefiniteByPositiveDiagonal;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
/// let pd = PositiveDefiniteByPositiveDiagonal::with_params(&a, 1e-12, 0.5).unwrap();
/// assert!(pd.is_modified());
/// assert!((pd.eigenvalues()[0] - 0.5).abs() < 1e-12);
/// assert!(pd.matrix().cholesky().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PositiveDefiniteByPositiveDiagonal<T> {
    matrix: DynMatrix<T>,
    eigenvalues: Vec<T>,
    modified: bool,
    epsilon: T,
    small: T,
}

impl<T: FloatScalar> PositiveDefiniteByPositiveDiagonal<T> {
    /// Repair with the matrix's automatic tolerance and `small = √machine_eps`.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_params(a, auto_epsilon(a), T::epsilon().sqrt())
    }

    /// Repair with an explicit tolerance and floor.
    ///
    /// Fails with `NotSquare`, with `InvalidParameter` for a negative or NaN
    /// `epsilon`, a non-positive `small` or an input that is not symmetric
    /// within `epsilon`, and with `ConvergenceFailure` if the
    /// eigendecomposition does not converge.
    pub fn with_params(a: &DynMatrix<T>, epsilon: T, small: T) -> Result<Self, LinalgError> {
        require_square(a)?;
        if !(epsilon >= T::zero()) {
            return Err(LinalgError::InvalidParameter("epsilon must be non-negative"));
        }
        if !(small > T::zero()) {
            return Err(LinalgError::InvalidParameter("small must be positive"));
        }
        let n = a.nrows();
        for j in 0..n {
            for i in (j + 1)..n {
                if !((a[(i, j)] - a[(j, i)]).abs() <= epsilon) {
                    return Err(LinalgError::InvalidParameter("matrix must be symmetric"));
                }
            }
        }

        let eig = SymmetricEigen::new(a)?;
        let mut modified = false;
        let eigenvalues: Vec<T> = eig
            .eigenvalues()
            .iter()
            .map(|&lambda| {
                if small - lambda > epsilon {
                    modified = true;
                    small
                } else {
                    lambda
                }
            })
            .collect();

        let matrix = if modified {
            eig.reconstruct_with(&eigenvalues)
        } else {
            a.clone()
        };

        Ok(Self {
            matrix,
            eigenvalues,
            modified,
            epsilon,
            small,
        })
    }

    /// The repaired matrix `A⁺`.
    #[inline]
    pub fn matrix(&self) -> &DynMatrix<T> {
        &self.matrix
    }

    /// Whether any eigenvalue was raised to the floor.
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Eigenvalues after flooring, ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    #[inline]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    #[inline]
    pub fn small(&self) -> T {
        self.small
    }
}

impl<T: FloatScalar> PositiveDefiniteRepair<T> for PositiveDefiniteByPositiveDiagonal<T> {
    fn repaired(&self) -> &DynMatrix<T> {
        &self.matrix
    }
}
