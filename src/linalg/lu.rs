use crate::linalg::gaussian::GaussianElimination;
use crate::linalg::permutation::PermutationMatrix;
use crate::linalg::triangular::{LowerTriangular, UpperTriangular};
use crate::linalg::{require_square, LinalgError};
use crate::traits::LinalgScalar;
use crate::{DynMatrix, DynVector};

/// LU decomposition of a square matrix with partial pivoting: `P·A = L·U`.
///
/// A thin, square-only layer over [`GaussianElimination`] that hands the
/// factors back as typed views. A singular input still decomposes (U then
/// has a zero on its diagonal); `solve` and `inverse` report
/// `LinalgError::Singular` for it.
///
/// # Example
///
/// ```
/// use echelon::{DynMatrix, DynVector};
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu().unwrap();
///
/// let b = DynVector::from_slice(&[4.0, 11.0]);
/// let x = lu.solve(&b).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    l: LowerTriangular<T>,
    u: UpperTriangular<T>,
    p: PermutationMatrix,
    rank: usize,
}

impl<T: LinalgScalar> LuDecomposition<T> {
    /// Decompose a square matrix. Fails with `NotSquare` otherwise.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        require_square(a)?;
        Ok(Self::from_elimination(GaussianElimination::new(a)))
    }

    /// Decompose with an explicit pivot tolerance.
    pub fn with_epsilon(a: &DynMatrix<T>, epsilon: T::Real) -> Result<Self, LinalgError> {
        require_square(a)?;
        Ok(Self::from_elimination(GaussianElimination::with_epsilon(
            a, true, epsilon,
        )))
    }

    fn from_elimination(ge: GaussianElimination<T>) -> Self {
        let (l, u, p, rank) = ge.into_factors();
        Self {
            l: LowerTriangular::new(l),
            u: UpperTriangular::new(u),
            p,
            rank,
        }
    }

    #[inline]
    pub fn l(&self) -> &LowerTriangular<T> {
        &self.l
    }

    #[inline]
    pub fn u(&self) -> &UpperTriangular<T> {
        &self.u
    }

    #[inline]
    pub fn p(&self) -> &PermutationMatrix {
        &self.p
    }

    /// Number of pivots found during elimination.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether some column produced no pivot.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.rank < self.u.as_matrix().nrows()
    }

    /// Determinant: `sign(P) · Π U[i,i]`.
    pub fn det(&self) -> T {
        let d = self.u.diag_product();
        if self.p.sign() < 0 {
            T::zero() - d
        } else {
            d
        }
    }

    /// Solve `A x = b`.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        if self.is_singular() {
            return Err(LinalgError::Singular);
        }
        let n = self.p.len();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let pb = DynVector::from_vec(self.p.indices().iter().map(|&src| b[src]).collect());
        let y = self.l.solve(&pb)?;
        self.u.solve(&y)
    }

    /// Inverse, one column at a time.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        let n = self.p.len();
        let mut inv = DynMatrix::zeros(n, n, T::zero());
        let mut e = DynVector::zeros(n, T::zero());
        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            let x = self.solve(&e)?;
            for row in 0..n {
                inv[(row, col)] = x[row];
            }
        }
        Ok(inv)
    }
}

/// Convenience methods on square matrices.
impl<T: LinalgScalar> DynMatrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Determinant via LU. Panics if the matrix is not square.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
    /// assert!((m.det() - (-14.0)).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> T {
        assert!(self.is_square(), "determinant requires a square matrix");
        LuDecomposition::from_elimination(GaussianElimination::new(self)).det()
    }

    /// Solve `A x = b` via LU.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        self.lu()?.solve(b)
    }

    /// Inverse via LU.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        self.lu()?.inverse()
    }
}
