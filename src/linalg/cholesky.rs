use crate::linalg::triangular::{LowerTriangular, UpperTriangular};
use crate::linalg::{require_square, LinalgError};
use crate::traits::{FloatScalar, MatrixMut};
use crate::{DynMatrix, DynVector};

/// Cholesky decomposition in place: `A = L · Lᵀ`.
///
/// On return, the lower triangle of `a` (including diagonal) contains L and
/// the strict upper triangle is zeroed. Fails with `NotPositiveDefinite` as
/// soon as a pivot is not strictly positive.
pub fn cholesky_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<(), LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "Cholesky decomposition requires a square matrix");

    for j in 0..n {
        // a[j.., j] -= L[j.., k] * L[j, k] for every finished column k
        for k in 0..j {
            let ljk = *a.get(j, k);
            for i in j..n {
                let v = *a.get(i, j) - *a.get(i, k) * ljk;
                *a.get_mut(i, j) = v;
            }
        }

        let diag = *a.get(j, j);
        if !(diag > T::zero()) {
            return Err(LinalgError::NotPositiveDefinite);
        }
        let ljj = diag.sqrt();
        *a.get_mut(j, j) = ljj;

        for i in (j + 1)..n {
            let v = *a.get(i, j) / ljj;
            *a.get_mut(i, j) = v;
            *a.get_mut(j, i) = T::zero();
        }
    }

    Ok(())
}

/// Cholesky decomposition of a symmetric positive-definite matrix.
///
/// Only the lower triangle of the input is read.
///
/// # Example
///
/// ```
/// use echelon::{DynMatrix, DynVector};
/// use echelon::linalg::Cholesky;
///
/// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let chol = Cholesky::new(&a).unwrap();
///
/// let l = chol.l().as_matrix();
/// assert!((l * &l.transpose()).approx_eq(&a, 1e-12));
/// assert!((chol.det() - 8.0).abs() < 1e-12);
///
/// let x = chol.solve(&DynVector::from_slice(&[8.0, 7.0])).unwrap();
/// assert!((x[0] - 1.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Cholesky<T> {
    l: LowerTriangular<T>,
}

impl<T: FloatScalar> Cholesky<T> {
    /// Decompose. Fails with `NotSquare` or `NotPositiveDefinite`.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        require_square(a)?;
        let mut l = a.clone();
        cholesky_in_place(&mut l)?;
        Ok(Self {
            l: LowerTriangular::new(l),
        })
    }

    /// Lower triangular factor L.
    #[inline]
    pub fn l(&self) -> &LowerTriangular<T> {
        &self.l
    }

    /// Upper triangular factor Lᵀ.
    pub fn lt(&self) -> UpperTriangular<T> {
        self.l.transpose()
    }

    /// Solve `A x = b` with one forward and one back substitution.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let y = self.l.solve(b)?;
        self.lt().solve(&y)
    }

    /// Determinant: `(Π L[i,i])²`.
    pub fn det(&self) -> T {
        let d = self.l.diag_product();
        d * d
    }

    /// Log-determinant: `2 · Σ ln L[i,i]`.
    pub fn ln_det(&self) -> T {
        let sum = self
            .l
            .as_matrix()
            .diag()
            .into_iter()
            .fold(T::zero(), |acc, x| acc + x.ln());
        sum + sum
    }
}

/// Convenience methods on square matrices.
impl<T: FloatScalar> DynMatrix<T> {
    /// Cholesky decomposition (`A = L · Lᵀ`).
    pub fn cholesky(&self) -> Result<Cholesky<T>, LinalgError> {
        Cholesky::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spd_3x3() -> DynMatrix<f64> {
        DynMatrix::from_rows(3, 3, &[4.0, 2.0, 1.0, 2.0, 10.0, 3.5, 1.0, 3.5, 4.5])
    }

    #[test]
    fn reconstructs_input() {
        let a = spd_3x3();
        let chol = a.cholesky().unwrap();
        let l = chol.l().as_matrix();
        let llt = l * chol.lt().as_matrix();
        assert!(llt.approx_eq(&a, 1e-12), "{}", llt);
        for i in 0..3 {
            for j in (i + 1)..3 {
                assert_eq!(l[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn solve_residual() {
        let a = spd_3x3();
        let b = DynVector::from_slice(&[1.0, 2.0, 3.0]);
        let x = a.cholesky().unwrap().solve(&b).unwrap();
        let r = a.mul_vec(&x);
        for i in 0..3 {
            assert!((r[i] - b[i]).abs() < 1e-10, "residual[{}] = {}", i, r[i] - b[i]);
        }
    }

    #[test]
    fn det_matches_lu() {
        let a = spd_3x3();
        let chol = a.cholesky().unwrap();
        assert!((chol.det() - a.det()).abs() < 1e-10);
        assert!((chol.ln_det() - chol.det().ln()).abs() < 1e-12);
    }

    #[test]
    fn indefinite_is_rejected() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 5.0, 5.0, 1.0]);
        assert_eq!(a.cholesky().unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    #[test]
    fn semidefinite_is_rejected() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(a.cholesky().unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    #[test]
    fn identity() {
        let id = DynMatrix::eye(3, 0.0_f64);
        let chol = id.cholesky().unwrap();
        assert_eq!(chol.l().as_matrix(), &id);
    }
}
