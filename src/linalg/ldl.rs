use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::tolerance::auto_epsilon;
use crate::linalg::triangular::{LowerTriangular, UpperTriangular};
use crate::linalg::{require_square, LinalgError};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// LDLᵀ decomposition of a symmetric matrix without pivoting.
///
/// `A = L · D · Lᵀ` with `L` unit lower triangular and `D` diagonal. Unlike
/// Cholesky the input may be indefinite. When a pivot `d_j` is zero within
/// the tolerance, the sub-column `L[j+1.., j]` is set to zero instead of
/// dividing by it, so the factorization always completes; `reconstruct()`
/// then differs from `A` in the rows below that pivot.
///
/// Only the lower triangle of the input is read.
#[derive(Debug, Clone)]
pub struct Ldl<T> {
    l: LowerTriangular<T>,
    d: Vec<T>,
}

impl<T: FloatScalar> Ldl<T> {
    /// Decompose with the matrix's automatic pivot tolerance.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_epsilon(a, auto_epsilon(a))
    }

    /// Decompose treating any pivot with `|d_j| <= epsilon` as zero.
    ///
    /// Fails with `InvalidParameter` for a negative or NaN `epsilon`.
    pub fn with_epsilon(a: &DynMatrix<T>, epsilon: T) -> Result<Self, LinalgError> {
        let n = require_square(a)?;
        if !(epsilon >= T::zero()) {
            return Err(LinalgError::InvalidParameter("epsilon must be non-negative"));
        }
        let mut l = DynMatrix::eye(n, T::zero());
        let mut d = vec![T::zero(); n];

        for j in 0..n {
            let mut dj = a[(j, j)];
            for k in 0..j {
                dj = dj - l[(j, k)] * l[(j, k)] * d[k];
            }
            d[j] = dj;

            if dj.abs() <= epsilon {
                continue;
            }
            for i in (j + 1)..n {
                let mut s = a[(i, j)];
                for k in 0..j {
                    s = s - l[(i, k)] * l[(j, k)] * d[k];
                }
                l[(i, j)] = s / dj;
            }
        }

        Ok(Self {
            l: LowerTriangular::new(l),
            d,
        })
    }

    #[inline]
    pub fn l(&self) -> &LowerTriangular<T> {
        &self.l
    }

    #[inline]
    pub fn lt(&self) -> UpperTriangular<T> {
        self.l.transpose()
    }

    /// Diagonal of `D`.
    #[inline]
    pub fn d(&self) -> &[T] {
        &self.d
    }

    pub fn d_matrix(&self) -> DynMatrix<T> {
        DynMatrix::from_diag(&self.d)
    }

    /// `L · D · Lᵀ`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        self.reconstruct_with(&self.d)
    }

    /// `L · diag(d) · Lᵀ` for a replacement diagonal.
    pub fn reconstruct_with(&self, d: &[T]) -> DynMatrix<T> {
        let n = self.d.len();
        assert_eq!(d.len(), n, "diagonal length mismatch");
        let l = self.l.as_matrix();
        let mut out = DynMatrix::zeros(n, n, T::zero());
        // lower triangle only, mirrored; the sum stops at column j of L
        for j in 0..n {
            for i in j..n {
                let v = (0..=j).fold(T::zero(), |acc, k| acc + l[(i, k)] * d[k] * l[(j, k)]);
                out[(i, j)] = v;
                out[(j, i)] = v;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_definite_matches_cholesky_shape() {
        let a = DynMatrix::from_rows(3, 3, &[4.0, 2.0, 1.0, 2.0, 10.0, 3.5, 1.0, 3.5, 4.5]);
        let ldl = Ldl::new(&a).unwrap();
        assert!(ldl.d().iter().all(|&x| x > 0.0));
        assert!(ldl.reconstruct().approx_eq(&a, 1e-12));
        for i in 0..3 {
            assert_eq!(ldl.l().as_matrix()[(i, i)], 1.0);
        }
        assert_eq!(ldl.d()[0], 4.0);
    }

    #[test]
    fn indefinite_input() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let ldl = Ldl::new(&a).unwrap();
        assert_eq!(ldl.d(), &[1.0, -3.0]);
        assert_eq!(ldl.l().as_matrix()[(1, 0)], 2.0);
        assert!(ldl.reconstruct().approx_eq(&a, 1e-12));
        assert_eq!(ldl.d_matrix(), DynMatrix::from_diag(&[1.0, -3.0]));
    }

    #[test]
    fn zero_pivot_zeroes_sub_column() {
        let a = DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 2.0]);
        let ldl = Ldl::new(&a).unwrap();
        assert_eq!(ldl.d(), &[0.0, 2.0]);
        assert_eq!(ldl.l().as_matrix()[(1, 0)], 0.0);
    }

    #[test]
    fn negative_epsilon_is_rejected() {
        let a = DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(
            Ldl::with_epsilon(&a, -1.0).unwrap_err(),
            LinalgError::InvalidParameter("epsilon must be non-negative")
        );
        assert!(Ldl::with_epsilon(&a, f64::NAN).is_err());
        // zero is a valid tolerance
        let ldl = Ldl::with_epsilon(&a, 0.0).unwrap();
        assert_eq!(ldl.l().as_matrix()[(1, 0)], 0.0);
    }

    #[test]
    fn non_square_is_rejected() {
        let a = DynMatrix::zeros(3, 1, 0.0_f64);
        assert_eq!(
            Ldl::new(&a).unwrap_err(),
            LinalgError::NotSquare { nrows: 3, ncols: 1 }
        );
    }
}
