use crate::linalg::tolerance::{auto_epsilon, Precision, ZeroTest};
use crate::linalg::LinalgError;
use crate::traits::{LinalgScalar, MatrixRef, Scalar};
use crate::{DynMatrix, DynVector};

/// Lower triangular view over a dense matrix.
///
/// Triangularity is assumed, not checked: the wrapper exists to give the
/// factor a type, and the entries above the diagonal are whatever the
/// producer left there (zero, for every producer in this crate).
#[derive(Debug, Clone, PartialEq)]
pub struct LowerTriangular<T> {
    m: DynMatrix<T>,
}

/// Upper triangular (or row echelon) view over a dense matrix.
///
/// Like [`LowerTriangular`], the shape is trusted rather than verified.
#[derive(Debug, Clone, PartialEq)]
pub struct UpperTriangular<T> {
    m: DynMatrix<T>,
}

macro_rules! impl_triangular_common {
    ($name:ident, $other:ident) => {
        impl<T> $name<T> {
            #[inline]
            pub fn new(m: DynMatrix<T>) -> Self {
                Self { m }
            }

            #[inline]
            pub fn as_matrix(&self) -> &DynMatrix<T> {
                &self.m
            }

            #[inline]
            pub fn into_inner(self) -> DynMatrix<T> {
                self.m
            }
        }

        impl<T: Scalar> $name<T> {
            /// Swap the triangle: the transpose of a lower view is an upper view.
            pub fn transpose(&self) -> $other<T> {
                $other::new(self.m.transpose())
            }

            /// Product of the diagonal entries (the determinant when square).
            pub fn diag_product(&self) -> T {
                self.m.diag().into_iter().fold(T::one(), |acc, x| acc * x)
            }
        }

        impl<T> MatrixRef<T> for $name<T> {
            #[inline]
            fn nrows(&self) -> usize {
                self.m.nrows()
            }

            #[inline]
            fn ncols(&self) -> usize {
                self.m.ncols()
            }

            #[inline]
            fn get(&self, row: usize, col: usize) -> &T {
                self.m.get(row, col)
            }
        }

        impl<T> From<$name<T>> for DynMatrix<T> {
            fn from(v: $name<T>) -> Self {
                v.m
            }
        }
    };
}

impl_triangular_common!(LowerTriangular, UpperTriangular);
impl_triangular_common!(UpperTriangular, LowerTriangular);

fn check_system<T: LinalgScalar>(
    m: &DynMatrix<T>,
    b: &DynVector<T>,
) -> Result<Precision<T::Real>, LinalgError> {
    let n = crate::linalg::require_square(m)?;
    assert_eq!(b.len(), n, "rhs length mismatch");
    Ok(Precision::new(auto_epsilon(m)))
}

impl<T: LinalgScalar> LowerTriangular<T> {
    /// Solve `L x = b` by forward substitution.
    ///
    /// Returns `Err(Singular)` if a diagonal entry is zero within the
    /// matrix's automatic tolerance.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let zero = check_system(&self.m, b)?;
        let n = self.m.nrows();
        let mut x = DynVector::zeros(n, T::zero());
        for i in 0..n {
            let d = self.m[(i, i)];
            if zero.is_zero(d.modulus()) {
                return Err(LinalgError::Singular);
            }
            let mut sum = b[i];
            for j in 0..i {
                sum = sum - self.m[(i, j)] * x[j];
            }
            x[i] = sum / d;
        }
        Ok(x)
    }
}

impl<T: LinalgScalar> UpperTriangular<T> {
    /// Solve `U x = b` by back substitution.
    ///
    /// Returns `Err(Singular)` if a diagonal entry is zero within the
    /// matrix's automatic tolerance.
    pub fn solve(&self, b: &DynVector<T>) -> Result<DynVector<T>, LinalgError> {
        let zero = check_system(&self.m, b)?;
        let n = self.m.nrows();
        let mut x = DynVector::zeros(n, T::zero());
        for i in (0..n).rev() {
            let d = self.m[(i, i)];
            if zero.is_zero(d.modulus()) {
                return Err(LinalgError::Singular);
            }
            let mut sum = b[i];
            for j in (i + 1)..n {
                sum = sum - self.m[(i, j)] * x[j];
            }
            x[i] = sum / d;
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower() -> LowerTriangular<f64> {
        LowerTriangular::new(DynMatrix::from_rows(
            3,
            3,
            &[2.0, 0.0, 0.0, 1.0, 4.0, 0.0, -1.0, 3.0, 5.0],
        ))
    }

    #[test]
    fn forward_substitution() {
        let l = lower();
        let b = DynVector::from_slice(&[2.0, 9.0, 10.0]);
        let x = l.solve(&b).unwrap();
        let r = l.as_matrix().mul_vec(&x);
        for i in 0..3 {
            assert!((r[i] - b[i]).abs() < 1e-12, "residual[{}] = {}", i, r[i] - b[i]);
        }
    }

    #[test]
    fn back_substitution_via_transpose() {
        let u = lower().transpose();
        let b = DynVector::from_slice(&[1.0, -2.0, 5.0]);
        let x = u.solve(&b).unwrap();
        let r = u.as_matrix().mul_vec(&x);
        for i in 0..3 {
            assert!((r[i] - b[i]).abs() < 1e-12, "residual[{}] = {}", i, r[i] - b[i]);
        }
    }

    #[test]
    fn zero_diagonal_is_singular() {
        let u = UpperTriangular::new(DynMatrix::from_rows(2, 2, &[1.0, 2.0, 0.0, 0.0]));
        let b = DynVector::from_slice(&[1.0, 1.0]);
        assert_eq!(u.solve(&b).unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn non_square_solve_is_rejected() {
        let u = UpperTriangular::new(DynMatrix::from_rows(1, 2, &[1.0, 2.0]));
        let b = DynVector::from_slice(&[1.0]);
        assert_eq!(
            u.solve(&b).unwrap_err(),
            LinalgError::NotSquare { nrows: 1, ncols: 2 }
        );
    }

    #[test]
    fn diag_product() {
        assert_eq!(lower().diag_product(), 40.0);
    }
}
