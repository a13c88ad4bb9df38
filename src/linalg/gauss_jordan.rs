use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::gaussian::select_pivot_row;
use crate::linalg::row_ops::RowOperations;
use crate::linalg::tolerance::{auto_epsilon, Precision, ZeroTest};
use crate::linalg::LinalgError;
use crate::traits::LinalgScalar;
use crate::DynMatrix;

/// Gauss-Jordan elimination to reduced row echelon form.
///
/// Each pivot row is scaled so the pivot becomes one, then the pivot is
/// eliminated from every other row, above and below. After construction
/// `t() · A == u()` with `u()` in RREF, and every leading entry of `u()` is
/// exactly `1`: a final pass overwrites the leading cells so that
/// round-off from repeated scaling cannot leave `0.999...` behind.
///
/// No `L` or `P` is produced; use [`GaussianElimination`] for those.
///
/// [`GaussianElimination`]: crate::linalg::GaussianElimination
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::GaussJordanElimination;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 1.0]);
/// let gj = GaussJordanElimination::new(&a);
/// assert_eq!(gj.u(), &DynMatrix::eye(2, 0.0));
///
/// // T is the inverse of A.
/// let id = gj.t() * &a;
/// assert!(id.approx_eq(&DynMatrix::eye(2, 0.0), 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct GaussJordanElimination<T> {
    t: DynMatrix<T>,
    u: DynMatrix<T>,
    leading_ones: Vec<Option<usize>>,
    pivots: Vec<usize>,
}

impl<T: LinalgScalar> GaussJordanElimination<T> {
    /// Reduce with partial pivoting and the matrix's automatic tolerance.
    pub fn new(a: &DynMatrix<T>) -> Self {
        Self::with_epsilon(a, true, auto_epsilon(a))
    }

    /// Reduce treating any pivot with modulus `<= epsilon` as zero.
    pub fn with_epsilon(a: &DynMatrix<T>, use_pivoting: bool, epsilon: T::Real) -> Self {
        Self::with_zero_test(a, use_pivoting, &Precision::new(epsilon))
    }

    /// Reduce with a caller-supplied zero test for pivot candidates.
    pub fn with_zero_test(
        a: &DynMatrix<T>,
        use_pivoting: bool,
        zero: &impl ZeroTest<T::Real>,
    ) -> Self {
        let (m, n) = (a.nrows(), a.ncols());
        let mut ops = RowOperations::new(a);
        let mut leading_ones = vec![None; m];
        let mut pivots = Vec::with_capacity(m.min(n));

        let mut i = 0;
        for j in 0..n {
            if i >= m {
                break;
            }

            let pivot_row = if use_pivoting {
                select_pivot_row(ops.u(), i, j)
            } else {
                i
            };
            if zero.is_zero(ops.get(pivot_row, j).modulus()) {
                continue;
            }
            if pivot_row != i {
                ops.swap_rows(i, pivot_row);
            }

            let pivot = ops.get(i, j);
            ops.scale_row(i, T::one() / pivot);
            leading_ones[i] = Some(j);

            for k in 0..m {
                if k == i {
                    continue;
                }
                let factor = ops.get(k, j);
                if factor != T::zero() {
                    ops.add_row(k, i, T::zero() - factor);
                }
            }

            pivots.push(j);
            i += 1;
        }

        for (row, lead) in leading_ones.iter().enumerate() {
            if let Some(col) = *lead {
                ops.set(row, col, T::one());
            }
        }

        let (t, u) = ops.into_parts();
        Self {
            t,
            u,
            leading_ones,
            pivots,
        }
    }

    /// Accumulated transform with `T · A == U`.
    #[inline]
    pub fn t(&self) -> &DynMatrix<T> {
        &self.t
    }

    /// Reduced row echelon form of `A`.
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// For each row, the column of its leading one, or `None` for a zero row.
    #[inline]
    pub fn leading_ones(&self) -> &[Option<usize>] {
        &self.leading_ones
    }

    /// Column of each pivot, in pivot-row order.
    #[inline]
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of leading ones.
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Whether the rank equals `min(nrows, ncols)`.
    pub fn is_full_rank(&self) -> bool {
        self.rank() == self.u.nrows().min(self.u.ncols())
    }

    /// Inverse of `A`, available when `A` is square and full rank.
    ///
    /// The reduction of an invertible matrix ends at `U = I`, so the
    /// accumulated transform is the inverse.
    pub fn inverse(&self) -> Result<DynMatrix<T>, LinalgError> {
        let n = crate::linalg::require_square(&self.u)?;
        if self.rank() < n {
            return Err(LinalgError::Singular);
        }
        Ok(self.t.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn check_transform(a: &DynMatrix<f64>, gj: &GaussJordanElimination<f64>) {
        let ta = gj.t() * a;
        assert!(ta.approx_eq(gj.u(), TOL), "T*A != U:\n{}\nvs\n{}", ta, gj.u());
    }

    #[test]
    fn invertible_2x2_reduces_to_identity() {
        let a = DynMatrix::from_rows(2, 2, &[2.0, 4.0, 1.0, 1.0]);
        let gj = GaussJordanElimination::new(&a);
        assert_eq!(gj.u(), &DynMatrix::eye(2, 0.0));
        let expected_inv = DynMatrix::from_rows(2, 2, &[-0.5, 2.0, 0.5, -1.0]);
        assert!(gj.t().approx_eq(&expected_inv, TOL));
        assert!(gj.inverse().unwrap().approx_eq(&expected_inv, TOL));
        check_transform(&a, &gj);
    }

    #[test]
    fn leading_ones_are_exact() {
        // Thirds and sevenths do not survive scaling exactly in binary.
        let a: DynMatrix<f64> = DynMatrix::from_rows(
            3,
            4,
            &[3.0, 1.0, 7.0, 2.0, 6.0, 9.0, 1.0, 3.0, 0.3, 7.0, 11.0, 5.0],
        );
        let gj = GaussJordanElimination::new(&a);
        assert_eq!(gj.rank(), 3);
        for (row, lead) in gj.leading_ones().iter().enumerate() {
            let col = lead.expect("full row rank");
            assert_eq!(gj.u()[(row, col)].to_bits(), 1.0_f64.to_bits());
        }
        check_transform(&a, &gj);
    }

    #[test]
    fn pivot_columns_are_cleared() {
        let a: DynMatrix<f64> = DynMatrix::from_rows(3, 3, &[1.0, 2.0, -1.0, 2.0, 1.0, 1.0, -1.0, 3.0, 2.0]);
        let gj = GaussJordanElimination::new(&a);
        for &col in gj.pivot_columns() {
            for row in 0..3 {
                if gj.leading_ones()[row] != Some(col) {
                    assert!(gj.u()[(row, col)].abs() < TOL);
                }
            }
        }
        check_transform(&a, &gj);
    }

    #[test]
    fn rank_deficient_records_zero_rows() {
        let a = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0]);
        let gj = GaussJordanElimination::new(&a);
        assert_eq!(gj.leading_ones(), &[Some(0), Some(1), None]);
        assert!(!gj.is_full_rank());
        assert_eq!(gj.inverse().unwrap_err(), LinalgError::Singular);

        let expected = DynMatrix::from_rows(3, 3, &[1.0, 0.0, -1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
        assert!(gj.u().approx_eq(&expected, TOL), "{}", gj.u());
        check_transform(&a, &gj);
    }

    #[test]
    fn wide_system_gives_solution_column() {
        // Augmented [A | b] for x + y = 3, x - y = 1.
        let a: DynMatrix<f64> = DynMatrix::from_rows(2, 3, &[1.0, 1.0, 3.0, 1.0, -1.0, 1.0]);
        let gj = GaussJordanElimination::new(&a);
        assert!(gj.is_full_rank());
        assert!((gj.u()[(0, 2)] - 2.0).abs() < TOL);
        assert!((gj.u()[(1, 2)] - 1.0).abs() < TOL);
        assert_eq!(
            gj.inverse().unwrap_err(),
            LinalgError::NotSquare { nrows: 2, ncols: 3 }
        );
    }

    #[test]
    fn without_pivoting() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let gj = GaussJordanElimination::with_epsilon(&a, false, 1e-12);
        assert!(gj.u().approx_eq(&DynMatrix::eye(2, 0.0), TOL));
        check_transform(&a, &gj);
    }

    #[test]
    fn zero_matrix() {
        let a = DynMatrix::zeros(2, 3, 0.0_f64);
        let gj = GaussJordanElimination::new(&a);
        assert_eq!(gj.rank(), 0);
        assert_eq!(gj.leading_ones(), &[None, None]);
        assert_eq!(gj.t(), &DynMatrix::eye(2, 0.0));
    }
}
