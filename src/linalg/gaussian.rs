use alloc::vec::Vec;

use crate::linalg::permutation::PermutationMatrix;
use crate::linalg::row_ops::RowOperations;
use crate::linalg::tolerance::{auto_epsilon, Precision, ZeroTest};
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};
use crate::DynMatrix;

/// Row index in `i..nrows` holding the largest modulus in column `j`.
///
/// Comparisons are strict, so on ties the first (topmost) row wins.
pub(crate) fn select_pivot_row<T: LinalgScalar>(
    u: &impl MatrixRef<T>,
    i: usize,
    j: usize,
) -> usize {
    let mut max_row = i;
    let mut max_val = u.get(i, j).modulus();
    for row in (i + 1)..u.nrows() {
        let val = u.get(row, j).modulus();
        if val > max_val {
            max_val = val;
            max_row = row;
        }
    }
    max_row
}

/// Working state of a forward elimination: `U`/`T` under row operations,
/// the multiplier matrix `L`, and the permutation `P`.
///
/// All four are updated by one [`step`](Self::step) per pivot, which keeps
/// `T·A = U` and `P·A = L·U` true between steps.
struct ForwardElimination<T> {
    ops: RowOperations<T>,
    l: DynMatrix<T>,
    p: PermutationMatrix,
    pivots: Vec<usize>,
}

impl<T: LinalgScalar> ForwardElimination<T> {
    fn new(a: &DynMatrix<T>) -> Self {
        let m = a.nrows();
        Self {
            ops: RowOperations::new(a),
            l: DynMatrix::eye(m, T::zero()),
            p: PermutationMatrix::identity(m),
            pivots: Vec::with_capacity(m.min(a.ncols())),
        }
    }

    /// Try to place a pivot for row `i` in column `j`. Returns `false`, with
    /// nothing modified, when the column has no usable pivot.
    fn step(
        &mut self,
        i: usize,
        j: usize,
        use_pivoting: bool,
        zero: &impl ZeroTest<T::Real>,
    ) -> bool {
        let pivot_row = if use_pivoting {
            select_pivot_row(self.ops.u(), i, j)
        } else {
            i
        };
        if zero.is_zero(self.ops.get(pivot_row, j).modulus()) {
            return false;
        }

        if pivot_row != i {
            self.ops.swap_rows(i, pivot_row);
            self.p.swap(i, pivot_row);
            // Only the multipliers already computed (columns < i) travel
            // with the row; the unit diagonal and the zeros above it stay.
            for c in 0..i {
                let tmp = self.l[(i, c)];
                self.l[(i, c)] = self.l[(pivot_row, c)];
                self.l[(pivot_row, c)] = tmp;
            }
        }

        let pivot = self.ops.get(i, j);
        for k in (i + 1)..self.ops.nrows() {
            let scale = self.ops.get(k, j) / pivot;
            self.ops.add_row(k, i, T::zero() - scale);
            *self.l.get_mut(k, i) = scale;
        }

        self.pivots.push(j);
        true
    }
}

/// Gaussian elimination to row echelon form, with optional partial pivoting.
///
/// Works on any `m x n` matrix. After construction:
/// - `t() · A == u()`, where `u()` is in row echelon form;
/// - `p() · A == l() · u()`, with `l()` unit lower triangular (`m x m`) and
///   `p()` the permutation of the row swaps.
///
/// A column whose candidate pivot is zero under the tolerance is skipped
/// without advancing the pivot row. Elimination never fails; rank
/// deficiency is reported by [`rank`](Self::rank) and
/// [`pivot_columns`](Self::pivot_columns).
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::GaussianElimination;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
/// let ge = GaussianElimination::new(&a);
///
/// assert_eq!(ge.u(), &DynMatrix::from_rows(2, 2, &[2.0, 1.0, 0.0, 2.5]));
/// assert_eq!(ge.l(), &DynMatrix::from_rows(2, 2, &[1.0, 0.0, 0.5, 1.0]));
/// assert_eq!(ge.p(), DynMatrix::eye(2, 0.0));
/// assert_eq!(ge.rank(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianElimination<T> {
    t: DynMatrix<T>,
    u: DynMatrix<T>,
    l: DynMatrix<T>,
    p: PermutationMatrix,
    pivots: Vec<usize>,
    use_pivoting: bool,
}

impl<T: LinalgScalar> GaussianElimination<T> {
    /// Eliminate with partial pivoting and the matrix's automatic tolerance.
    pub fn new(a: &DynMatrix<T>) -> Self {
        Self::with_epsilon(a, true, auto_epsilon(a))
    }

    /// Eliminate treating any pivot with modulus `<= epsilon` as zero.
    pub fn with_epsilon(a: &DynMatrix<T>, use_pivoting: bool, epsilon: T::Real) -> Self {
        Self::with_zero_test(a, use_pivoting, &Precision::new(epsilon))
    }

    /// Eliminate with a caller-supplied zero test for pivot candidates.
    pub fn with_zero_test(
        a: &DynMatrix<T>,
        use_pivoting: bool,
        zero: &impl ZeroTest<T::Real>,
    ) -> Self {
        let (m, n) = (a.nrows(), a.ncols());
        let mut fwd = ForwardElimination::new(a);

        let mut i = 0;
        for j in 0..n {
            if i >= m {
                break;
            }
            if fwd.step(i, j, use_pivoting, zero) {
                i += 1;
            }
        }

        let ForwardElimination { ops, l, p, pivots } = fwd;
        let (t, u) = ops.into_parts();
        Self {
            t,
            u,
            l,
            p,
            pivots,
            use_pivoting,
        }
    }

    /// Accumulated transform with `T · A == U`.
    #[inline]
    pub fn t(&self) -> &DynMatrix<T> {
        &self.t
    }

    /// Row echelon form of `A`.
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// Unit lower triangular multipliers.
    #[inline]
    pub fn l(&self) -> &DynMatrix<T> {
        &self.l
    }

    /// Dense permutation matrix with `P · A == L · U`.
    pub fn p(&self) -> DynMatrix<T> {
        self.p.to_dense()
    }

    /// The permutation as row indices.
    #[inline]
    pub fn permutation(&self) -> &PermutationMatrix {
        &self.p
    }

    /// Column of each pivot, in pivot-row order.
    #[inline]
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of pivots placed.
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Whether partial pivoting was requested.
    #[inline]
    pub fn is_pivoting(&self) -> bool {
        self.use_pivoting
    }

    pub(crate) fn into_factors(self) -> (DynMatrix<T>, DynMatrix<T>, PermutationMatrix, usize) {
        let rank = self.pivots.len();
        (self.l, self.u, self.p, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_mat_near(a: &DynMatrix<f64>, b: &DynMatrix<f64>, tol: f64, msg: &str) {
        assert!(a.approx_eq(b, tol), "{}:\n{}\nvs\n{}", msg, a, b);
    }

    fn check_identities(a: &DynMatrix<f64>, ge: &GaussianElimination<f64>) {
        assert_mat_near(&(ge.t() * a), ge.u(), TOL, "T*A == U");
        assert_mat_near(&(&ge.p() * a), &(ge.l() * ge.u()), TOL, "P*A == L*U");
    }

    #[test]
    fn symmetric_2x2_no_swap() {
        let a = DynMatrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.p(), DynMatrix::eye(2, 0.0));
        assert_eq!(ge.l(), &DynMatrix::from_rows(2, 2, &[1.0, 0.0, 0.5, 1.0]));
        assert_eq!(ge.u(), &DynMatrix::from_rows(2, 2, &[2.0, 1.0, 0.0, 2.5]));
        check_identities(&a, &ge);
    }

    #[test]
    fn zero_leading_entry_forces_swap() {
        let a = DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.p(), DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]));
        assert_eq!(ge.l(), &DynMatrix::eye(2, 0.0));
        assert_eq!(ge.u(), &DynMatrix::eye(2, 0.0));
        assert_eq!(ge.t(), &a);
        check_identities(&a, &ge);
    }

    #[test]
    fn l_swap_moves_only_computed_multipliers() {
        // Swaps at both steps; the second must carry L[.,0] but not the
        // unit diagonal.
        let a = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 2.0, 1.0, 1.0]);
        let ge = GaussianElimination::new(&a);

        assert_eq!(ge.permutation().indices(), &[1, 2, 0]);
        assert_eq!(
            ge.l(),
            &DynMatrix::from_rows(3, 3, &[1.0, 0.0, 0.0, 0.5, 1.0, 0.0, 0.25, -0.5, 1.0])
        );
        assert_eq!(
            ge.u(),
            &DynMatrix::from_rows(3, 3, &[4.0, 5.0, 7.0, 0.0, -1.5, -2.5, 0.0, 0.0, 0.0])
        );
        assert_eq!(ge.rank(), 2);
        check_identities(&a, &ge);
    }

    #[test]
    fn ties_keep_first_row() {
        let a = DynMatrix::from_rows(3, 2, &[-3.0, 1.0, 3.0, 5.0, 3.0, 2.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.permutation().indices(), &[0, 1, 2]);
        assert_eq!(ge.u()[(0, 0)], -3.0);
        check_identities(&a, &ge);
    }

    #[test]
    fn general_4x4() {
        let a = DynMatrix::from_rows(
            4,
            4,
            &[
                1.0, 2.0, 3.0, 4.0, //
                5.0, 6.0, 7.0, 8.0, //
                2.0, 6.0, 4.0, 1.0, //
                3.0, 1.0, 9.0, 2.0,
            ],
        );
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.rank(), 4);
        assert_eq!(ge.pivot_columns(), &[0, 1, 2, 3]);
        check_identities(&a, &ge);

        // Partial pivoting bounds every multiplier by 1.
        for i in 0..4 {
            for j in 0..i {
                assert!(ge.l()[(i, j)].abs() <= 1.0);
            }
        }
    }

    #[test]
    fn rank_deficient_square() {
        let a: DynMatrix<f64> = DynMatrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.rank(), 2);
        assert_eq!(ge.pivot_columns(), &[0, 1]);
        for j in 0..3 {
            assert!(ge.u()[(2, j)].abs() < TOL);
        }
        check_identities(&a, &ge);
    }

    #[test]
    fn wide_matrix_with_skipped_columns() {
        let a: DynMatrix<f64> = DynMatrix::from_rows(2, 4, &[0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 4.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.pivot_columns(), &[2, 3]);
        assert_eq!(ge.l().nrows(), 2);
        assert!((ge.l()[(1, 0)] - 1.0 / 3.0).abs() < TOL);
        check_identities(&a, &ge);
    }

    #[test]
    fn tall_matrix() {
        let a: DynMatrix<f64> = DynMatrix::from_rows(4, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.rank(), 2);
        assert_eq!(ge.l().nrows(), 4);
        assert_eq!(ge.t().nrows(), 4);
        for i in 2..4 {
            for j in 0..2 {
                assert!(ge.u()[(i, j)].abs() < TOL);
            }
        }
        check_identities(&a, &ge);
    }

    #[test]
    fn without_pivoting_keeps_row_order() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let ge = GaussianElimination::with_epsilon(&a, false, 1e-12);
        assert!(!ge.is_pivoting());
        assert_eq!(ge.p(), DynMatrix::eye(2, 0.0));
        assert_eq!(ge.l(), &DynMatrix::from_rows(2, 2, &[1.0, 0.0, 3.0, 1.0]));
        assert_eq!(ge.u(), &DynMatrix::from_rows(2, 2, &[1.0, 2.0, 0.0, -2.0]));
        check_identities(&a, &ge);
    }

    #[test]
    fn without_pivoting_zero_pivot_skips_column() {
        let a = DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let ge = GaussianElimination::with_epsilon(&a, false, 1e-12);
        assert_eq!(ge.pivot_columns(), &[1]);
        assert_eq!(ge.u(), &a);
        check_identities(&a, &ge);
    }

    #[test]
    fn tiny_pivot_below_epsilon_is_skipped() {
        let a = DynMatrix::from_rows(2, 2, &[1e-14, 1.0, 1e-14, 2.0]);
        let ge = GaussianElimination::with_epsilon(&a, true, 1e-10);
        assert_eq!(ge.pivot_columns(), &[1]);
        check_identities(&a, &ge);
    }

    #[test]
    fn zero_matrix_has_rank_zero() {
        let a = DynMatrix::zeros(3, 3, 0.0_f64);
        let ge = GaussianElimination::new(&a);
        assert_eq!(ge.rank(), 0);
        assert_eq!(ge.u(), &a);
        assert_eq!(ge.l(), &DynMatrix::eye(3, 0.0));
    }

    #[test]
    fn input_is_not_mutated() {
        let a = DynMatrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let before = a.clone();
        let _ = GaussianElimination::new(&a);
        assert_eq!(a, before);
    }

    #[test]
    fn f32_support() {
        let a = DynMatrix::from_rows(2, 2, &[4.0_f32, 3.0, 6.0, 3.0]);
        let ge = GaussianElimination::new(&a);
        let pa = &ge.p() * &a;
        let lu = ge.l() * ge.u();
        assert!(pa.approx_eq(&lu, 1e-5));
    }
}
