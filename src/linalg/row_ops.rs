use crate::traits::{MatrixMut, MatrixRef, Scalar};
use crate::DynMatrix;

/// Elementary row operations applied in lockstep to a working matrix `U`
/// and an accumulated transform `T`.
///
/// `T` starts as the identity and `U` as a copy of the input `A`, so after
/// any sequence of `swap_rows` / `scale_row` / `add_row` calls the invariant
/// `T · A == U` holds to working precision. The caller's matrix is copied
/// on construction and never touched again.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::RowOperations;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 4.0, 5.0]);
/// let mut ops = RowOperations::new(&a);
/// ops.add_row(1, 0, -2.0);
/// ops.scale_row(0, 0.5);
///
/// let (t, u) = ops.into_parts();
/// assert_eq!(&t * &a, u);
/// assert_eq!(u, DynMatrix::from_rows(2, 2, &[1.0, 0.5, 0.0, 3.0]));
/// ```
#[derive(Debug, Clone)]
pub struct RowOperations<T> {
    t: DynMatrix<T>,
    u: DynMatrix<T>,
}

impl<T: Scalar> RowOperations<T> {
    pub fn new(a: &DynMatrix<T>) -> Self {
        Self {
            t: DynMatrix::eye(a.nrows(), T::zero()),
            u: a.clone(),
        }
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.u.swap_rows(i, j);
        self.t.swap_rows(i, j);
    }

    /// Multiply row `i` by `c` in both matrices. `c` must be nonzero.
    pub fn scale_row(&mut self, i: usize, c: T) {
        self.u.scale_row(i, c);
        self.t.scale_row(i, c);
    }

    /// `row[dst] += c * row[src]` in both matrices.
    pub fn add_row(&mut self, dst: usize, src: usize, c: T) {
        self.u.add_row(dst, src, c);
        self.t.add_row(dst, src, c);
    }

    /// Entry of the working matrix `U`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        *self.u.get(i, j)
    }

    /// Overwrite an entry of `U` only. `T` is left alone, so this is for
    /// post-processing that corrects round-off, not for new operations.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        *self.u.get_mut(i, j) = v;
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.u.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.u.ncols()
    }

    pub fn t(&self) -> &DynMatrix<T> {
        &self.t
    }

    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    pub fn into_parts(self) -> (DynMatrix<T>, DynMatrix<T>) {
        (self.t, self.u)
    }
}
