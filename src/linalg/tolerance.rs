//! Tolerance policies for deciding when a pivot is numerically zero.
//!
//! Elimination never tests a pivot with `== 0`. Round-off can leave a
//! theoretically-zero entry as a tiny nonzero value, and a near-singular
//! matrix can produce spurious tiny pivots; both must be skipped. The test
//! is injected as a [`ZeroTest`], so callers can swap in their own policy.

use core::cmp::Ordering;

use num_traits::{Float, NumCast, Zero};

use crate::traits::{FloatScalar, LinalgScalar, MatrixRef};

/// Decides whether a non-negative magnitude counts as zero.
///
/// Implemented by [`Precision`] and by any `Fn(R) -> bool` closure:
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::GaussianElimination;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 1.0, 2.0 + 1e-9]);
/// // Treat anything below 1e-6 as zero: the second pivot vanishes.
/// let ge = GaussianElimination::with_zero_test(&a, true, &|x: f64| x < 1e-6);
/// assert_eq!(ge.rank(), 1);
/// ```
pub trait ZeroTest<R> {
    fn is_zero(&self, x: R) -> bool;
}

impl<R, F: Fn(R) -> bool> ZeroTest<R> for F {
    #[inline]
    fn is_zero(&self, x: R) -> bool {
        self(x)
    }
}

/// Absolute-tolerance comparison.
///
/// Two values compare `Equal` when they differ by at most `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision<R> {
    epsilon: R,
}

impl<R: FloatScalar> Precision<R> {
    /// A negative `epsilon` is taken by magnitude.
    pub fn new(epsilon: R) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    #[inline]
    pub fn epsilon(&self) -> R {
        self.epsilon
    }

    /// Three-way comparison with a dead band of width `epsilon` around equality.
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use echelon::linalg::Precision;
    ///
    /// let p = Precision::new(1e-10_f64);
    /// assert_eq!(p.compare(1.0, 1.0 + 1e-12), Ordering::Equal);
    /// assert_eq!(p.compare(1.0, 2.0), Ordering::Less);
    /// assert_eq!(p.compare(-1e-11, 0.0), Ordering::Equal);
    /// ```
    pub fn compare(&self, a: R, b: R) -> Ordering {
        if (a - b).abs() <= self.epsilon {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl<R: FloatScalar> ZeroTest<R> for Precision<R> {
    #[inline]
    fn is_zero(&self, x: R) -> bool {
        self.compare(x, R::zero()) == Ordering::Equal
    }
}

/// Scale-dependent default tolerance for a matrix:
/// `max|a_ij| * max(nrows, ncols) * machine_epsilon`.
///
/// Falls back to machine epsilon when the matrix is empty or all zero.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::tolerance::auto_epsilon;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0e6_f64, 0.0, 0.0, 1.0]);
/// let eps = auto_epsilon(&a);
/// assert_eq!(eps, 1.0e6 * 2.0 * f64::EPSILON);
/// ```
pub fn auto_epsilon<T: LinalgScalar>(a: &impl MatrixRef<T>) -> T::Real {
    let (m, n) = (a.nrows(), a.ncols());
    let mut scale = <T::Real as Zero>::zero();
    for j in 0..n {
        for i in 0..m {
            let v = a.get(i, j).modulus();
            if v > scale {
                scale = v;
            }
        }
    }
    if scale == <T::Real as Zero>::zero() {
        return T::lepsilon();
    }
    let dim = <T::Real as NumCast>::from(m.max(n)).unwrap_or_else(<T::Real as Float>::max_value);
    scale * dim * T::lepsilon()
}
