use crate::linalg::positive_definite::PositiveDefiniteRepair;
use crate::linalg::{require_square, LinalgError};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Goldfeld-Quandt-Trotter blend of a Hessian toward the identity:
/// `Ĥ = (H + β·I) / (1 + β)`.
///
/// Large `β` pulls `Ĥ` toward `I` (exactly `I` for `β = +∞`), small `β`
/// leaves it close to `H`. The result is positive definite whenever `β`
/// exceeds the magnitude of the most negative eigenvalue of `H`.
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::positive_definite::GoldfeldQuandtTrotter;
///
/// let h = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
/// let gqt = GoldfeldQuandtTrotter::new(&h, 3.0).unwrap();
/// assert_eq!(gqt.h_hat(), &DynMatrix::from_rows(2, 2, &[1.0, 0.5, 0.5, 1.0]));
///
/// let id = GoldfeldQuandtTrotter::new(&h, f64::INFINITY).unwrap();
/// assert_eq!(id.h_hat(), &DynMatrix::eye(2, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct GoldfeldQuandtTrotter<T> {
    h_hat: DynMatrix<T>,
    beta: T,
}

impl<T: FloatScalar> GoldfeldQuandtTrotter<T> {
    /// Fails with `NotSquare`, or `InvalidParameter` unless `beta > 0`.
    pub fn new(h: &DynMatrix<T>, beta: T) -> Result<Self, LinalgError> {
        let n = require_square(h)?;
        if !(beta > T::zero()) {
            return Err(LinalgError::InvalidParameter("beta must be positive"));
        }

        let h_hat = if beta.is_infinite() {
            DynMatrix::eye(n, T::zero())
        } else {
            let scale = T::one() + beta;
            DynMatrix::from_fn(n, n, |i, j| {
                let v = if i == j { h[(i, j)] + beta } else { h[(i, j)] };
                v / scale
            })
        };

        Ok(Self { h_hat, beta })
    }

    /// The blended matrix `Ĥ`.
    #[inline]
    pub fn h_hat(&self) -> &DynMatrix<T> {
        &self.h_hat
    }

    #[inline]
    pub fn beta(&self) -> T {
        self.beta
    }
}

impl<T: FloatScalar> PositiveDefiniteRepair<T> for GoldfeldQuandtTrotter<T> {
    fn repaired(&self) -> &DynMatrix<T> {
        &self.h_hat
    }
}
