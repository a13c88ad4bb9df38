use crate::linalg::positive_definite::{PositiveDefiniteByPositiveDiagonal, PositiveDefiniteRepair};
use crate::linalg::triangular::{LowerTriangular, UpperTriangular};
use crate::linalg::{Cholesky, LinalgError};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Cholesky factorization of a symmetric matrix after eigenvalue flooring
/// (Wang, 2006).
///
/// The input is first repaired by [`PositiveDefiniteByPositiveDiagonal`],
/// then factored as `A⁺ = L·Lᵀ`. An input that is already positive definite
/// is factored as is. Input that is not symmetric within the repair's
/// `epsilon` is rejected with `InvalidParameter`, so `L·Lᵀ` reproduces
/// [`repaired`](PositiveDefiniteRepair::repaired) to within that tolerance.
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::positive_definite::CholeskyWang2006;
/// use echelon::linalg::positive_definite::PositiveDefiniteRepair;
///
/// // Singular correlation matrix: plain Cholesky rejects it.
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0]);
/// assert!(a.cholesky().is_err());
///
/// let wang = CholeskyWang2006::new(&a).unwrap();
/// let l = wang.l().as_matrix();
/// assert!((l * &l.transpose()).approx_eq(wang.repaired(), 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyWang2006<T> {
    repair: PositiveDefiniteByPositiveDiagonal<T>,
    cholesky: Cholesky<T>,
}

impl<T: FloatScalar> CholeskyWang2006<T> {
    /// Repair with the default tolerance and floor, then factor.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::from_repair(PositiveDefiniteByPositiveDiagonal::new(a)?)
    }

    /// Repair with an explicit tolerance and floor, then factor.
    ///
    /// `NotPositiveDefinite` is only returned if the repaired matrix still
    /// fails to factor, e.g. when `small` is lost in round-off.
    pub fn with_params(a: &DynMatrix<T>, epsilon: T, small: T) -> Result<Self, LinalgError> {
        Self::from_repair(PositiveDefiniteByPositiveDiagonal::with_params(
            a, epsilon, small,
        )?)
    }

    fn from_repair(repair: PositiveDefiniteByPositiveDiagonal<T>) -> Result<Self, LinalgError> {
        let cholesky = Cholesky::new(repair.matrix())?;
        Ok(Self { repair, cholesky })
    }

    #[inline]
    pub fn l(&self) -> &LowerTriangular<T> {
        self.cholesky.l()
    }

    #[inline]
    pub fn lt(&self) -> UpperTriangular<T> {
        self.cholesky.lt()
    }

    /// Whether the eigenvalue floor changed the input.
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.repair.is_modified()
    }

    #[inline]
    pub fn cholesky(&self) -> &Cholesky<T> {
        &self.cholesky
    }
}

impl<T: FloatScalar> PositiveDefiniteRepair<T> for CholeskyWang2006<T> {
    fn repaired(&self) -> &DynMatrix<T> {
        self.repair.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_definite_input_factors_directly() {
        let a = DynMatrix::from_rows(2, 2, &[4.0, 2.0, 2.0, 3.0]);
        let wang = CholeskyWang2006::new(&a).unwrap();
        assert!(!wang.is_modified());
        assert_eq!(wang.repaired(), &a);
        let plain = a.cholesky().unwrap();
        assert_eq!(wang.l(), plain.l());
    }

    #[test]
    fn indefinite_input_is_repaired_then_factored() {
        let a = DynMatrix::from_rows(
            3,
            3,
            &[1.0, 0.9, -0.7, 0.9, 1.0, 0.3, -0.7, 0.3, 1.0],
        );
        assert!(a.cholesky().is_err());

        let wang = CholeskyWang2006::with_params(&a, 1e-12, 1e-4).unwrap();
        assert!(wang.is_modified());
        let llt = wang.l().as_matrix() * wang.lt().as_matrix();
        assert!(llt.approx_eq(wang.repaired(), 1e-10), "{}", llt);
        // flooring only raises the spectrum, so the repair stays close
        assert!(wang.repaired().approx_eq(&a, 0.5));
    }

    #[test]
    fn asymmetric_input_is_rejected() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 5.0, 0.0, 1.0]);
        assert!(matches!(
            CholeskyWang2006::new(&a),
            Err(LinalgError::InvalidParameter(_))
        ));
    }

    #[test]
    fn non_square_is_rejected() {
        let a = DynMatrix::zeros(2, 3, 0.0_f64);
        assert_eq!(
            CholeskyWang2006::new(&a).unwrap_err(),
            LinalgError::NotSquare { nrows: 2, ncols: 3 }
        );
    }
}
