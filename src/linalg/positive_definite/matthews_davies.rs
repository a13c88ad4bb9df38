use alloc::vec::Vec;

use crate::linalg::positive_definite::PositiveDefiniteRepair;
use crate::linalg::tolerance::auto_epsilon;
use crate::linalg::triangular::{LowerTriangular, UpperTriangular};
use crate::linalg::{Ldl, LinalgError};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Matthews-Davies repair of an indefinite Hessian through its LDLᵀ
/// decomposition.
///
/// `H = L·D·Lᵀ` is computed without pivoting. Every entry of `D` that is
/// not greater than `epsilon` is replaced by the smallest entry that is,
/// or by `1` when no such entry exists, giving `D̂`. The repair is
/// `Ĥ = L·D̂·Lᵀ`, which is positive definite because `L` is unit lower
/// triangular.
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::positive_definite::MatthewsDavies;
///
/// let h = DynMatrix::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, -3.0]);
/// let md = MatthewsDavies::new(&h).unwrap();
/// assert_eq!(md.d(), DynMatrix::from_diag(&[4.0, -4.0]));
/// assert_eq!(md.d_hat(), DynMatrix::from_diag(&[4.0, 4.0]));
/// assert!(md.h_hat().cholesky().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MatthewsDavies<T> {
    ldl: Ldl<T>,
    d_hat: Vec<T>,
    h_hat: DynMatrix<T>,
}

impl<T: FloatScalar> MatthewsDavies<T> {
    /// Repair with the matrix's automatic tolerance.
    pub fn new(h: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_epsilon(h, auto_epsilon(h))
    }

    /// Repair treating every `d_j <= epsilon` as non-positive.
    ///
    /// Fails with `NotSquare`, or with `InvalidParameter` for a negative or
    /// NaN `epsilon`.
    pub fn with_epsilon(h: &DynMatrix<T>, epsilon: T) -> Result<Self, LinalgError> {
        let ldl = Ldl::with_epsilon(h, epsilon)?;

        let replacement = ldl
            .d()
            .iter()
            .copied()
            .filter(|&d| d > epsilon)
            .fold(None, |min: Option<T>, d| match min {
                Some(m) if m <= d => Some(m),
                _ => Some(d),
            })
            .unwrap_or_else(T::one);

        let d_hat: Vec<T> = ldl
            .d()
            .iter()
            .map(|&d| if d > epsilon { d } else { replacement })
            .collect();
        let h_hat = ldl.reconstruct_with(&d_hat);

        Ok(Self { ldl, d_hat, h_hat })
    }

    #[inline]
    pub fn l(&self) -> &LowerTriangular<T> {
        self.ldl.l()
    }

    #[inline]
    pub fn lt(&self) -> UpperTriangular<T> {
        self.ldl.lt()
    }

    /// `D` from the decomposition of the input.
    pub fn d(&self) -> DynMatrix<T> {
        self.ldl.d_matrix()
    }

    /// `D̂`, with every non-positive pivot replaced.
    pub fn d_hat(&self) -> DynMatrix<T> {
        DynMatrix::from_diag(&self.d_hat)
    }

    /// Whether any pivot of `D` was replaced.
    pub fn is_modified(&self) -> bool {
        self.ldl.d() != self.d_hat.as_slice()
    }

    /// The repaired matrix `Ĥ = L·D̂·Lᵀ`.
    #[inline]
    pub fn h_hat(&self) -> &DynMatrix<T> {
        &self.h_hat
    }
}

impl<T: FloatScalar> PositiveDefiniteRepair<T> for MatthewsDavies<T> {
    fn repaired(&self) -> &DynMatrix<T> {
        &self.h_hat
    }
}
