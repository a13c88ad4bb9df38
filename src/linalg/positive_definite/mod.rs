//! Repairs that perturb a symmetric, possibly indefinite matrix into a
//! nearby positive-definite one.
//!
//! | Type | Method | Decomposition used |
//! |------|--------|--------------------|
//! | [`PositiveDefiniteByPositiveDiagonal`] | floor the spectrum at `small` | [`SymmetricEigen`] |
//! | [`CholeskyWang2006`] | the above, then factor | [`SymmetricEigen`], [`Cholesky`] |
//! | [`MatthewsDavies`] | replace non-positive pivots of `D` | [`Ldl`] |
//! | [`GoldfeldQuandtTrotter`] | blend toward the identity | none |
//!
//! Each repair is computed eagerly in its constructor and is immutable
//! afterwards. [`PositiveDefiniteRepair`] gives uniform access to the
//! repaired matrix.
//!
//! [`SymmetricEigen`]: crate::linalg::SymmetricEigen
//! [`Cholesky`]: crate::linalg::Cholesky
//! [`Ldl`]: crate::linalg::Ldl

mod goldfeld_quandt_trotter;
mod matthews_davies;
mod positive_diagonal;
mod wang2006;

pub use goldfeld_quandt_trotter::GoldfeldQuandtTrotter;
pub use matthews_davies::MatthewsDavies;
pub use positive_diagonal::PositiveDefiniteByPositiveDiagonal;
pub use wang2006::CholeskyWang2006;

use crate::DynMatrix;

/// A positive-definite repair of a symmetric matrix.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::positive_definite::{
///     GoldfeldQuandtTrotter, MatthewsDavies, PositiveDefiniteRepair,
/// };
///
/// let h = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
/// let repairs: Vec<Box<dyn PositiveDefiniteRepair<f64>>> = vec![
///     Box::new(MatthewsDavies::new(&h).unwrap()),
///     Box::new(GoldfeldQuandtTrotter::new(&h, 4.0).unwrap()),
/// ];
/// for r in &repairs {
///     assert!(r.repaired().cholesky().is_ok());
/// }
/// ```
pub trait PositiveDefiniteRepair<T> {
    /// The repaired matrix.
    fn repaired(&self) -> &DynMatrix<T>;
}
