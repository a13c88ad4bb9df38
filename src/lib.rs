//! # echelon
//!
//! Dense elimination and factorization in pure Rust, no-std compatible
//! (heap allocation required). Row echelon and reduced row echelon forms
//! with a tracked transform, LU with partial pivoting, and repairs that
//! turn an indefinite symmetric matrix into a positive-definite one.
//!
//! ## Quick start
//!
//! ```
//! use echelon::DynMatrix;
//! use echelon::linalg::GaussianElimination;
//!
//! let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
//! let ge = GaussianElimination::new(&a);
//!
//! // T·A = U and P·A = L·U
//! assert!((ge.t() * &a).approx_eq(ge.u(), 1e-12));
//! assert!((&ge.p() * &a).approx_eq(&(ge.l() * ge.u()), 1e-12));
//! assert_eq!(ge.u()[(1, 1)], 2.5);
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`] — Heap-allocated `DynMatrix<T>` with runtime dimensions,
//!   column-major `Vec<T>` storage, and the [`DynVector<T>`] newtype.
//!   Implements [`MatrixRef`] / [`MatrixMut`], the access seam the
//!   elimination engine is written against.
//!
//! - [`linalg`] — Elimination and decompositions:
//!   - [`linalg::RowOperations`] — elementary row operations mirrored onto
//!     an accumulated transform, keeping `T·A = U`
//!   - [`linalg::GaussianElimination`] — row echelon form, `L`, `P`, rank
//!   - [`linalg::GaussJordanElimination`] — reduced row echelon form with
//!     exact leading ones
//!   - [`linalg::LuDecomposition`] — square-only LU with typed factors
//!   - [`linalg::Cholesky`], [`linalg::Ldl`], [`linalg::SymmetricEigen`]
//!   - [`linalg::positive_definite`] — Wang 2006, Matthews-Davies and
//!     Goldfeld-Quandt-Trotter repairs
//!   - [`linalg::tolerance`] — injectable zero tests for pivot selection
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats, used by the symmetric decompositions
//!   - [`LinalgScalar`] — real floats and complex numbers, used by elimination
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access and row operations
//!
//! ## Complex matrices
//!
//! Enable the `complex` feature to run Gaussian, Gauss-Jordan and LU on
//! `Complex<f32>` / `Complex<f64>`. Pivots are compared by modulus and
//! tolerances stay real.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` for `LinalgError` |
//! | `libm`    | baseline | Pure-Rust software float fallback |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |
//! | `all`     | no       | All features: `std` + `complex` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynVector};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
