use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{require_square, LinalgError};
use crate::traits::FloatScalar;
use crate::DynMatrix;

/// Householder tridiagonalization of a symmetric matrix.
///
/// Returns `(diag, off_diag, q)` with `Qᵀ A Q = T`, where `T` has `diag` on
/// its diagonal and `off_diag[i] = T[i+1, i]` on its sub-diagonal. `a` is
/// assumed symmetric.
fn tridiagonalize<T: FloatScalar>(a: &DynMatrix<T>) -> (Vec<T>, Vec<T>, DynMatrix<T>) {
    let n = a.nrows();
    let mut w = a.clone();
    let mut q = DynMatrix::eye(n, T::zero());
    let mut off_diag = vec![T::zero(); n.saturating_sub(1)];
    let eps = T::epsilon();
    let two = T::one() + T::one();

    for k in 0..n.saturating_sub(2) {
        let mut norm_sq = T::zero();
        for i in (k + 1)..n {
            norm_sq = norm_sq + w[(i, k)] * w[(i, k)];
        }
        if norm_sq <= eps * eps {
            off_diag[k] = T::zero();
            continue;
        }

        // v = x + sign(x0)·‖x‖·e1; v0 is kept apart, v[1..] lives in w[k+2.., k]
        let norm = norm_sq.sqrt();
        let x0 = w[(k + 1, k)];
        let sigma = if x0 < T::zero() { -norm } else { norm };
        let v0 = x0 + sigma;
        let sub_n = n - k - 1;
        let v = |idx: usize, w: &DynMatrix<T>| if idx == 0 { v0 } else { w[(k + 1 + idx, k)] };

        let mut v_norm_sq = T::zero();
        for i in 0..sub_n {
            let vi = v(i, &w);
            v_norm_sq = v_norm_sq + vi * vi;
        }
        let tau = two / v_norm_sq;

        // p = τ·A₂₂·v, then q = p - (τ/2)(vᵀp)·v
        let mut p = vec![T::zero(); sub_n];
        for (i, pi) in p.iter_mut().enumerate() {
            let mut dot = T::zero();
            for j in 0..sub_n {
                dot = dot + w[(k + 1 + i, k + 1 + j)] * v(j, &w);
            }
            *pi = tau * dot;
        }
        let mut vtp = T::zero();
        for (i, &pi) in p.iter().enumerate() {
            vtp = vtp + v(i, &w) * pi;
        }
        let half = tau / two * vtp;
        let qv: Vec<T> = (0..sub_n).map(|i| p[i] - half * v(i, &w)).collect();

        // A₂₂ -= v·qᵀ + q·vᵀ
        for i in 0..sub_n {
            let vi = v(i, &w);
            for j in 0..sub_n {
                let vj = v(j, &w);
                let cell = &mut w[(k + 1 + i, k + 1 + j)];
                *cell = *cell - vi * qv[j] - qv[i] * vj;
            }
        }

        off_diag[k] = -sigma;

        // Q ← Q·(I - τ·v·vᵀ)
        for row in 0..n {
            let mut s = T::zero();
            for m in 0..sub_n {
                s = s + q[(row, k + 1 + m)] * v(m, &w);
            }
            s = tau * s;
            for m in 0..sub_n {
                let vm = v(m, &w);
                q[(row, k + 1 + m)] = q[(row, k + 1 + m)] - s * vm;
            }
        }
    }

    let diag = w.diag();
    if n >= 2 {
        off_diag[n - 2] = w[(n - 1, n - 2)];
    }
    (diag, off_diag, q)
}

/// Givens rotation: `(c, s)` with `[c s; -s c]·[a; b] = [r; 0]`.
#[inline]
fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Implicit symmetric QR with Wilkinson shift, accumulating rotations into `q`.
fn tridiagonal_qr<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    q: &mut DynMatrix<T>,
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = diag.len();
    if n <= 1 {
        return Ok(());
    }

    let eps = T::epsilon();
    let two = T::one() + T::one();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        let mut lo = hi;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        let d = (diag[hi - 1] - diag[hi]) / two;
        let e = off_diag[hi - 1];
        let r = (d * d + e * e).sqrt();
        let shift = diag[hi] - e * e / (d + if d >= T::zero() { r } else { -r });

        let mut x = diag[lo] - shift;
        let mut z = off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);
            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let d_k = diag[k];
            let d_k1 = diag[k + 1];
            let e_k = off_diag[k];
            diag[k] = c * c * d_k + two * c * s * e_k + s * s * d_k1;
            diag[k + 1] = s * s * d_k - two * c * s * e_k + c * c * d_k1;
            off_diag[k] = c * s * (d_k1 - d_k) + (c * c - s * s) * e_k;

            // bulge at (k, k+2)
            if k + 1 < hi {
                let e_next = off_diag[k + 1];
                x = off_diag[k];
                z = s * e_next;
                off_diag[k + 1] = c * e_next;
            }

            for i in 0..q.nrows() {
                let qik = q[(i, k)];
                let qik1 = q[(i, k + 1)];
                q[(i, k)] = c * qik + s * qik1;
                q[(i, k + 1)] = c * qik1 - s * qik;
            }
        }
    }

    Ok(())
}

/// Eigendecomposition of a real symmetric matrix: `A = Q · diag(λ) · Qᵀ`.
///
/// Eigenvalues are sorted ascending and the columns of `Q` are the matching
/// orthonormal eigenvectors. Symmetry is assumed, not checked.
///
/// # Example
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::SymmetricEigen;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a).unwrap();
/// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-12);
/// assert!((eig.eigenvalues()[1] - 3.0).abs() < 1e-12);
/// assert!(eig.reconstruct().approx_eq(&a, 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T> {
    eigenvalues: Vec<T>,
    eigenvectors: DynMatrix<T>,
}

impl<T: FloatScalar> SymmetricEigen<T> {
    /// Decompose. Fails with `NotSquare`, or `ConvergenceFailure` after
    /// `30·n` QR sweeps.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let n = require_square(a)?;
        let (mut diag, mut off_diag, mut q) = tridiagonalize(a);
        tridiagonal_qr(&mut diag, &mut off_diag, &mut q, 30 * n.max(1))?;

        // selection sort keeps eigenvector columns in step
        for i in 0..n {
            let mut min_idx = i;
            for j in (i + 1)..n {
                if diag[j] < diag[min_idx] {
                    min_idx = j;
                }
            }
            if min_idx != i {
                diag.swap(i, min_idx);
                for row in 0..n {
                    let tmp = q[(row, i)];
                    q[(row, i)] = q[(row, min_idx)];
                    q[(row, min_idx)] = tmp;
                }
            }
        }

        Ok(Self {
            eigenvalues: diag,
            eigenvectors: q,
        })
    }

    /// Eigenvalues, ascending.
    #[inline]
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// Orthonormal eigenvectors, one per column.
    #[inline]
    pub fn eigenvectors(&self) -> &DynMatrix<T> {
        &self.eigenvectors
    }

    /// `Q · diag(λ) · Qᵀ`.
    pub fn reconstruct(&self) -> DynMatrix<T> {
        self.reconstruct_with(&self.eigenvalues)
    }

    /// `Q · diag(values) · Qᵀ` for a replacement spectrum.
    ///
    /// The lower triangle is computed and mirrored, so the result is exactly
    /// symmetric.
    pub fn reconstruct_with(&self, values: &[T]) -> DynMatrix<T> {
        let n = self.eigenvectors.nrows();
        assert_eq!(values.len(), n, "eigenvalue count mismatch");
        let q = &self.eigenvectors;
        let mut out = DynMatrix::zeros(n, n, T::zero());
        for j in 0..n {
            for i in j..n {
                let v = (0..n).fold(T::zero(), |acc, k| acc + q[(i, k)] * values[k] * q[(j, k)]);
                out[(i, j)] = v;
                out[(j, i)] = v;
            }
        }
        out
    }
}
