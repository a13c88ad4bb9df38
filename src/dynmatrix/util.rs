use alloc::vec::Vec;
use core::fmt;

use crate::traits::{LinalgScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Transpose.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = m.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Extract the diagonal.
    pub fn diag(&self) -> Vec<T> {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self[(i, i)]).collect()
    }

    /// Sum of diagonal elements.
    pub fn trace(&self) -> T {
        self.diag().into_iter().fold(T::zero(), |acc, x| acc + x)
    }

    /// Check if the matrix is exactly symmetric (`A == A^T`).
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        for i in 0..n {
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }

    /// Extract row `i` as a `DynVector`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let r = m.row(1);
    /// assert_eq!(r[0], 3.0);
    /// assert_eq!(r[1], 4.0);
    /// ```
    pub fn row(&self, i: usize) -> DynVector<T> {
        DynVector::from_vec((0..self.ncols).map(|j| self[(i, j)]).collect())
    }

    /// Extract column `j` as a `DynVector`.
    pub fn col(&self, j: usize) -> DynVector<T> {
        DynVector::from_slice(&self.data[j * self.nrows..(j + 1) * self.nrows])
    }

    /// Matrix-vector product `A * x`.
    pub fn mul_vec(&self, x: &DynVector<T>) -> DynVector<T> {
        assert_eq!(x.len(), self.ncols, "vector length mismatch");
        let mut out = alloc::vec![T::zero(); self.nrows];
        for j in 0..self.ncols {
            let xj = x[j];
            for (i, o) in out.iter_mut().enumerate() {
                *o = *o + self[(i, j)] * xj;
            }
        }
        DynVector::from_vec(out)
    }
}

impl<T: LinalgScalar> DynMatrix<T> {
    /// Largest element modulus, or zero for an empty matrix.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -7.5, 3.0, 4.0]);
    /// assert_eq!(m.max_abs(), 7.5);
    /// ```
    pub fn max_abs(&self) -> T::Real {
        let zero = <T::Real as num_traits::Zero>::zero();
        self.data
            .iter()
            .map(|x| x.modulus())
            .fold(zero, |acc, x| if x > acc { x } else { acc })
    }

    /// Element-wise comparison within an absolute tolerance.
    ///
    /// Matrices of different shapes are never equal.
    pub fn approx_eq(&self, other: &Self, tol: T::Real) -> bool {
        if self.nrows != other.nrows || self.ncols != other.ncols {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| (a - b).modulus() <= tol)
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        let cells: Vec<alloc::string::String> = (0..m * n)
            .map(|k| alloc::format!("{}", self[(k / n, k % n)]))
            .collect();

        let mut widths: Vec<usize> = alloc::vec![0; n];
        for (k, s) in cells.iter().enumerate() {
            let w = &mut widths[k % n];
            *w = (*w).max(s.chars().count());
        }

        for i in 0..m {
            write!(f, "[")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", cells[i * n + j], width = widths[j])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
