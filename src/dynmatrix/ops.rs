use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::Scalar;

use super::DynMatrix;

fn zip_map<T: Scalar>(
    lhs: &DynMatrix<T>,
    rhs: &DynMatrix<T>,
    op: &str,
    f: impl Fn(T, T) -> T,
) -> DynMatrix<T> {
    assert_eq!(
        (lhs.nrows, lhs.ncols),
        (rhs.nrows, rhs.ncols),
        "dimension mismatch: {}x{} {} {}x{}",
        lhs.nrows, lhs.ncols, op, rhs.nrows, rhs.ncols,
    );
    let data = lhs
        .data
        .iter()
        .zip(rhs.data.iter())
        .map(|(&a, &b)| f(a, b))
        .collect();
    DynMatrix {
        data,
        nrows: lhs.nrows,
        ncols: lhs.ncols,
    }
}

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: Scalar> Add<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn add(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        zip_map(self, rhs, "+", |a, b| a + b)
    }
}

impl<T: Scalar> Add for DynMatrix<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: Scalar> Add<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn add(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self + rhs
    }
}

impl<T: Scalar> Sub<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn sub(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        zip_map(self, rhs, "-", |a, b| a - b)
    }
}

impl<T: Scalar> Sub for DynMatrix<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Scalar> Sub<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn sub(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self - rhs
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for DynMatrix<T> {
    type Output = Self;
    fn neg(mut self) -> Self {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }
}

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = rhs.ncols;
        let mut out = DynMatrix::zeros(m, n, T::zero());
        // j-k-i order walks both column-major operands contiguously.
        for j in 0..n {
            for k in 0..self.ncols {
                let b_kj = rhs[(k, j)];
                if b_kj == T::zero() {
                    continue;
                }
                for i in 0..m {
                    out.data[j * m + i] = out.data[j * m + i] + self.data[k * m + i] * b_kj;
                }
            }
        }
        out
    }
}

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        self * &rhs
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for DynMatrix<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
        self
    }
}

impl<T: Scalar> Mul<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.clone() * rhs
    }
}

impl<T: Scalar> Div<T> for DynMatrix<T> {
    type Output = Self;
    fn div(mut self, rhs: T) -> Self {
        for x in self.data.iter_mut() {
            *x = *x / rhs;
        }
        self
    }
}

impl<T: Scalar> Div<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn div(self, rhs: T) -> DynMatrix<T> {
        self.clone() / rhs
    }
}
