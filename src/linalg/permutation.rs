use alloc::vec::Vec;

use crate::traits::Scalar;
use crate::DynMatrix;

/// Row permutation built from a sequence of row swaps.
///
/// Stored as an index vector: row `i` of `P·A` is row `indices()[i]` of `A`.
/// Swapping rows `i` and `j` of `P` is a swap of two indices, so the
/// permutation stays in sync with the swaps applied during elimination at
/// O(1) cost. [`to_dense`](Self::to_dense) materializes the 0/1 matrix.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::PermutationMatrix;
///
/// let mut p = PermutationMatrix::identity(3);
/// p.swap(0, 2);
/// assert_eq!(p.indices(), &[2, 1, 0]);
/// assert_eq!(p.sign(), -1);
///
/// let a = DynMatrix::from_rows(3, 1, &[1.0_f64, 2.0, 3.0]);
/// assert_eq!(p.apply_rows(&a), &p.to_dense::<f64>() * &a);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationMatrix {
    perm: Vec<usize>,
    even: bool,
}

impl PermutationMatrix {
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
            even: true,
        }
    }

    /// Exchange rows `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i != j {
            self.perm.swap(i, j);
            self.even = !self.even;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.perm
    }

    /// Determinant of the permutation: `+1` for an even number of swaps.
    pub fn sign(&self) -> i8 {
        if self.even {
            1
        } else {
            -1
        }
    }

    /// Dense `n x n` 0/1 matrix with one 1 per row and column.
    pub fn to_dense<T: Scalar>(&self) -> DynMatrix<T> {
        let n = self.perm.len();
        let mut p = DynMatrix::zeros(n, n, T::zero());
        for (i, &src) in self.perm.iter().enumerate() {
            p[(i, src)] = T::one();
        }
        p
    }

    /// `P·A`, gathering rows instead of multiplying.
    pub fn apply_rows<T: Scalar>(&self, a: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            a.nrows(),
            self.perm.len(),
            "permutation of size {} applied to {} rows",
            self.perm.len(),
            a.nrows(),
        );
        DynMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[(self.perm[i], j)])
    }

    /// Inverse permutation, `Pᵀ`.
    pub fn transpose(&self) -> Self {
        let mut inv = alloc::vec![0; self.perm.len()];
        for (i, &src) in self.perm.iter().enumerate() {
            inv[src] = i;
        }
        Self {
            perm: inv,
            even: self.even,
        }
    }
}
