//! Traits and functions for permutation vectors.
//!
//! A permutation is stored as an index array `ind` of length $n$. Applying it
//! in `COL` mode gathers columns, i.e. column $j$ of the result is column
//! `ind[j]` of the input. `COLINV` is the inverse operation and scatters, i.e.
//! column $j$ of the input is written to column `ind[j]` of the result. The
//! `ROW` modes act identically on rows.

use crate::types::{QRCompressionError, Result};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};
use num::Zero;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixPermutationMode {
    COL,
    ROW,
    COLINV,
    ROWINV,
}

/// Return true if `perm` contains every index in `0..perm.len()` exactly once.
pub fn is_permutation<S: Data<Elem = usize>>(perm: &ArrayBase<S, Ix1>) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];

    for &elem in perm.iter() {
        if elem >= n || seen[elem] {
            return false;
        }
        seen[elem] = true;
    }

    true
}

/// Check that `perm` is a permutation of `0..n`.
pub fn validate_permutation<S: Data<Elem = usize>>(perm: &ArrayBase<S, Ix1>, n: usize) -> Result<()> {
    if perm.len() != n || !is_permutation(perm) {
        return Err(QRCompressionError::InvalidPermutation(n));
    }
    Ok(())
}

/// Return the inverse permutation, i.e. `inverse[perm[j]] = j`.
pub fn invert_permutation_vector<S: Data<Elem = usize>>(perm: &ArrayBase<S, Ix1>) -> Array1<usize> {
    let n = perm.len();

    let mut inverse = Array1::<usize>::zeros(n);

    for (index, &elem) in perm.iter().enumerate() {
        inverse[elem] = index;
    }

    inverse
}

pub trait ApplyPermutationToMatrix {
    type A;

    /// Permute the rows or columns of a matrix according to `index_array`.
    ///
    /// `index_array` must be a permutation of the row or column indices
    /// selected by `mode`; this is not checked.
    fn apply_permutation(
        &self,
        index_array: ArrayView1<usize>,
        mode: MatrixPermutationMode,
    ) -> Array2<Self::A>;
}

impl<A, S> ApplyPermutationToMatrix for ArrayBase<S, Ix2>
where
    A: Copy + Zero,
    S: Data<Elem = A>,
{
    type A = A;

    fn apply_permutation(
        &self,
        index_array: ArrayView1<usize>,
        mode: MatrixPermutationMode,
    ) -> Array2<Self::A> {
        let m = self.nrows();
        let n = self.ncols();

        let mut permuted = Array2::<A>::zeros((m, n));

        match mode {
            MatrixPermutationMode::COL => {
                for (index, mut col) in permuted.axis_iter_mut(Axis(1)).enumerate() {
                    col.assign(&self.index_axis(Axis(1), index_array[index]));
                }
            }
            MatrixPermutationMode::ROW => {
                for (index, mut row) in permuted.axis_iter_mut(Axis(0)).enumerate() {
                    row.assign(&self.index_axis(Axis(0), index_array[index]));
                }
            }
            MatrixPermutationMode::COLINV => {
                for (index, col) in self.axis_iter(Axis(1)).enumerate() {
                    permuted
                        .index_axis_mut(Axis(1), index_array[index])
                        .assign(&col);
                }
            }
            MatrixPermutationMode::ROWINV => {
                for (index, row) in self.axis_iter(Axis(0)).enumerate() {
                    permuted
                        .index_axis_mut(Axis(0), index_array[index])
                        .assign(&row);
                }
            }
        };

        permuted
    }
}
