//! Error type, result alias and comparison helpers shared by all modules.

use ndarray::{ArrayView1, ArrayView2};
use ndarray_linalg::Norm;
use thiserror::Error;

pub use ndarray_linalg::Scalar;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QRCompressionError {
    #[error("Invalid matrix dimension {nrows}x{ncols}, both dimensions must be at least 1")]
    InvalidDimension { nrows: usize, ncols: usize },
    #[error("Matrix contains a non-finite value at ({row}, {col})")]
    NonFiniteInput { row: usize, col: usize },
    #[error("Rank {rank} outside of admissible range [1, {max}]")]
    RankOutOfRange { rank: usize, max: usize },
    #[error("Incompatible shapes: {0}")]
    ShapeMismatch(String),
    #[error("Index array is not a permutation of 0..{0}")]
    InvalidPermutation(usize),
    #[error("Tolerance {0} outside of [0, 1)")]
    InvalidTolerance(f64),
    #[error("Could not compress to desired tolerance")]
    CompressionError,
    #[error("Incompatible memory layout")]
    LayoutError,
    #[error("Lapack routine {routine} failed with info = {info}")]
    Lapack { routine: &'static str, info: i32 },
}

pub type Result<T> = std::result::Result<T, QRCompressionError>;

pub trait RelDiff {
    type A: Scalar;

    /// Return the relative Frobenius norm difference of `first` and `second`.
    fn rel_diff_fro(
        first: ArrayView2<Self::A>,
        second: ArrayView2<Self::A>,
    ) -> <<Self as RelDiff>::A as Scalar>::Real;

    /// Return the relative l2 vector norm difference of `first` and `second`.
    fn rel_diff_l2(
        first: ArrayView1<Self::A>,
        second: ArrayView1<Self::A>,
    ) -> <<Self as RelDiff>::A as Scalar>::Real;
}

macro_rules! rel_diff_impl {
    ($scalar:ty) => {
        impl RelDiff for $scalar {
            type A = $scalar;

            // The elementwise l2 norm of a 2d array is its Frobenius norm.
            fn rel_diff_fro(
                first: ArrayView2<Self::A>,
                second: ArrayView2<Self::A>,
            ) -> <<Self as RelDiff>::A as Scalar>::Real {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }

            fn rel_diff_l2(
                first: ArrayView1<Self::A>,
                second: ArrayView1<Self::A>,
            ) -> <<Self as RelDiff>::A as Scalar>::Real {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }
        }
    };
}

rel_diff_impl!(f32);
rel_diff_impl!(f64);
