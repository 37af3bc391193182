//! Grayscale image compression by rank-revealing QR.
//!
//! An image is treated as a real matrix $A$ and factorized as $AP = QR$ with
//! column pivoting. Keeping the leading $k$ columns of $Q$ and rows of $R$ and
//! undoing the permutation gives a rank $k$ approximation of $A$ that is
//! stored in $hk + kw + w$ values.

pub mod compression;
pub mod metrics;
pub mod permutation;
pub mod pivoted_qr;
pub mod prelude;
pub mod qr;
pub mod random_matrix;
pub mod types;

/// Number of components proposed before the user picks a rank.
pub const DEFAULT_RANK: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CompressionType {
    /// Adaptive compression with a specified tolerance
    ADAPTIVE(f64),
    /// Rank based compression with specified rank
    RANK(usize),
}

/// Largest admissible rank for a `nrows` x `ncols` image.
pub fn max_rank(nrows: usize, ncols: usize) -> usize {
    nrows.min(ncols)
}

/// Initial rank for a `nrows` x `ncols` image, capped by [`DEFAULT_RANK`].
pub fn default_rank(nrows: usize, ncols: usize) -> usize {
    DEFAULT_RANK.min(max_rank(nrows, ncols))
}

pub use compression::{compress_image, compress_image_with, reconstruct, CompressedImage};
pub use metrics::{metrics, CompressionMetrics};
pub use permutation::*;
pub use pivoted_qr::PivotedQR;
pub use qr::{QRTraits, QR};
pub use random_matrix::RandomMatrix;
pub use types::{QRCompressionError, RelDiff, Result};
