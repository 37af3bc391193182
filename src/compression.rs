//! Low-rank image compression by truncated pivoted QR.
//!
//! A grayscale image is a real $h\times w$ matrix $A$. With $AP = QR$ a
//! rank $k$ approximation is obtained as $\hat{A} = Q_k R_k P^T$, where $Q_k$
//! holds the first $k$ columns of $Q$ and $R_k$ the first $k$ rows of $R$.
//! Values of $\hat{A}$ are not clamped to any pixel range.

use crate::metrics::{metrics, CompressionMetrics};
use crate::permutation::{validate_permutation, ApplyPermutationToMatrix, MatrixPermutationMode};
use crate::pivoted_qr::PivotedQR;
use crate::qr::{QRTraits, QR};
use crate::types::{QRCompressionError, RelDiff, Result, Scalar};
use crate::CompressionType;
use log::debug;
use ndarray::{s, Array2, ArrayView1, ArrayView2};

/// A compressed image together with its storage metrics.
#[derive(Clone, Debug)]
pub struct CompressedImage<A: Scalar> {
    /// The rank `rank` approximation, same shape as the input.
    pub reconstruction: Array2<A>,
    /// Number of retained components.
    pub rank: usize,
    pub metrics: CompressionMetrics,
}

impl<A: Scalar + RelDiff<A = A>> CompressedImage<A> {
    /// Relative Frobenius norm error with respect to `original`.
    pub fn relative_error(&self, original: ArrayView2<A>) -> A::Real {
        A::rel_diff_fro(self.reconstruction.view(), original)
    }
}

/// Reconstruct a rank `rank` approximation from the factors of a pivoted QR.
///
/// `ind` maps positions in $QR$ to columns of the original matrix, so column
/// `j` of $Q_k R_k$ is written to column `ind[j]` of the result.
pub fn reconstruct<A: Scalar>(
    q: ArrayView2<A>,
    r: ArrayView2<A>,
    ind: ArrayView1<usize>,
    rank: usize,
) -> Result<Array2<A>> {
    if q.ncols() != r.nrows() {
        return Err(QRCompressionError::ShapeMismatch(format!(
            "Q has {} columns but R has {} rows",
            q.ncols(),
            r.nrows()
        )));
    }
    if r.ncols() != ind.len() {
        return Err(QRCompressionError::ShapeMismatch(format!(
            "R has {} columns but the permutation has length {}",
            r.ncols(),
            ind.len()
        )));
    }
    validate_permutation(&ind, r.ncols())?;

    let max = q.ncols();
    if rank == 0 || rank > max {
        return Err(QRCompressionError::RankOutOfRange { rank, max });
    }

    let permuted = q.slice(s![.., 0..rank]).dot(&r.slice(s![0..rank, ..]));

    Ok(permuted.apply_permutation(ind, MatrixPermutationMode::COLINV))
}

/// Compress `mat` to rank `rank`.
///
/// `rank` must satisfy `1 <= rank <= min(nrows, ncols)`.
pub fn compress_image<A: PivotedQR>(mat: ArrayView2<A>, rank: usize) -> Result<CompressedImage<A>> {
    let qr = QR::<A>::compute_from(mat)?;
    let reconstruction = reconstruct(qr.q.view(), qr.r.view(), qr.ind.view(), rank)?;
    let metrics = metrics(mat.nrows(), mat.ncols(), rank)?;

    debug!(
        "Compressed {}x{} image to rank {}: {} of {} values ({:.2}% saved)",
        mat.nrows(),
        mat.ncols(),
        rank,
        metrics.compressed_size,
        metrics.original_size,
        metrics.ratio_percent()
    );

    Ok(CompressedImage {
        reconstruction,
        rank,
        metrics,
    })
}

/// Compress `mat` with either a fixed rank or a relative tolerance on the
/// diagonal of $R$.
pub fn compress_image_with<A: PivotedQR>(
    mat: ArrayView2<A>,
    compression_type: CompressionType,
) -> Result<CompressedImage<A>> {
    let qr = QR::<A>::compute_from(mat)?.compress(compression_type)?;
    let rank = qr.rank();
    debug!("{:?} selected rank {}", compression_type, rank);

    let metrics = metrics(mat.nrows(), mat.ncols(), rank)?;

    Ok(CompressedImage {
        reconstruction: qr.to_mat(),
        rank,
        metrics,
    })
}
