//! Data Structures and traits for QR Decompositions
//!
//! The pivoted QR Decomposition of a matrix $A\in\mathbb{R}^{m\times n}$ is
//! defined as $AP = QR$, where $P$ is a permutation matrix, $Q\in\mathbb{R}^{m\times k}$
//! is a matrix with orthogonal columns, satisfying $Q^TQ = I$, and $R\in\mathbb{R}^{k\times n}$
//! is an upper triangular matrix with diagonal elements $r_{ii}$ satisfying $|r_{11}|\geq |r_{22}|\geq \dots$.
//! Here $k=\min{m, n}$. The matrix $P$ is defined by an index vector `ind` in such a way that if ind\[j\] = k then
//! the jth column of $P$ is 1 at the position P\[k, j\] and 0 otherwise. In other words the matrix $P$ permutes the
//! $k$th column of $A$ to the $j$th column.
//!
//! The QR Decomposition can be compressed, either by specifying a rank or
//! by specifying a relative tolerance. Let $AP=QR$. We compress the QR Decomposition by only keeping the first
//! $\ell$ columns ($1 \leq \ell \leq k$) of $Q$ and correspondingly only keeping the first $\ell$ rows of $R$.
//! We can alternatively determine $\ell$ by a tolerance tol as the first index with
//! $|r_{\ell, \ell}| / |r_{1, 1}| < tol$.

use crate::permutation::{ApplyPermutationToMatrix, MatrixPermutationMode};
use crate::pivoted_qr::PivotedQR;
use crate::types::{QRCompressionError, Result, Scalar};
use crate::CompressionType;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use num::ToPrimitive;

#[derive(Clone, Debug)]
pub struct QR<A: Scalar> {
    /// The Q matrix from the QR Decomposition
    pub q: Array2<A>,
    /// The R matrix from the QR Decomposition
    pub r: Array2<A>,
    /// An index array. If ind\[j\] = k then the
    /// jth column of Q * R is identical to the
    /// kth column of the original matrix A.
    pub ind: Array1<usize>,
}

pub trait QRTraits {
    type A: Scalar;

    /// Number of rows
    fn nrows(&self) -> usize {
        self.get_q().nrows()
    }

    /// Number of columns
    fn ncols(&self) -> usize {
        self.get_r().ncols()
    }

    /// Rank of the QR Decomposition
    fn rank(&self) -> usize {
        self.get_q().ncols()
    }

    /// Diagonal of R. Its moduli are non-increasing.
    fn diag_r(&self) -> Array1<Self::A> {
        self.get_r().diag().to_owned()
    }

    /// Convert the QR decomposition to a matrix.
    ///
    /// The product $QR$ is formed in permuted column order and its columns are
    /// then scattered back to their original positions.
    fn to_mat(&self) -> Array2<Self::A> {
        self.get_q()
            .dot(&self.get_r())
            .apply_permutation(self.get_ind(), MatrixPermutationMode::COLINV)
    }

    /// Compress by giving a target rank
    ///
    /// Fails with [`QRCompressionError::RankOutOfRange`] unless
    /// `1 <= max_rank <= self.rank()`.
    fn compress_qr_rank(&self, max_rank: usize) -> Result<QR<Self::A>> {
        let (q, r, ind) = (self.get_q(), self.get_r(), self.get_ind());

        if max_rank == 0 || max_rank > q.ncols() {
            return Err(QRCompressionError::RankOutOfRange {
                rank: max_rank,
                max: q.ncols(),
            });
        }

        debug!("Truncating QR of rank {} to rank {}", q.ncols(), max_rank);

        let q = q.slice(s![.., 0..max_rank]);
        let r = r.slice(s![0..max_rank, ..]);

        Ok(QR {
            q: q.into_owned(),
            r: r.into_owned(),
            ind: ind.into_owned(),
        })
    }

    /// Compress by specifying a relative tolerance
    fn compress_qr_tolerance(&self, tol: f64) -> Result<QR<Self::A>> {
        if !((0.0..1.0).contains(&tol)) {
            return Err(QRCompressionError::InvalidTolerance(tol));
        }

        let r = self.get_r();
        let r00 = r[[0, 0]];

        let pos = r.diag().iter().position(|&item| {
            (item / r00)
                .abs()
                .to_f64()
                .map_or(false, |ratio| ratio < tol)
        });

        match pos {
            Some(index) => self.compress_qr_rank(index),
            None => Err(QRCompressionError::CompressionError),
        }
    }

    /// Compress the QR decomposition by rank or tolerance
    fn compress(&self, compression_type: CompressionType) -> Result<QR<Self::A>> {
        match compression_type {
            CompressionType::ADAPTIVE(tol) => self.compress_qr_tolerance(tol),
            CompressionType::RANK(rank) => self.compress_qr_rank(rank),
        }
    }

    /// Compute the QR decomposition from a given array
    fn compute_from(arr: ArrayView2<Self::A>) -> Result<QR<Self::A>>;

    /// Return the Q matrix
    fn get_q(&self) -> ArrayView2<Self::A>;

    /// Return the R matrix
    fn get_r(&self) -> ArrayView2<Self::A>;

    /// Return the index vector
    fn get_ind(&self) -> ArrayView1<usize>;
}

impl<A: PivotedQR> QRTraits for QR<A> {
    type A = A;

    fn get_q(&self) -> ArrayView2<Self::A> {
        self.q.view()
    }

    fn get_r(&self) -> ArrayView2<Self::A> {
        self.r.view()
    }

    fn get_ind(&self) -> ArrayView1<usize> {
        self.ind.view()
    }

    fn compute_from(arr: ArrayView2<Self::A>) -> Result<QR<Self::A>> {
        A::pivoted_qr(arr)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::random_matrix::RandomMatrix;
    use crate::types::RelDiff;
    use ndarray::{array, Axis};

    macro_rules! qr_compression_by_rank_tests {

        ($($name:ident: $scalar:ty, $dim:expr, $tol:expr,)*) => {

            $(

        #[test]
        fn $name() {
            let m = $dim.0;
            let n = $dim.1;
            let rank: usize = 30;

            let sigma_max = 1.0;
            let sigma_min = 1E-10;
            let mut rng = rand::thread_rng();
            let mat = <$scalar>::random_approximate_low_rank_matrix((m, n), sigma_max, sigma_min, &mut rng).unwrap();

            let qr = QR::<$scalar>::compute_from(mat.view()).unwrap().compress(CompressionType::RANK(rank)).unwrap();

            // Compare with original matrix

            assert!(qr.q.len_of(Axis(1)) == rank);
            assert!(qr.r.len_of(Axis(0)) == rank);
            assert!(<$scalar>::rel_diff_fro(qr.to_mat().view(), mat.view()) < $tol);

        }

            )*

        }
    }

    macro_rules! qr_compression_by_tol_tests {

        ($($name:ident: $scalar:ty, $dim:expr, $tol:expr,)*) => {

            $(

        #[test]
        fn $name() {
            let m = $dim.0;
            let n = $dim.1;

            let sigma_max = 1.0;
            let sigma_min = 1E-10;
            let mut rng = rand::thread_rng();
            let mat = <$scalar>::random_approximate_low_rank_matrix((m, n), sigma_max, sigma_min, &mut rng).unwrap();

            let qr = QR::<$scalar>::compute_from(mat.view()).unwrap().compress(CompressionType::ADAPTIVE($tol)).unwrap();

            // Compare with original matrix

            assert!(<$scalar>::rel_diff_fro(qr.to_mat().view(), mat.view()) < 5.0 * $tol);

            // Make sure new rank is smaller than original rank

            assert!(qr.q.ncols() < m.min(n));
        }

            )*

        }
    }

    qr_compression_by_rank_tests! {
        test_qr_compression_by_rank_f32_thin: f32, (100, 50), 1E-4,
        test_qr_compression_by_rank_f64_thin: f64, (100, 50), 1E-4,
        test_qr_compression_by_rank_f32_thick: f32, (50, 100), 1E-4,
        test_qr_compression_by_rank_f64_thick: f64, (50, 100), 1E-4,
    }

    qr_compression_by_tol_tests! {
        test_qr_compression_by_tol_f32_thin: f32, (100, 50), 1E-4,
        test_qr_compression_by_tol_f64_thin: f64, (100, 50), 1E-4,
        test_qr_compression_by_tol_f32_thick: f32, (50, 100), 1E-4,
        test_qr_compression_by_tol_f64_thick: f64, (50, 100), 1E-4,
    }

    #[test]
    fn test_full_rank_to_mat_restores_matrix() {
        let mat = array![[3.0, 1.0, 0.0, 2.0], [0.0, 5.0, 1.0, 1.0], [2.0, 0.0, 7.0, 1.0]];
        let qr = QR::<f64>::compute_from(mat.view()).unwrap();

        assert!(f64::rel_diff_fro(qr.to_mat().view(), mat.view()) < 1E-14);
    }

    #[test]
    fn test_diag_r_is_non_increasing() {
        let mut rng = rand::thread_rng();
        let mut mat = f64::random_gaussian((40, 30), &mut rng);
        for (index, mut col) in mat.axis_iter_mut(Axis(1)).enumerate() {
            col *= (index as f64 + 1.0).powi(2);
        }

        let diag = QR::<f64>::compute_from(mat.view()).unwrap().diag_r();
        assert_eq!(diag.len(), 30);
        for pair in diag.windows(2) {
            assert!(pair[1].abs() <= pair[0].abs() * (1.0 + 1E-6));
        }
    }

    #[test]
    fn test_compress_rank_out_of_range() {
        let qr = QR::<f64>::compute_from(Array2::<f64>::eye(4).view()).unwrap();

        assert_eq!(
            qr.compress_qr_rank(0).err(),
            Some(QRCompressionError::RankOutOfRange { rank: 0, max: 4 })
        );
        assert_eq!(
            qr.compress(CompressionType::RANK(5)).err(),
            Some(QRCompressionError::RankOutOfRange { rank: 5, max: 4 })
        );
        assert_eq!(qr.compress_qr_rank(4).unwrap().rank(), 4);
    }

    #[test]
    fn test_compress_invalid_tolerance() {
        let qr = QR::<f64>::compute_from(Array2::<f64>::eye(3).view()).unwrap();

        assert_eq!(
            qr.compress_qr_tolerance(1.0).err(),
            Some(QRCompressionError::InvalidTolerance(1.0))
        );
        assert_eq!(
            qr.compress_qr_tolerance(-0.5).err(),
            Some(QRCompressionError::InvalidTolerance(-0.5))
        );
    }

    #[test]
    fn test_incompressible_to_tolerance() {
        // All diagonal entries of R have modulus one.
        let qr = QR::<f64>::compute_from(Array2::<f64>::eye(3).view()).unwrap();

        assert_eq!(
            qr.compress(CompressionType::ADAPTIVE(1E-3)).err(),
            Some(QRCompressionError::CompressionError)
        );
    }
}
