//! Storage metrics of a truncated QR representation.
//!
//! A rank $k$ approximation of an $h\times w$ image is stored as
//! $Q_k\in\mathbb{R}^{h\times k}$, $R_k\in\mathbb{R}^{k\times w}$ and the
//! column permutation of length $w$. Element counts are compared to the $hw$
//! pixels of the original image, independent of the precision of either.

use crate::types::{QRCompressionError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionMetrics {
    /// Number of elements of the original matrix, $hw$.
    pub original_size: usize,
    /// Number of stored values, $hk + kw + w$.
    pub compressed_size: usize,
}

impl CompressionMetrics {
    /// Fraction of data eliminated, $1 - $ compressed / original.
    ///
    /// Negative if the factors need more storage than the image itself.
    pub fn ratio(&self) -> f64 {
        1.0 - self.retained_fraction()
    }

    /// Compression ratio in percent.
    pub fn ratio_percent(&self) -> f64 {
        100.0 * self.ratio()
    }

    /// Fraction of data kept, compressed / original.
    pub fn retained_fraction(&self) -> f64 {
        self.compressed_size as f64 / self.original_size as f64
    }
}

/// Compute the storage metrics for a rank `rank` approximation of a
/// `nrows` x `ncols` matrix.
pub fn metrics(nrows: usize, ncols: usize, rank: usize) -> Result<CompressionMetrics> {
    if nrows == 0 || ncols == 0 {
        return Err(QRCompressionError::InvalidDimension { nrows, ncols });
    }

    Ok(CompressionMetrics {
        original_size: nrows * ncols,
        compressed_size: nrows * rank + rank * ncols + ncols,
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_square_example() {
        let result = metrics(10, 10, 5).unwrap();

        assert_eq!(result.original_size, 100);
        assert_eq!(result.compressed_size, 110);
        assert!((result.ratio() + 0.1).abs() < 1E-12);
        assert!((result.retained_fraction() - 1.1).abs() < 1E-12);
    }

    #[test]
    fn test_large_image_compresses() {
        let result = metrics(512, 768, 50).unwrap();

        assert_eq!(result.original_size, 393_216);
        assert_eq!(result.compressed_size, 512 * 50 + 50 * 768 + 768);
        assert!(result.ratio() > 0.8);
        assert!((result.ratio_percent() - 100.0 * result.ratio()).abs() < 1E-12);
    }

    #[test]
    fn test_compressed_size_strictly_increasing_in_rank() {
        let (h, w) = (37, 23);
        let sizes: Vec<usize> = (1..=h.min(w))
            .map(|k| metrics(h, w, k).unwrap().compressed_size)
            .collect();

        assert!(sizes.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_empty_dimension_fails() {
        assert_eq!(
            metrics(0, 10, 1),
            Err(QRCompressionError::InvalidDimension { nrows: 0, ncols: 10 })
        );
        assert_eq!(
            metrics(10, 0, 1),
            Err(QRCompressionError::InvalidDimension { nrows: 10, ncols: 0 })
        );
    }
}
