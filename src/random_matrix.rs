//! Generation of random test matrices

use crate::pivoted_qr::PivotedQR;
use crate::types::{QRCompressionError, Result};
use ndarray::{Array, Array2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub trait RandomMatrix
where
    Self: PivotedQR,
{
    /// Generate a random Gaussian matrix.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self>;

    /// Convert a double precision value into `Self`.
    fn from_f64(value: f64) -> Self;

    /// Generate a random matrix with orthogonal rows or columns.
    ///
    /// This function creates a normally distributed (m, n) random matrix,
    /// orthogonalizes it and returns the resulting orthogonal matrix.
    ///
    /// If m > n then the returned matrix has orthogonal columns. If n > m
    /// the returned matrix has orthogonalized rows.
    fn random_orthogonal_matrix<R: Rng>(
        dimension: (usize, usize),
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        let mut m = dimension.0;
        let mut n = dimension.1;

        // Always ensure that we form the QR decomp for a long and skinny matrix
        if dimension.1 > dimension.0 {
            std::mem::swap(&mut m, &mut n);
        }

        let mat = Self::random_gaussian((m, n), rng);
        let q = Self::pivoted_qr(mat.view())?.q;

        // If we originally had more columns than rows, transpose again.
        if dimension.1 > dimension.0 {
            Ok(q.t().to_owned())
        } else {
            Ok(q)
        }
    }

    /// Generate a random approximate low-rank matrix.
    ///
    /// This function generates a random approximate low-rank matrix
    /// with singular values logarithmically distributed between
    /// `sigma_max` and `sigma_min`.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `sigma_max`: Maximum singular value.
    /// * `sigma_min`: Minimum singular value.
    /// * `rng`: The random number generator to use.
    fn random_approximate_low_rank_matrix<R: Rng>(
        dimension: (usize, usize),
        sigma_max: f64,
        sigma_min: f64,
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        assert!(
            sigma_min < sigma_max,
            "`sigma_min` must be smaller than `sigma_max`"
        );
        assert!(sigma_min > 0.0, "`sigma_min` must be positive.");

        let min_dim = std::cmp::min(dimension.0, dimension.1);

        let u = Self::random_orthogonal_matrix((dimension.0, min_dim), rng)?;
        let vt = Self::random_orthogonal_matrix((min_dim, dimension.1), rng)?;
        let singvals = Array::geomspace(sigma_min, sigma_max, min_dim)
            .ok_or(QRCompressionError::InvalidDimension {
                nrows: dimension.0,
                ncols: dimension.1,
            })?
            .map(|&item| <Self as RandomMatrix>::from_f64(item));
        let sigma = Array2::from_diag(&singvals);
        Ok(u.dot(&sigma.dot(&vt)))
    }
}

macro_rules! random_matrix_impl {
    ($scalar:ty) => {
        impl RandomMatrix for $scalar {
            fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<$scalar> {
                Array2::from_shape_simple_fn(dimension, || {
                    let value: $scalar = StandardNormal.sample(&mut *rng);
                    value
                })
            }

            fn from_f64(value: f64) -> Self {
                value as $scalar
            }
        }
    };
}

random_matrix_impl!(f32);
random_matrix_impl!(f64);

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray_linalg::SVD;

    #[test]
    fn test_orthogonal_rows_for_wide_matrix() {
        let mut rng = rand::thread_rng();
        let mat = f64::random_orthogonal_matrix((5, 12), &mut rng).unwrap();

        assert_eq!(mat.dim(), (5, 12));
        let identity = Array2::<f64>::eye(5);
        let diff = mat.dot(&mat.t()) - &identity;
        assert!(diff.iter().all(|item| item.abs() < 1E-12));
    }

    #[test]
    fn test_low_rank_matrix_has_prescribed_singular_values() {
        let mut rng = rand::thread_rng();
        let mat = f64::random_approximate_low_rank_matrix((20, 10), 1.0, 1E-6, &mut rng).unwrap();

        let (_, sigma, _) = mat.svd(false, false).unwrap();
        assert!((sigma[0] - 1.0).abs() < 1E-10);
        assert!((sigma[9] - 1E-6).abs() < 1E-10);
    }
}
