//! This module implements QR with column pivoting by calling into the
//! corresponding Lapack routines. Pivoted QR is not implemented in
//! ndarray-linalg, making this module necessary.
//!
//! The factorization is computed by `?geqp3`, which chooses at every step the
//! remaining column of largest norm. The diagonal of $R$ is therefore
//! non-increasing in modulus. $Q$ is then formed explicitly in reduced form
//! with `?orgqr`.

use crate::qr::QR;
use crate::types::{QRCompressionError, Result};
use ndarray::ArrayView2;
use ndarray_linalg::{Lapack, Scalar};

pub trait PivotedQR
where
    Self: Scalar + Lapack,
{
    /// Compute the pivoted QR decomposition $AP = QR$ of `arr`.
    ///
    /// $Q$ has $\min(m, n)$ orthonormal columns and $R$ is upper triangular of
    /// dimension $\min(m, n)\times n$.
    fn pivoted_qr(arr: ArrayView2<Self>) -> Result<QR<Self>>;
}

/// Reject empty matrices.
pub(crate) fn check_dimension(nrows: usize, ncols: usize) -> Result<()> {
    if nrows == 0 || ncols == 0 {
        return Err(QRCompressionError::InvalidDimension { nrows, ncols });
    }
    Ok(())
}

mod imp {

    use super::check_dimension;
    use crate::qr::QR;
    use crate::types::{QRCompressionError, Result};
    use log::{debug, trace};
    use ndarray::{s, Array1, Array2, ArrayView2, ShapeBuilder};
    use ndarray_linalg::{IntoTriangular, UPLO};
    use num::ToPrimitive;

    macro_rules! impl_qr_pivot {
        ($scalar:ty, $qp3:ident, $orgqr:ident) => {
            impl super::PivotedQR for $scalar {
                fn pivoted_qr(arr: ArrayView2<Self>) -> Result<QR<Self>> {
                    let m = arr.nrows();
                    let n = arr.ncols();
                    check_dimension(m, n)?;

                    if let Some(((row, col), _)) =
                        arr.indexed_iter().find(|(_, item)| !item.is_finite())
                    {
                        return Err(QRCompressionError::NonFiniteInput { row, col });
                    }

                    let k = m.min(n);
                    debug!("Pivoted QR of {}x{} matrix ({})", m, n, stringify!($scalar));

                    // Lapack expects Fortran order.
                    let mut mat = Array2::<$scalar>::zeros((m, n).f());
                    mat.assign(&arr);

                    let mut tau = vec![0.0 as $scalar; k];
                    let mut jpvt = vec![0_i32; n];

                    {
                        let data = mat
                            .as_slice_memory_order_mut()
                            .ok_or(QRCompressionError::LayoutError)?;

                        let (m, n) = (m as i32, n as i32);
                        let mut info = 0;
                        let mut work_size = [0.0 as $scalar];

                        unsafe {
                            lapack::$qp3(
                                m, n, data, m, &mut jpvt, &mut tau, &mut work_size, -1, &mut info,
                            );
                        }
                        check_info(stringify!($qp3), info)?;

                        let lwork = workspace_len(work_size[0].to_usize());
                        trace!("{}: workspace of {} elements", stringify!($qp3), lwork);
                        let mut work = vec![0.0 as $scalar; lwork];
                        unsafe {
                            lapack::$qp3(
                                m, n, data, m, &mut jpvt, &mut tau, &mut work, lwork as i32, &mut info,
                            );
                        }
                        check_info(stringify!($qp3), info)?;
                    }

                    // The upper triangle now holds R, the lower part the Householder vectors.
                    let r_mat = mat
                        .slice(s![0..k, ..])
                        .to_owned()
                        .into_triangular(UPLO::Upper);

                    {
                        let data = mat
                            .as_slice_memory_order_mut()
                            .ok_or(QRCompressionError::LayoutError)?;

                        let (m, k) = (m as i32, k as i32);
                        let mut info = 0;
                        let mut work_size = [0.0 as $scalar];

                        unsafe {
                            lapack::$orgqr(m, k, k, data, m, &tau, &mut work_size, -1, &mut info);
                        }
                        check_info(stringify!($orgqr), info)?;

                        let lwork = workspace_len(work_size[0].to_usize());
                        let mut work = vec![0.0 as $scalar; lwork];
                        unsafe {
                            lapack::$orgqr(m, k, k, data, m, &tau, &mut work, lwork as i32, &mut info);
                        }
                        check_info(stringify!($orgqr), info)?;
                    }

                    let q_mat = mat.slice(s![.., 0..k]).to_owned();

                    // Lapack counts pivots from one.
                    let ind = jpvt
                        .iter()
                        .map(|&item| (item - 1) as usize)
                        .collect::<Array1<usize>>();

                    Ok(QR {
                        q: q_mat,
                        r: r_mat,
                        ind,
                    })
                }
            }
        };
    }

    fn check_info(routine: &'static str, info: i32) -> Result<()> {
        match info {
            0 => Ok(()),
            _ => Err(QRCompressionError::Lapack { routine, info }),
        }
    }

    fn workspace_len(query: Option<usize>) -> usize {
        query.unwrap_or(1).max(1)
    }

    impl_qr_pivot!(f64, dgeqp3, dorgqr);
    impl_qr_pivot!(f32, sgeqp3, sorgqr);
}
