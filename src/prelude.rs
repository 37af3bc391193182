//! Collect all traits and other exports here.

pub use crate::compression::{compress_image, compress_image_with, reconstruct, CompressedImage};
pub use crate::metrics::{metrics, CompressionMetrics};
pub use crate::permutation::{ApplyPermutationToMatrix, MatrixPermutationMode};
pub use crate::pivoted_qr::PivotedQR;
pub use crate::qr::{QRTraits, QR};
pub use crate::random_matrix::RandomMatrix;
pub use crate::types::{QRCompressionError, RelDiff, Result};
pub use crate::CompressionType;
