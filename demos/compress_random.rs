//! Compress a synthetic 8-bit grayscale image for a sweep of ranks.
//!
//! Usage: `cargo run --example compress_random -- [rows] [cols] [rank ...]`

use log::{info, warn};
use ndarray::Array2;
use qr_image_compression::prelude::*;
use qr_image_compression::default_rank;
use std::env;

/// A smooth gradient with a few bright discs, plus noise.
fn synthetic_image(nrows: usize, ncols: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    let noise = f64::random_gaussian((nrows, ncols), &mut rng);

    Array2::from_shape_fn((nrows, ncols), |(i, j)| {
        let x = j as f64 / ncols as f64;
        let y = i as f64 / nrows as f64;
        let mut value = 60.0 + 120.0 * x * y;
        for &(cx, cy, radius) in &[(0.3, 0.3, 0.1), (0.7, 0.4, 0.15), (0.5, 0.8, 0.08)] {
            if (x - cx).powi(2) + (y - cy).powi(2) < radius * radius {
                value += 70.0;
            }
        }
        (value + 4.0 * noise[[i, j]]).max(0.0).min(255.0).round()
    })
}

/// Display conversion, outside the library.
fn to_pixels(mat: &Array2<f64>) -> Array2<u8> {
    mat.map(|&item| item.max(0.0).min(255.0) as u8)
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<usize> = env::args()
        .skip(1)
        .filter_map(|arg| match arg.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring argument {:?}", arg);
                None
            }
        })
        .collect();

    let nrows = args.first().copied().unwrap_or(240);
    let ncols = args.get(1).copied().unwrap_or(320);
    let ranks = if args.len() > 2 {
        args[2..].to_vec()
    } else {
        vec![1, 5, 10, 25, default_rank(nrows, ncols), nrows.min(ncols)]
    };

    let image = synthetic_image(nrows, ncols);
    info!("Image of {}x{} pixels", nrows, ncols);

    for rank in ranks {
        match compress_image(image.view(), rank) {
            Ok(compressed) => {
                let pixels = to_pixels(&compressed.reconstruction);
                let changed = pixels
                    .iter()
                    .zip(image.iter())
                    .filter(|&(&approx, &orig)| approx as f64 != orig)
                    .count();
                info!(
                    "k = {:4}: stored {:8} of {:8} values, kept {:5.1}%, ratio {:7.2}%, rel. error {:.3e}, {} pixels differ",
                    rank,
                    compressed.metrics.compressed_size,
                    compressed.metrics.original_size,
                    100.0 * compressed.metrics.retained_fraction(),
                    compressed.metrics.ratio_percent(),
                    compressed.relative_error(image.view()),
                    changed
                );
            }
            Err(err) => warn!("k = {}: {}", rank, err),
        }
    }

    match compress_image_with(image.view(), CompressionType::ADAPTIVE(1E-2)) {
        Ok(compressed) => info!(
            "Tolerance 1e-2 selects k = {} (ratio {:.2}%)",
            compressed.rank,
            compressed.metrics.ratio_percent()
        ),
        Err(err) => warn!("Adaptive compression failed: {}", err),
    }
}
