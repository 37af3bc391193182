use criterion::{criterion_group, criterion_main, Criterion};
use qr_image_compression::prelude::*;

fn bench_compression(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mat = f64::random_approximate_low_rank_matrix((256, 256), 1.0, 1E-10, &mut rng).unwrap();

    c.bench_function("pivoted_qr_256x256", |b| {
        b.iter(|| QR::<f64>::compute_from(mat.view()).unwrap())
    });

    let qr = QR::<f64>::compute_from(mat.view()).unwrap();
    c.bench_function("reconstruct_256x256_rank32", |b| {
        b.iter(|| reconstruct(qr.q.view(), qr.r.view(), qr.ind.view(), 32).unwrap())
    });

    c.bench_function("compress_image_256x256_rank32", |b| {
        b.iter(|| compress_image(mat.view(), 32).unwrap())
    });
}

criterion_group!(benches, bench_compression);
criterion_main!(benches);
