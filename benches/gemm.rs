//! GEMM kernel benchmark comparison
//!
//! Compares the reference, vectorized, blocked and parallel blocked kernels
//! against ndarray's `dot` across square matrix sizes.
//!
//! # Usage:
//! ```bash
//! # Run all kernel benchmarks
//! cargo bench --bench gemm
//!
//! # Run a single size
//! cargo bench --bench gemm -- gemm_256
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use rand::prelude::*;
use std::hint::black_box;

use tilegemm::{multiply, Kernel, Matrix};

fn create_matrix(n: usize, rng: &mut StdRng) -> Matrix {
    let mut m = Matrix::new(n, n).unwrap();
    m.random_with(rng);
    m
}

fn to_ndarray(m: &Matrix) -> Array2<f32> {
    Array2::from_shape_vec(m.shape(), m.as_slice().to_vec()).unwrap()
}

fn bench_gemm_by_size(c: &mut Criterion) {
    let sizes = [64, 128, 256, 512];

    for n in sizes {
        let mut group = c.benchmark_group(format!("gemm_{n}"));
        group.sample_size(20);
        group.throughput(Throughput::Elements((2 * n * n * n) as u64));

        let mut rng = StdRng::seed_from_u64(42);
        let a = create_matrix(n, &mut rng);
        let b = create_matrix(n, &mut rng);
        let mut bt = b.clone();
        bt.transpose().unwrap();
        let mut out = Matrix::new(n, n).unwrap();

        for kernel in Kernel::ALL {
            // The scalar kernel dominates run time past this size.
            if kernel == Kernel::Reference && n > 256 {
                continue;
            }
            let rhs = if kernel.expects_transposed_rhs() { &bt } else { &b };

            group.bench_with_input(BenchmarkId::new(kernel.name(), n), &n, |bench, _| {
                bench.iter(|| {
                    out.clear();
                    multiply(kernel, black_box(&mut out), black_box(&a), black_box(rhs)).unwrap();
                })
            });
        }

        let a_nd = to_ndarray(&a);
        let b_nd = to_ndarray(&b);
        group.bench_with_input(BenchmarkId::new("ndarray", n), &n, |bench, _| {
            bench.iter(|| black_box(a_nd.dot(black_box(&b_nd))))
        });

        group.finish();
    }
}

criterion_group!(benches, bench_gemm_by_size);
criterion_main!(benches);
