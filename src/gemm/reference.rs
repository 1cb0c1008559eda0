//! Scalar triple-loop GEMM, the correctness oracle for the SIMD kernels.

/// Computes `C += A × B` with the textbook i-j-k loop.
///
/// Every product is added straight into `c[i * n + j]`, left to right over
/// the reduction index, with no blocking or compensated summation.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into
///
/// # Panics
///
/// Panics if the slice lengths don't match `m`, `n`, `k`.
pub fn gemm_reference(a: &[f32], b: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "Matrix A has incorrect dimensions");
    assert_eq!(b.len(), k * n, "Matrix B has incorrect dimensions");
    assert_eq!(c.len(), m * n, "Matrix C has incorrect dimensions");

    for i in 0..m {
        for j in 0..n {
            for t in 0..k {
                c[i * n + j] += a[i * k + t] * b[t * n + j];
            }
        }
    }
}
