//! SIMD dot-product GEMM on a pre-transposed right-hand operand.
//!
//! With `B` supplied as `Bᵀ` (n × k), output element `(i, j)` is the dot
//! product of two contiguous rows: row `i` of `A` and row `j` of `Bᵀ`. The
//! reduction runs in chunks of [`CHUNK`] values held in four `F32x4`
//! registers, with one running sum register per lane group.

use crate::simd::{F32x4, SimdVec, LANE_COUNT};

/// Reduction values consumed per iteration: four vectors of four lanes.
pub const CHUNK: usize = 4 * LANE_COUNT;

/// Computes `C += A × B` given `bt = Bᵀ`.
///
/// The part of the reduction that does not fill a whole [`CHUNK`] is added
/// by a scalar loop after the vector sums, so no element is dropped for any
/// `k`.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `bt` - Matrix Bᵀ (n × k), row-major
/// * `c` - Matrix C (m × n), row-major, accumulated into
///
/// # Panics
///
/// Panics if the slice lengths don't match `m`, `n`, `k`.
pub fn gemm_vectorized(a: &[f32], bt: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "Matrix A has incorrect dimensions");
    assert_eq!(bt.len(), n * k, "Matrix Bt has incorrect dimensions");
    assert_eq!(c.len(), m * n, "Matrix C has incorrect dimensions");

    let k_main = k - k % CHUNK;

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];

        for j in 0..n {
            let bt_row = &bt[j * k..(j + 1) * k];

            let mut s0 = F32x4::zeros();
            let mut s1 = F32x4::zeros();
            let mut s2 = F32x4::zeros();
            let mut s3 = F32x4::zeros();

            for kk in (0..k_main).step_by(CHUNK) {
                // SAFETY: kk + CHUNK <= k_main <= k, and both rows hold k values.
                let (a0, a1, a2, a3, b0, b1, b2, b3) = unsafe {
                    let pa = a_row.as_ptr().add(kk);
                    let pb = bt_row.as_ptr().add(kk);
                    (
                        F32x4::load(pa),
                        F32x4::load(pa.add(4)),
                        F32x4::load(pa.add(8)),
                        F32x4::load(pa.add(12)),
                        F32x4::load(pb),
                        F32x4::load(pb.add(4)),
                        F32x4::load(pb.add(8)),
                        F32x4::load(pb.add(12)),
                    )
                };

                let m0 = a0 * b0;
                let m1 = a1 * b1;
                let m2 = a2 * b2;
                let m3 = a3 * b3;

                s0 += m0;
                s1 += m1;
                s2 += m2;
                s3 += m3;
            }

            let sum = (s0 + s1) + (s2 + s3);
            let lanes = sum.to_array();

            let out = &mut c[i * n + j];
            *out += lanes[0];
            *out += lanes[1];
            *out += lanes[2];
            *out += lanes[3];

            for t in k_main..k {
                *out += a_row[t] * bt_row[t];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemm::reference::gemm_reference;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vec(len: usize, rng: &mut StdRng) -> Vec<f32> {
        (0..len).map(|_| rng.random_range(0..10u32) as f32).collect()
    }

    fn transpose(src: &[f32], rows: usize, cols: usize) -> Vec<f32> {
        let mut dst = vec![0.0; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                dst[j * rows + i] = src[i * cols + j];
            }
        }
        dst
    }

    fn check_against_reference(m: usize, n: usize, k: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let a = random_vec(m * k, &mut rng);
        let b = random_vec(k * n, &mut rng);
        let bt = transpose(&b, k, n);

        let mut c_ref = vec![0.0; m * n];
        let mut c_vec = vec![0.0; m * n];
        gemm_reference(&a, &b, &mut c_ref, m, n, k);
        gemm_vectorized(&a, &bt, &mut c_vec, m, n, k);

        for idx in 0..m * n {
            assert!(
                (c_ref[idx] - c_vec[idx]).abs() < 1e-3,
                "Mismatch at {idx} for {m}x{n}x{k}: reference={}, vectorized={}",
                c_ref[idx],
                c_vec[idx]
            );
        }
    }

    #[test]
    fn test_vectorized_single_chunk() {
        // Row of ones against a row 0..16: the dot product is 0 + 1 + ... + 15.
        let a = vec![1.0; 16];
        let bt: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let mut c = [0.0];

        gemm_vectorized(&a, &bt, &mut c, 1, 1, 16);
        assert_eq!(c[0], 120.0);
    }

    #[test]
    fn test_vectorized_matches_reference_multiple_of_chunk() {
        check_against_reference(8, 8, 16, 1);
        check_against_reference(5, 7, 64, 2);
        check_against_reference(32, 32, 32, 3);
    }

    #[test]
    fn test_vectorized_tail_is_not_dropped() {
        check_against_reference(3, 4, 17, 4);
        check_against_reference(6, 2, 31, 5);
        check_against_reference(2, 2, 2, 6);
        check_against_reference(4, 4, 1, 7);
    }

    #[test]
    fn test_vectorized_accumulates() {
        let a = vec![1.0; 16];
        let bt = vec![2.0; 16];
        let mut c = [10.0];

        gemm_vectorized(&a, &bt, &mut c, 1, 1, 16);
        assert_eq!(c[0], 42.0);
    }

    #[test]
    fn test_vectorized_accumulators_reset_between_elements() {
        // Two output columns: if the sums leaked, the second would include the first.
        let a = vec![1.0; 16];
        let mut bt = vec![1.0; 16];
        bt.extend(vec![0.0; 16]);
        let mut c = [0.0; 2];

        gemm_vectorized(&a, &bt, &mut c, 1, 2, 16);
        assert_eq!(c, [16.0, 0.0]);
    }
}
