//! Register-blocked 4×4 GEMM micro-kernel with software pipelining.
//!
//! `C` is partitioned into [`MR`] × [`NR`] tiles. Each tile lives in four
//! accumulator registers (one per output row) for the whole reduction, which
//! advances [`KR`] values at a time. On every step the micro-kernel:
//!
//! 1. loads the `MR × KR` block of `A` and the `KR × NR` block of `B` for the
//!    *next* step,
//! 2. multiplies the blocks already held in registers, broadcasting each `A`
//!    scalar against a whole `B` row:
//!    `temp = B[0]·a[0] + B[1]·a[1] + B[2]·a[2] + B[3]·a[3]`, then `acc += temp`,
//! 3. rotates the freshly loaded blocks into place.
//!
//! The last step is peeled so no load ever runs past the end of a row or
//! column block. Finished tiles are stored into `C`, overwriting it.
//!
//! `B` is read row-major (k × n): row `t` of the `B` block is the four
//! contiguous values `B[t][col..col + 4]`.

use rayon::prelude::*;

use crate::simd::{F32x4, SimdVec, LANE_COUNT};

/// Rows of `C` per tile.
pub const MR: usize = LANE_COUNT;
/// Columns of `C` per tile.
pub const NR: usize = LANE_COUNT;
/// Reduction values consumed per pipeline step.
pub const KR: usize = LANE_COUNT;

/// Loads four consecutive rows of a row-major operand as vectors.
///
/// # Safety
///
/// `ptr + r * stride .. ptr + r * stride + 4` must be readable for `r` in `0..4`.
#[inline(always)]
unsafe fn load_block(ptr: *const f32, stride: usize) -> [F32x4; LANE_COUNT] {
    [
        F32x4::load(ptr),
        F32x4::load(ptr.add(stride)),
        F32x4::load(ptr.add(2 * stride)),
        F32x4::load(ptr.add(3 * stride)),
    ]
}

/// One output row of a tile step: `Σ_t b[t] · a_row[t]`.
#[inline(always)]
fn row_update(a_row: F32x4, b: &[F32x4; KR]) -> F32x4 {
    b[0].mul_lane::<0>(a_row)
        .fma_lane::<1>(b[1], a_row)
        .fma_lane::<2>(b[2], a_row)
        .fma_lane::<3>(b[3], a_row)
}

#[inline(always)]
fn tile_step(acc: &mut [F32x4; MR], a: &[F32x4; MR], b: &[F32x4; KR]) {
    acc[0] += row_update(a[0], b);
    acc[1] += row_update(a[1], b);
    acc[2] += row_update(a[2], b);
    acc[3] += row_update(a[3], b);
}

/// Computes one `MR × NR` tile of `C` and stores it.
///
/// * `a` points at `A[row][0]` (stride `lda`)
/// * `b` points at `B[0][col]` (stride `ldb`)
/// * `c` points at `C[row][col]` (stride `ldc`)
///
/// # Safety
///
/// The caller guarantees `k_steps * KR` columns of four `A` rows starting at
/// `a`, `k_steps * KR` rows of four `B` columns starting at `b`, and four
/// rows of four `C` columns starting at `c` are all in bounds.
#[inline(always)]
unsafe fn kernel_4x4(
    a: *const f32,
    b: *const f32,
    c: *mut f32,
    k_steps: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
) {
    let mut acc = [F32x4::zeros(); MR];

    if k_steps > 0 {
        let mut a_block = load_block(a, lda);
        let mut b_block = load_block(b, ldb);

        for step in 1..k_steps {
            let a_next = load_block(a.add(step * KR), lda);
            let b_next = load_block(b.add(step * KR * ldb), ldb);

            tile_step(&mut acc, &a_block, &b_block);

            a_block = a_next;
            b_block = b_next;
        }

        tile_step(&mut acc, &a_block, &b_block);
    }

    for (r, tile_row) in acc.iter().enumerate() {
        tile_row.store_at(c.add(r * ldc));
    }
}

/// Computes one band of `MR` output rows, tile by tile.
///
/// # Safety
///
/// `a_band` holds `MR * k` values, `b` holds `k * n`, `c_band` holds `MR * n`,
/// and `n`, `k` are multiples of four.
#[inline(always)]
unsafe fn compute_band(a_band: &[f32], b: &[f32], c_band: &mut [f32], n: usize, k: usize) {
    let k_steps = k / KR;
    for outer_y in 0..n / NR {
        kernel_4x4(
            a_band.as_ptr(),
            b.as_ptr().add(outer_y * NR),
            c_band.as_mut_ptr().add(outer_y * NR),
            k_steps,
            k,
            n,
            n,
        );
    }
}

fn check_blocked_inputs(a: &[f32], b: &[f32], c: &[f32], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "Matrix A has incorrect dimensions");
    assert_eq!(b.len(), k * n, "Matrix B has incorrect dimensions");
    assert_eq!(c.len(), m * n, "Matrix C has incorrect dimensions");
    assert!(
        m % MR == 0 && n % NR == 0 && k % KR == 0,
        "Dimensions must be multiples of {LANE_COUNT}, got m={m}, n={n}, k={k}"
    );
}

/// Computes `C = A × B` with the 4×4 register-blocked micro-kernel.
///
/// `C` is overwritten, not accumulated into.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major
///
/// # Panics
///
/// Panics if the slice lengths don't match `m`, `n`, `k`, or if any of them
/// is not a multiple of four.
pub fn gemm_blocked(a: &[f32], b: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) {
    check_blocked_inputs(a, b, c, m, n, k);

    for outer_x in 0..m / MR {
        let a_band = &a[outer_x * MR * k..(outer_x + 1) * MR * k];
        let c_band = &mut c[outer_x * MR * n..(outer_x + 1) * MR * n];
        // SAFETY: lengths and multiples checked above.
        unsafe { compute_band(a_band, b, c_band, n, k) };
    }
}

/// Same as [`gemm_blocked`], with bands of `MR` output rows spread across the
/// rayon thread pool.
///
/// Every tile is computed by exactly one thread, so the result is identical
/// to the single-threaded kernel.
pub fn par_gemm_blocked(a: &[f32], b: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) {
    check_blocked_inputs(a, b, c, m, n, k);

    if m == 0 || n == 0 {
        return;
    }

    c.par_chunks_mut(MR * n)
        .enumerate()
        .for_each(|(outer_x, c_band)| {
            let a_band = &a[outer_x * MR * k..(outer_x + 1) * MR * k];
            // SAFETY: lengths and multiples checked above.
            unsafe { compute_band(a_band, b, c_band, n, k) };
        });
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

    fn naive(a: &[f32], b: &[f32], m: usize, n: usize, k: usize) -> Vec<f32> {
        let mut c = vec![0.0; m * n];
        gemm_reference(a, b, &mut c, m, n, k);
        c
    }

    #[test]
    fn test_single_tile_single_step() {
        let a: Vec<f32> = (1..=16).map(|v| v as f32).collect();
        let mut b = vec![0.0; 16];
        for i in 0..4 {
            b[i * 4 + i] = 1.0;
        }
        let mut c = vec![0.0; 16];

        gemm_blocked(&a, &b, &mut c, 4, 4, 4);
        assert_eq!(c, a);
    }

    #[test]
    fn test_8x8_matches_reference() {
        let mut rng = StdRng::seed_from_u64(42);
        let (m, n, k) = (8, 8, 8);
        let a = random_vec(m * k, &mut rng);
        let b = random_vec(k * n, &mut rng);

        let mut c = vec![0.0; m * n];
        gemm_blocked(&a, &b, &mut c, m, n, k);

        // Integer-valued inputs keep every partial sum exact.
        assert_eq!(c, naive(&a, &b, m, n, k));
    }

    #[test]
    fn test_rectangular_matches_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(m, n, k) in &[(4, 12, 8), (16, 4, 20), (12, 8, 4), (8, 16, 32)] {
            let a = random_vec(m * k, &mut rng);
            let b = random_vec(k * n, &mut rng);

            let mut c = vec![0.0; m * n];
            gemm_blocked(&a, &b, &mut c, m, n, k);
            assert_eq!(c, naive(&a, &b, m, n, k), "Mismatch for {m}x{n}x{k}");
        }
    }

    #[test]
    fn test_overwrites_output() {
        let a = vec![1.0; 16];
        let b = vec![1.0; 16];
        let mut c = vec![100.0; 16];

        gemm_blocked(&a, &b, &mut c, 4, 4, 4);
        assert_eq!(c, vec![4.0; 16]);
    }

    #[test]
    fn test_zero_reduction_stores_zeros() {
        let mut c = vec![5.0; 16];
        gemm_blocked(&[], &[], &mut c, 4, 4, 0);
        assert_eq!(c, vec![0.0; 16]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut rng = StdRng::seed_from_u64(1234);
        let (m, n, k) = (64, 48, 32);
        let a = random_vec(m * k, &mut rng);
        let b = random_vec(k * n, &mut rng);

        let mut serial = vec![0.0; m * n];
        let mut parallel = vec![0.0; m * n];
        gemm_blocked(&a, &b, &mut serial, m, n, k);
        par_gemm_blocked(&a, &b, &mut parallel, m, n, k);

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_parallel_empty_output() {
        let mut c: Vec<f32> = Vec::new();
        par_gemm_blocked(&[], &[0.0; 16], &mut c, 0, 4, 4);
        assert!(c.is_empty());
    }

    #[test]
    #[should_panic(expected = "multiples of 4")]
    fn test_non_multiple_panics() {
        let mut c = vec![0.0; 36];
        gemm_blocked(&[0.0; 36], &[0.0; 36], &mut c, 6, 6, 6);
    }
}
