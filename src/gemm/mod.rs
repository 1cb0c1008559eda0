//! Dense f32 matrix multiplication kernels.
//!
//! Three strategies of increasing performance are provided, plus a
//! thread-parallel variant of the fastest:
//!
//! | Entry point               | Right operand | Output            | Shape requirement          |
//! |---------------------------|---------------|-------------------|----------------------------|
//! | [`multiply_reference`]    | `B` (k × n)   | accumulated (`+=`)| any                        |
//! | [`multiply_vectorized`]   | `Bᵀ` (n × k)  | accumulated (`+=`)| any (tail of `k % 16` is scalar) |
//! | [`multiply_blocked`]      | `B` (k × n)   | overwritten       | `m`, `n`, `k` multiples of 4 |
//! | [`par_multiply_blocked`]  | `B` (k × n)   | overwritten       | `m`, `n`, `k` multiples of 4 |
//!
//! Every entry point validates shapes before touching the output. On error
//! the output matrix is left exactly as it was.
//!
//! # Example
//!
//! ```
//! use tilegemm::{multiply_reference, Matrix};
//!
//! let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//! let mut c = Matrix::new(2, 2).unwrap();
//!
//! multiply_reference(&mut c, &a, &b).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```

pub mod blocked;
pub mod reference;
pub mod vectorized;

use std::fmt;

use log::{debug, trace, warn};

use crate::error::{shape_mismatch, unsupported_shape, Result};
use crate::matrix::Matrix;
use crate::simd::BACKEND;

use blocked::{gemm_blocked, par_gemm_blocked, KR, MR, NR};
use reference::gemm_reference;
use vectorized::{gemm_vectorized, CHUNK};

/// Kernel selector for callers that pick the strategy at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Scalar triple loop.
    Reference,
    /// 16-wide dot products against a transposed right operand.
    Vectorized,
    /// 4×4 register-tiled micro-kernel.
    Blocked,
    /// [`Kernel::Blocked`] over row bands on the rayon pool.
    ParallelBlocked,
}

impl Kernel {
    pub const ALL: [Kernel; 4] = [
        Kernel::Reference,
        Kernel::Vectorized,
        Kernel::Blocked,
        Kernel::ParallelBlocked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Reference => "reference",
            Kernel::Vectorized => "vectorized",
            Kernel::Blocked => "blocked",
            Kernel::ParallelBlocked => "parallel-blocked",
        }
    }

    /// Whether the right operand must be passed as `Bᵀ`.
    pub fn expects_transposed_rhs(self) -> bool {
        matches!(self, Kernel::Vectorized)
    }

    /// Whether the kernel adds into the output instead of overwriting it.
    pub fn accumulates(self) -> bool {
        matches!(self, Kernel::Reference | Kernel::Vectorized)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `kernel` on `out`, `a` and `rhs`.
///
/// `rhs` is `B` for every kernel except [`Kernel::Vectorized`], which takes
/// `Bᵀ` (see [`Kernel::expects_transposed_rhs`]).
pub fn multiply(kernel: Kernel, out: &mut Matrix, a: &Matrix, rhs: &Matrix) -> Result<()> {
    match kernel {
        Kernel::Reference => multiply_reference(out, a, rhs),
        Kernel::Vectorized => multiply_vectorized(out, a, rhs),
        Kernel::Blocked => multiply_blocked(out, a, rhs),
        Kernel::ParallelBlocked => par_multiply_blocked(out, a, rhs),
    }
}

/// Checks `A (m × k) · B (k × n) -> C (m × n)` and returns `(m, n, k)`.
fn check_product(
    operation: &'static str,
    out: &Matrix,
    a: &Matrix,
    b: &Matrix,
) -> Result<(usize, usize, usize)> {
    if a.cols() != b.rows() {
        return Err(shape_mismatch(operation, (a.cols(), b.cols()), b.shape()));
    }
    if out.shape() != (a.rows(), b.cols()) {
        return Err(shape_mismatch(operation, (a.rows(), b.cols()), out.shape()));
    }
    Ok((a.rows(), b.cols(), a.cols()))
}

/// Checks `A (m × k) · Bᵀ (n × k) -> C (m × n)` and returns `(m, n, k)`.
fn check_transposed_product(
    operation: &'static str,
    out: &Matrix,
    a: &Matrix,
    bt: &Matrix,
) -> Result<(usize, usize, usize)> {
    if a.cols() != bt.cols() {
        return Err(shape_mismatch(operation, (bt.rows(), a.cols()), bt.shape()));
    }
    if out.shape() != (a.rows(), bt.rows()) {
        return Err(shape_mismatch(operation, (a.rows(), bt.rows()), out.shape()));
    }
    Ok((a.rows(), bt.rows(), a.cols()))
}

fn check_tile_multiples(kernel: &'static str, m: usize, n: usize, k: usize) -> Result<()> {
    for (dimension, value, multiple) in [("m", m, MR), ("n", n, NR), ("k", k, KR)] {
        if value % multiple != 0 {
            return Err(unsupported_shape(kernel, dimension, value, multiple));
        }
    }
    Ok(())
}

/// `out += a × b` with the scalar reference kernel.
///
/// # Errors
///
/// [`GemmError::ShapeMismatch`](crate::GemmError::ShapeMismatch) if
/// `a.cols() != b.rows()` or `out` is not `a.rows() × b.cols()`.
pub fn multiply_reference(out: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    let (m, n, k) = check_product("multiply_reference", out, a, b)?;
    debug!("multiply_reference: m={m}, n={n}, k={k}");

    gemm_reference(a.as_slice(), b.as_slice(), out.as_mut_slice(), m, n, k);
    Ok(())
}

/// `out += a × b` given `bt = bᵀ`, with the SIMD dot-product kernel.
///
/// Both operands are walked along contiguous rows. When `k` is not a
/// multiple of 16 the trailing reduction values are summed by a scalar loop.
///
/// # Errors
///
/// [`GemmError::ShapeMismatch`](crate::GemmError::ShapeMismatch) if
/// `a.cols() != bt.cols()` or `out` is not `a.rows() × bt.rows()`.
pub fn multiply_vectorized(out: &mut Matrix, a: &Matrix, bt: &Matrix) -> Result<()> {
    let (m, n, k) = check_transposed_product("multiply_vectorized", out, a, bt)?;
    debug!("multiply_vectorized: m={m}, n={n}, k={k}, backend={BACKEND}");

    if k % CHUNK != 0 {
        warn!(
            "multiply_vectorized: k={k} is not a multiple of {CHUNK}, last {} values per element take the scalar path",
            k % CHUNK
        );
    }

    gemm_vectorized(a.as_slice(), bt.as_slice(), out.as_mut_slice(), m, n, k);
    Ok(())
}

/// `out = a × b` with the 4×4 register-blocked kernel.
///
/// # Errors
///
/// * [`GemmError::ShapeMismatch`](crate::GemmError::ShapeMismatch) if the
///   shapes don't agree.
/// * [`GemmError::UnsupportedShape`](crate::GemmError::UnsupportedShape) if
///   `m`, `n` or `k` is not a multiple of 4.
pub fn multiply_blocked(out: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    let (m, n, k) = check_product("multiply_blocked", out, a, b)?;
    check_tile_multiples("blocked", m, n, k)?;
    debug!("multiply_blocked: m={m}, n={n}, k={k}");
    trace!("blocked kernel on {BACKEND} backend, {MR}x{NR} tiles");

    gemm_blocked(a.as_slice(), b.as_slice(), out.as_mut_slice(), m, n, k);
    Ok(())
}

/// [`multiply_blocked`] with row bands of tiles spread over the rayon pool.
///
/// The result is bit-identical to [`multiply_blocked`].
pub fn par_multiply_blocked(out: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    let (m, n, k) = check_product("par_multiply_blocked", out, a, b)?;
    check_tile_multiples("parallel-blocked", m, n, k)?;
    debug!(
        "par_multiply_blocked: m={m}, n={n}, k={k}, threads={}",
        rayon::current_num_threads()
    );

    par_gemm_blocked(a.as_slice(), b.as_slice(), out.as_mut_slice(), m, n, k);
    Ok(())
}
