//! Dense single-precision matrix multiplication with three kernels of
//! increasing performance: a scalar reference, a SIMD dot-product kernel on a
//! transposed operand, and a 4×4 register-blocked kernel with software
//! pipelining.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tilegemm::{multiply_blocked, multiply_reference, Matrix};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut a = Matrix::new(8, 8).unwrap();
//! let mut b = Matrix::new(8, 8).unwrap();
//! a.random_with(&mut rng);
//! b.random_with(&mut rng);
//!
//! let mut expected = Matrix::new(8, 8).unwrap();
//! let mut actual = Matrix::new(8, 8).unwrap();
//! multiply_reference(&mut expected, &a, &b).unwrap();
//! multiply_blocked(&mut actual, &a, &b).unwrap();
//!
//! assert!(actual.approx_eq(&expected, 1e-3));
//! ```

pub mod error;
pub mod gemm;
pub mod matrix;
pub mod simd;
pub mod timer;
pub mod utils;

pub use error::{GemmError, Result};
pub use gemm::{
    multiply, multiply_blocked, multiply_reference, multiply_vectorized, par_multiply_blocked,
    Kernel,
};
pub use matrix::Matrix;
pub use timer::MilliTimer;
