//! 4-lane f32 vector abstraction used by the GEMM kernels.
//!
//! Exactly one backend is compiled in, chosen by `build.rs` from the target
//! description:
//!
//! | cfg        | Target                         | Register   |
//! |------------|--------------------------------|------------|
//! | `neon`     | aarch64                        | `float32x4_t` |
//! | `sse`      | x86 / x86_64 with SSE2         | `__m128`   |
//! | `fallback` | anything else, or when forced  | `[f32; 4]` |
//!
//! All three export the same `F32x4` type implementing [`SimdVec`], so the
//! kernels in [`crate::gemm`] are written once.

#[cfg(neon)]
pub mod neon;

#[cfg(sse)]
pub mod sse;

#[cfg(fallback)]
pub mod fallback;

pub mod traits;

pub use traits::{SimdVec, LANE_COUNT};

#[cfg(neon)]
pub use neon::f32x4::{F32x4, NEON_ALIGNMENT as ALIGNMENT};

#[cfg(sse)]
pub use sse::f32x4::{F32x4, SSE_ALIGNMENT as ALIGNMENT};

#[cfg(fallback)]
pub use fallback::f32x4::{F32x4, FALLBACK_ALIGNMENT as ALIGNMENT};

/// Name of the backend compiled into this build.
#[cfg(neon)]
pub const BACKEND: &str = "neon";

/// Name of the backend compiled into this build.
#[cfg(sse)]
pub const BACKEND: &str = "sse2";

/// Name of the backend compiled into this build.
#[cfg(fallback)]
pub const BACKEND: &str = "fallback";
