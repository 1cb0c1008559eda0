//! Portable backend for targets without a supported 128-bit SIMD unit.
//!
//! Also selected on any target when `TILEGEMM_FORCE_FALLBACK=1` is set at
//! build time. Lanes are plain `[f32; 4]` arrays; the compiler is free to
//! auto-vectorize them.

pub mod f32x4;
