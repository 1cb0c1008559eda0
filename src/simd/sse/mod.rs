//! SSE2 backend for the 4-lane vector type.
//!
//! SSE2 is part of the x86_64 baseline, so this backend is the default on
//! Intel and AMD targets. SSE2 has no fused multiply-add; `fma_lane` is a
//! multiply followed by an add, which rounds twice.

pub mod f32x4;
