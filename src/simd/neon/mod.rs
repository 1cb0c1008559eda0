//! ARM NEON backend for the 4-lane vector type.
//!
//! NEON is mandatory on AArch64, so this backend is selected for every
//! `aarch64` target. The lane-indexed multiply-accumulate used by the blocked
//! kernel maps one-to-one onto `fmul`/`fmla` with a by-element operand.
//!
//! # Platform Support
//!
//! - **Apple Silicon**: M1, M2, M3 processors (macOS, iOS)
//! - **AWS Graviton**: Graviton2, Graviton3 processors
//! - **Embedded**: ARM Cortex-A series processors running AArch64

pub mod f32x4;
