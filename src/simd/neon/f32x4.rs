use std::arch::aarch64::*;

use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{SimdVec, LANE_COUNT};

/// NEON memory alignment for `vld1q_f32`/`vst1q_f32` fast paths, in bytes.
pub const NEON_ALIGNMENT: usize = 16;

/// A SIMD vector of 4 32-bit floating point values held in a NEON Q register.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub(crate) elements: float32x4_t,
}

impl SimdVec for F32x4 {
    #[inline(always)]
    fn zeros() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { vdupq_n_f32(value) },
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        vst1q_f32(ptr, self.elements);
    }

    // fmul vd.4s, vn.4s, vm.s[LANE]
    #[inline(always)]
    fn mul_lane<const LANE: i32>(self, v: Self) -> Self {
        Self {
            elements: unsafe { vmulq_laneq_f32::<LANE>(self.elements, v.elements) },
        }
    }

    // fmla vd.4s, vn.4s, vm.s[LANE]
    #[inline(always)]
    fn fma_lane<const LANE: i32>(self, a: Self, v: Self) -> Self {
        Self {
            elements: unsafe { vfmaq_laneq_f32::<LANE>(self.elements, a.elements, v.elements) },
        }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.elements) };
        lanes
    }
}

impl From<[f32; LANE_COUNT]> for F32x4 {
    #[inline(always)]
    fn from(lanes: [f32; LANE_COUNT]) -> Self {
        unsafe { Self::load(lanes.as_ptr()) }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl AddAssign for F32x4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}
