#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{SimdVec, LANE_COUNT};

/// SSE memory alignment for `_mm_load_ps`/`_mm_store_ps`, in bytes.
pub const SSE_ALIGNMENT: usize = 16;

/// A SIMD vector of 4 32-bit floating point values held in an XMM register.
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub(crate) elements: __m128,
}

/// Copies lane `LANE` of `v` into all four lanes.
#[inline(always)]
fn broadcast_lane<const LANE: i32>(v: __m128) -> __m128 {
    debug_assert!((0..LANE_COUNT as i32).contains(&LANE), "Lane out of range");

    unsafe {
        match LANE {
            0 => _mm_shuffle_ps::<0x00>(v, v),
            1 => _mm_shuffle_ps::<0x55>(v, v),
            2 => _mm_shuffle_ps::<0xAA>(v, v),
            _ => _mm_shuffle_ps::<0xFF>(v, v),
        }
    }
}

impl SimdVec for F32x4 {
    #[inline(always)]
    fn zeros() -> Self {
        Self {
            elements: unsafe { _mm_setzero_ps() },
        }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm_set1_ps(value) },
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm_storeu_ps(ptr, self.elements);
    }

    #[inline(always)]
    fn mul_lane<const LANE: i32>(self, v: Self) -> Self {
        Self {
            elements: unsafe { _mm_mul_ps(self.elements, broadcast_lane::<LANE>(v.elements)) },
        }
    }

    #[inline(always)]
    fn fma_lane<const LANE: i32>(self, a: Self, v: Self) -> Self {
        Self {
            elements: unsafe {
                _mm_add_ps(
                    self.elements,
                    _mm_mul_ps(a.elements, broadcast_lane::<LANE>(v.elements)),
                )
            },
        }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { _mm_storeu_ps(lanes.as_mut_ptr(), self.elements) };
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
            elements: unsafe { _mm_add_ps(self.elements, rhs.elements) },
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
            elements: unsafe { _mm_mul_ps(self.elements, rhs.elements) },
        }
    }
}
