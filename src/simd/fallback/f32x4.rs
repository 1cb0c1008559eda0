use std::ops::{Add, AddAssign, Mul};

use crate::simd::traits::{SimdVec, LANE_COUNT};

/// Alignment of the portable vector, in bytes.
pub const FALLBACK_ALIGNMENT: usize = 16;

/// Four f32 lanes emulated with a plain array.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct F32x4 {
    pub(crate) elements: [f32; LANE_COUNT],
}

impl SimdVec for F32x4 {
    #[inline(always)]
    fn zeros() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]),
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        std::ptr::write_unaligned(ptr as *mut [f32; LANE_COUNT], self.elements);
    }

    #[inline(always)]
    fn mul_lane<const LANE: i32>(self, v: Self) -> Self {
        let scalar = v.elements[LANE as usize];
        Self {
            elements: self.elements.map(|x| x * scalar),
        }
    }

    #[inline(always)]
    fn fma_lane<const LANE: i32>(self, a: Self, v: Self) -> Self {
        let scalar = v.elements[LANE as usize];
        let mut elements = self.elements;
        for (acc, &x) in elements.iter_mut().zip(a.elements.iter()) {
            *acc += x * scalar;
        }
        Self { elements }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; LANE_COUNT] {
        self.elements
    }
}

impl From<[f32; LANE_COUNT]> for F32x4 {
    #[inline(always)]
    fn from(elements: [f32; LANE_COUNT]) -> Self {
        Self { elements }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        let mut elements = self.elements;
        for (lhs, &r) in elements.iter_mut().zip(rhs.elements.iter()) {
            *lhs += r;
        }
        Self { elements }
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
        let mut elements = self.elements;
        for (lhs, &r) in elements.iter_mut().zip(rhs.elements.iter()) {
            *lhs *= r;
        }
        Self { elements }
    }
}
