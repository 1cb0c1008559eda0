use std::ops::{Add, AddAssign, Mul};

/// Number of f32 lanes in every backend vector (128 bits).
pub const LANE_COUNT: usize = 4;

/// The fixed-width vector primitives the GEMM kernels are written against.
///
/// Each backend (`neon`, `sse`, `fallback`) provides one `F32x4` type that
/// implements this trait, so the kernels never name an architecture.
pub trait SimdVec:
    Copy + Add<Output = Self> + AddAssign + Mul<Output = Self> + From<[f32; LANE_COUNT]>
{
    /// A vector with every lane set to `0.0`.
    fn zeros() -> Self;

    /// A vector with every lane set to `value`.
    fn splat(value: f32) -> Self;

    /// Loads four contiguous values.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `LANE_COUNT` consecutive `f32` values.
    /// No alignment is required.
    unsafe fn load(ptr: *const f32) -> Self;

    /// Stores all four lanes to contiguous memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `LANE_COUNT` consecutive `f32` values.
    unsafe fn store_at(&self, ptr: *mut f32);

    /// Multiplies every lane of `self` by lane `LANE` of `v`.
    fn mul_lane<const LANE: i32>(self, v: Self) -> Self;

    /// Returns `self + a * v[LANE]`, lane by lane.
    fn fma_lane<const LANE: i32>(self, a: Self, v: Self) -> Self;

    /// Copies the lanes out, lane 0 first.
    fn to_array(self) -> [f32; LANE_COUNT];

    /// Horizontal reduction: lane 0 + lane 1 + lane 2 + lane 3, in that order.
    #[inline(always)]
    fn reduce_sum(self) -> f32 {
        let lanes = self.to_array();
        lanes[0] + lanes[1] + lanes[2] + lanes[3]
    }

    /// Loads the first four values of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `slice` holds fewer than `LANE_COUNT` elements.
    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(
            slice.len() >= LANE_COUNT,
            "Slice must hold at least {LANE_COUNT} elements, got {}",
            slice.len()
        );

        unsafe { Self::load(slice.as_ptr()) }
    }
}
