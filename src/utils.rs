use crate::error::{allocation_failure, Result};

/// Allocates a `Vec<f32>` of `len` elements, all initialized to `0.0`.
///
/// Unlike `vec![0.0; len]`, running out of memory is reported to the caller
/// instead of aborting the process.
///
/// # Errors
///
/// Returns [`GemmError::AllocationFailure`](crate::error::GemmError::AllocationFailure)
/// if the byte size overflows `isize::MAX` or the allocator refuses the request.
pub fn try_zeroed_f32_vec(len: usize) -> Result<Vec<f32>> {
    let size_bytes = match len.checked_mul(std::mem::size_of::<f32>()) {
        Some(s) if s <= isize::MAX as usize => s,
        _ => return Err(allocation_failure(usize::MAX)),
    };

    let mut buffer: Vec<f32> = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| allocation_failure(size_bytes))?;

    // Capacity is already reserved, so this cannot reallocate.
    buffer.resize(len, 0.0);

    Ok(buffer)
}

/// Number of elements in a `rows x cols` buffer.
///
/// # Errors
///
/// Reports an overflowing product as an allocation failure, since no buffer of
/// that size could ever be allocated.
#[inline(always)]
pub fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| allocation_failure(usize::MAX))
}
