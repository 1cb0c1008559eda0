//! Error types for tilegemm operations.
//!
//! Every kernel entry point validates its operands before touching the output,
//! so a returned error always means the output matrix was left unchanged.

use thiserror::Error;

/// Errors that can occur while building matrices or running a kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GemmError {
    /// Operand or output dimensions do not agree.
    #[error("Shape mismatch in {operation}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// The operation that rejected the operands.
        operation: &'static str,
        /// The `(rows, cols)` the operation required.
        expected: (usize, usize),
        /// The `(rows, cols)` that was supplied.
        found: (usize, usize),
    },

    /// A dimension is not a multiple of the kernel's tile or chunk granularity.
    #[error("Unsupported shape for {kernel} kernel: {dimension} = {value} is not a multiple of {multiple}")]
    UnsupportedShape {
        /// The kernel that rejected the shape.
        kernel: &'static str,
        /// Which dimension (`m`, `n` or `k`) is at fault.
        dimension: &'static str,
        /// The offending value.
        value: usize,
        /// The required granularity.
        multiple: usize,
    },

    /// The matrix buffer could not be allocated.
    #[error("Memory allocation failed (requested {requested_bytes} bytes)")]
    AllocationFailure {
        /// Number of bytes that were requested.
        requested_bytes: usize,
    },
}

/// Result type alias for tilegemm operations.
pub type Result<T> = std::result::Result<T, GemmError>;

/// Creates a shape mismatch error.
pub fn shape_mismatch(
    operation: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> GemmError {
    GemmError::ShapeMismatch {
        operation,
        expected,
        found,
    }
}

/// Creates an unsupported shape error.
pub fn unsupported_shape(
    kernel: &'static str,
    dimension: &'static str,
    value: usize,
    multiple: usize,
) -> GemmError {
    GemmError::UnsupportedShape {
        kernel,
        dimension,
        value,
        multiple,
    }
}

/// Creates an allocation error.
pub fn allocation_failure(requested_bytes: usize) -> GemmError {
    GemmError::AllocationFailure { requested_bytes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let error = shape_mismatch("multiply_reference", (2, 3), (3, 2));
        let display = format!("{}", error);
        assert!(display.contains("Shape mismatch"));
        assert!(display.contains("multiply_reference"));
        assert!(display.contains("(2, 3)"));
        assert!(display.contains("(3, 2)"));
    }

    #[test]
    fn test_unsupported_shape_display() {
        let error = unsupported_shape("blocked", "k", 10, 4);
        let display = format!("{}", error);
        assert!(display.contains("blocked kernel"));
        assert!(display.contains("k = 10"));
        assert!(display.contains("multiple of 4"));
    }

    #[test]
    fn test_allocation_failure_display() {
        let error = allocation_failure(4096);
        let display = format!("{}", error);
        assert!(display.contains("Memory allocation failed"));
        assert!(display.contains("4096 bytes"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = unsupported_shape("blocked", "m", 6, 4);
        let error2 = unsupported_shape("blocked", "m", 6, 4);
        let error3 = unsupported_shape("blocked", "n", 6, 4);

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = allocation_failure(16);

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
