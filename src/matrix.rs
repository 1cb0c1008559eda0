//! Dense row-major `f32` matrix.
//!
//! Element `(i, j)` of an `x × y` matrix lives at offset `i * y + j`. The
//! buffer length always equals `rows * cols` and is never shared between two
//! `Matrix` values: [`Clone`] allocates a new buffer and copies the contents.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::error::{shape_mismatch, Result};
use crate::utils::{element_count, try_zeroed_f32_vec};

/// Exclusive upper bound of the integer values written by [`Matrix::random`].
pub const RANDOM_UPPER_BOUND: u32 = 10;

/// A dense, row-major matrix of single-precision floats.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a zero-initialized `rows × cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GemmError::AllocationFailure`](crate::error::GemmError::AllocationFailure)
    /// if the buffer cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let data = try_zeroed_f32_vec(len)?;

        Ok(Matrix { rows, cols, data })
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GemmError::ShapeMismatch`](crate::error::GemmError::ShapeMismatch)
    /// if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let len = element_count(rows, cols)?;
        if data.len() != len {
            return Err(shape_mismatch("Matrix::from_vec", (rows, cols), (1, data.len())));
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Creates an `n × n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut matrix = Matrix::new(n, n)?;
        for i in 0..n {
            matrix.data[i * n + i] = 1.0;
        }
        Ok(matrix)
    }

    /// Number of rows (`x`).
    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`y`).
    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The row-major element buffer.
    #[inline(always)]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the row-major element buffer.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the matrix and returns its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Element `(i, j)`, or `None` when out of range.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    #[inline(always)]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Transposes the matrix in place.
    ///
    /// The elements are permuted through a temporary copy of the buffer, then
    /// the row and column counts are swapped. Afterwards element `(i, j)`
    /// equals element `(j, i)` of the matrix before the call.
    ///
    /// # Errors
    ///
    /// Returns an allocation failure if the temporary copy cannot be made; the
    /// matrix is unchanged in that case.
    pub fn transpose(&mut self) -> Result<()> {
        let mut scratch = try_zeroed_f32_vec(self.data.len())?;
        scratch.copy_from_slice(&self.data);

        let (old_rows, old_cols) = (self.rows, self.cols);

        for i in 0..old_cols {
            for j in 0..old_rows {
                self.data[i * old_rows + j] = scratch[j * old_cols + i];
            }
        }

        std::mem::swap(&mut self.rows, &mut self.cols);

        Ok(())
    }

    /// Sets every element to `0.0`.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Fills every element with an integer in `[0, 10)` using the thread RNG.
    pub fn random(&mut self) {
        self.random_with(&mut rand::rng());
    }

    /// Fills every element with an integer in `[0, 10)` drawn from `rng`.
    ///
    /// Seeding is left to the caller; pass a seeded `StdRng` for reproducible
    /// benchmark inputs.
    pub fn random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for value in self.data.iter_mut() {
            *value = rng.random_range(0..RANDOM_UPPER_BOUND) as f32;
        }
    }

    /// Largest absolute element-wise difference to `other`.
    ///
    /// Returns `f32::INFINITY` if the shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> f32 {
        if self.shape() != other.shape() {
            return f32::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max)
    }

    /// `true` when shapes agree and every element is within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix, tolerance: f32) -> bool {
        self.max_abs_diff(other) <= tolerance
    }

    /// Writes the matrix to stdout, one row per line.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(
            i < self.rows && j < self.cols,
            "Index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(
            i < self.rows && j < self.cols,
            "Index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for i in 0..self.rows {
            for value in self.row(i) {
                write!(f, "{value:6.1}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
