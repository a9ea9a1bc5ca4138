//! A small row-major matrix for row and column-based data access
//!
//! `Matrix` holds the term - term similarity scores of two term sets and
//! is consumed by the [`SimilarityCombiner`](`crate::similarity::SimilarityCombiner`)s.
//!
//! Imagine the following matrix
//!
//! | Index |   0 |   1 |   2 |
//! |:----- | ---:| ---:| ---:|
//! | **0** |  11 |  12 |  13 |
//! | **1** |  21 |  22 |  23 |
//!
//! ```
//! use hpo_similarity::matrix::Matrix;
//!
//! let m = Matrix::new(2, 3, vec![11, 12, 13, 21, 22, 23]).unwrap();
//!
//! let rows: Vec<Vec<i32>> = m.rows().map(|row| row.to_vec()).collect();
//! assert_eq!(rows, vec![vec![11, 12, 13], vec![21, 22, 23]]);
//!
//! let cols: Vec<Vec<i32>> = m.cols().map(|col| col.copied().collect()).collect();
//! assert_eq!(cols, vec![vec![11, 21], vec![12, 22], vec![13, 23]]);
//! ```
use std::fmt::Debug;
use std::iter::{Skip, StepBy};

use crate::{HpoError, HpoResult};

/// A row-major matrix
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Crates a new Matrix from `data` with `rows` number of rows and
    /// `cols` number of columns
    ///
    /// # Errors
    ///
    /// [`HpoError::InvalidInput`] if `rows * cols` does not match the
    /// length of `data`
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> HpoResult<Self> {
        if rows * cols != data.len() {
            return Err(HpoError::InvalidInput(format!(
                "{rows}x{cols} matrix cannot hold {} values",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns the total length of the data
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the `Matrix` does not contain any data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a Tuple with number of rows and number of columns
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the value at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Iterates the rows of the matrix
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        // `chunks` panics on a chunk size of 0
        self.data.chunks(self.cols.max(1))
    }

    /// Iterates the columns of the matrix
    pub fn cols(&self) -> Columns<'_, T> {
        Columns {
            data: &self.data,
            cols: self.cols,
            idx: 0,
        }
    }
}

impl<T: std::fmt::Display> Debug for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let v: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// Iterates the columns of a `Matrix`, yielding an iterator over the
/// values of each column
pub struct Columns<'a, T> {
    data: &'a [T],
    cols: usize,
    idx: usize,
}

impl<'a, T> Iterator for Columns<'a, T> {
    type Item = StepBy<Skip<std::slice::Iter<'a, T>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.cols {
            return None;
        }
        let col = self.data.iter().skip(self.idx).step_by(self.cols);
        self.idx += 1;
        Some(col)
    }
}
