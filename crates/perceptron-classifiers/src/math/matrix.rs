use std::ops::{Add, AddAssign, Index, IndexMut, Mul};

use num_traits::{One, Zero};
use thiserror::Error;

use crate::math::vector::Array1;

/// Dense row-major matrix.
///
/// Used for numeric data (`Array2<f64>`) as well as boolean masks
/// (`Array2<bool>`). Fallible operations return [`ShapeError`] instead of
/// panicking; the `Index` impls are the only panicking accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// `1 x n` matrix holding `data`.
    pub fn row_vector(data: Vec<T>) -> Self {
        let cols = data.len();
        Self { data, rows: 1, cols }
    }

    /// `n x 1` matrix holding `data`.
    pub fn column_vector(data: Vec<T>) -> Self {
        let rows = data.len();
        Self { data, rows, cols: 1 }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_index(&self, row: usize, col: usize) -> Result<usize, ShapeError> {
        if row >= self.rows || col >= self.cols {
            return Err(ShapeError::OutOfRange {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(self.offset(row, col))
    }

    /// Checked element access.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, ShapeError> {
        let offset = self.check_index(row, col)?;
        Ok(&self.data[offset])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, ShapeError> {
        let offset = self.check_index(row, col)?;
        Ok(&mut self.data[offset])
    }

    /// Checked access by row-major flat index. For a column vector this is
    /// the element index.
    pub fn get_flat(&self, index: usize) -> Result<&T, ShapeError> {
        self.data.get(index).ok_or(ShapeError::OutOfRange {
            row: index / self.cols.max(1),
            col: index % self.cols.max(1),
            shape: (self.rows, self.cols),
        })
    }

    pub fn get_flat_mut(&mut self, index: usize) -> Result<&mut T, ShapeError> {
        let shape = (self.rows, self.cols);
        let cols = self.cols.max(1);
        self.data.get_mut(index).ok_or(ShapeError::OutOfRange {
            row: index / cols,
            col: index % cols,
            shape,
        })
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Swap two rows in place. Returns `self` so swaps can be chained.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<&mut Self, ShapeError> {
        for row in [a, b] {
            if row >= self.rows {
                return Err(ShapeError::OutOfRange {
                    row,
                    col: 0,
                    shape: self.shape(),
                });
            }
        }
        if a != b {
            for col in 0..self.cols {
                let (ia, ib) = (self.offset(a, col), self.offset(b, col));
                self.data.swap(ia, ib);
            }
        }
        Ok(self)
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array2<U>
    where
        F: FnMut(&T) -> U,
    {
        Array2 {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> Array2<T> {
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Array2 {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Copy of a single row.
    pub fn row(&self, row: usize) -> Result<Array1<T>, ShapeError> {
        if row >= self.rows {
            return Err(ShapeError::OutOfRange {
                row,
                col: 0,
                shape: self.shape(),
            });
        }
        Ok(Array1::from_vec(self.row_slice(row).to_vec()))
    }

    /// Copies of every row, top to bottom.
    pub fn rows(&self) -> Vec<Array1<T>> {
        (0..self.rows)
            .map(|row| Array1::from_vec(self.row_slice(row).to_vec()))
            .collect()
    }

    pub fn column(&self, col: usize) -> Array1<T> {
        assert!(col < self.cols, "column index out of bounds");
        let mut values = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            values.push(self[(row, col)].clone());
        }
        Array1::from_vec(values)
    }

    /// Append a row at the bottom. An empty (0x0) matrix takes the width of
    /// the first pushed row.
    pub fn push_row(&mut self, row: &[T]) -> Result<&mut Self, ShapeError> {
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        } else if row.len() != self.cols {
            return Err(ShapeError::DimensionMismatch {
                op: "push_row",
                left: self.shape(),
                right: (1, row.len()),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(self)
    }

    pub fn select_rows(&self, indices: &[usize]) -> Array2<T> {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &row in indices {
            let slice = self.row_slice(row);
            data.extend_from_slice(slice);
        }
        Array2 {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    /// Keep only the columns whose mask entry is `true`, in their original
    /// order. An all-false mask yields a matrix with zero columns and the
    /// same number of rows.
    pub fn select_columns_by_mask(&self, mask: &Array1<bool>) -> Result<Array2<T>, ShapeError> {
        if mask.len() != self.cols {
            return Err(ShapeError::DimensionMismatch {
                op: "select_columns_by_mask",
                left: self.shape(),
                right: (1, mask.len()),
            });
        }

        let kept = mask.count_true();
        let mut data = Vec::with_capacity(self.rows * kept);
        for row in 0..self.rows {
            let slice = self.row_slice(row);
            data.extend(
                slice
                    .iter()
                    .zip(mask.iter())
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone()),
            );
        }

        Ok(Array2 {
            data,
            rows: self.rows,
            cols: kept,
        })
    }

    pub fn transpose(&self) -> Array2<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)].clone());
            }
        }
        Array2 {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T: Clone + Zero> Array2<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Array2::from_elem(rows, cols, T::zero())
    }
}

impl<T: Clone + Zero + One> Array2<T> {
    pub fn ones(rows: usize, cols: usize) -> Self {
        Array2::from_elem(rows, cols, T::one())
    }
}

impl<T> Array2<T>
where
    T: Copy + Zero + Mul<Output = T>,
{
    /// Matrix product `self * rhs`.
    pub fn dot(&self, rhs: &Array2<T>) -> Result<Array2<T>, ShapeError> {
        if self.cols != rhs.rows {
            return Err(ShapeError::DimensionMismatch {
                op: "dot",
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        let mut data = vec![T::zero(); self.rows * rhs.cols];
        for i in 0..self.rows {
            let lhs_row = self.row_slice(i);
            for (k, &a) in lhs_row.iter().enumerate() {
                let rhs_row = rhs.row_slice(k);
                let out = &mut data[i * rhs.cols..(i + 1) * rhs.cols];
                for (acc, &b) in out.iter_mut().zip(rhs_row.iter()) {
                    *acc = *acc + a * b;
                }
            }
        }

        Ok(Array2 {
            data,
            rows: self.rows,
            cols: rhs.cols,
        })
    }

    pub fn scale(&self, factor: T) -> Array2<T> {
        self.mapv(|&v| v * factor)
    }
}

impl<T> Array2<T>
where
    T: Copy + Add<Output = T>,
{
    /// Elementwise `self += rhs`; shapes must match exactly.
    pub fn try_add_assign(&mut self, rhs: &Array2<T>) -> Result<(), ShapeError> {
        if self.shape() != rhs.shape() {
            return Err(ShapeError::DimensionMismatch {
                op: "add_assign",
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
        Ok(())
    }
}

impl<T: PartialOrd> Array2<T> {
    /// Elementwise `value < threshold`, same shape as `self`.
    pub fn lt_scalar(&self, threshold: T) -> Array2<bool> {
        self.mapv(|v| *v < threshold)
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for shape {:?}",
            index,
            self.shape()
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for shape {:?}",
            index,
            self.shape()
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<'a, T> Mul<T> for &'a Array2<T>
where
    T: Copy + Zero + Mul<Output = T>,
{
    type Output = Array2<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self.scale(rhs)
    }
}

impl<'a, T> AddAssign<&'a Array2<T>> for Array2<T>
where
    T: Copy + Add<Output = T>,
{
    fn add_assign(&mut self, rhs: &'a Array2<T>) {
        if let Err(err) = self.try_add_assign(rhs) {
            panic!("{}", err);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    BufferLength { rows: usize, cols: usize, len: usize },

    #[error("dimension mismatch in {op}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("index ({row}, {col}) out of range for shape {shape:?}")]
    OutOfRange {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_accumulates_row_by_column() {
        let a = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Array2::from_shape_vec((3, 1), vec![1.0, 0.0, -1.0]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert_eq!(c.to_vec(), vec![-2.0, -2.0]);
    }

    #[test]
    fn swap_rows_same_index_is_noop() {
        let mut a = Array2::from_shape_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
        a.swap_rows(1, 1).unwrap();
        assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn get_flat_on_column_vector() {
        let v = Array2::from_shape_vec((3, 1), vec![7, 8, 9]).unwrap();
        assert_eq!(*v.get_flat(2).unwrap(), 9);
        assert!(matches!(
            v.get_flat(3),
            Err(ShapeError::OutOfRange { row: 3, col: 0, .. })
        ));
    }
}
