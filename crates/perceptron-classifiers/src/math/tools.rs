//! Elementwise helpers used by the relaxation step.

use std::ops::{Add, Mul};

use num_traits::Zero;

use crate::math::Array2;

/// Elementwise square of `m`.
pub fn power<T>(m: &Array2<T>) -> Array2<T>
where
    T: Copy + Mul<Output = T>,
{
    m.mapv(|&v| v * v)
}

/// Sum down each column: returns a `1 x ncols` row whose entry `c` is the
/// sum of every element in column `c`.
///
/// Applied to `power(samples)` this gives the squared norm of every sample
/// column.
pub fn sum_cols<T>(m: &Array2<T>) -> Array2<T>
where
    T: Copy + Zero + Add<Output = T>,
{
    let mut sums = vec![T::zero(); m.ncols()];
    for row in 0..m.nrows() {
        for (acc, &v) in sums.iter_mut().zip(m.row_slice(row)) {
            *acc = *acc + v;
        }
    }
    Array2::row_vector(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_squares_each_element() {
        let m = Array2::from_shape_vec((2, 2), vec![1.0, -2.0, 3.0, -0.5]).unwrap();
        assert_eq!(power(&m).to_vec(), vec![1.0, 4.0, 9.0, 0.25]);
    }

    #[test]
    fn sum_cols_sums_down_columns() {
        let m = Array2::from_shape_vec((3, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]).unwrap();
        let s = sum_cols(&m);
        assert_eq!(s.shape(), (1, 2));
        assert_eq!(s.to_vec(), vec![6.0, 60.0]);
    }

    #[test]
    fn sum_cols_of_empty_selection_has_no_columns() {
        let m: Array2<f64> = Array2::zeros(3, 0);
        assert_eq!(sum_cols(&m).shape(), (1, 0));
    }
}
