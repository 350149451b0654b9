//! Small ndarray-like types used throughout the crate.
//!
//! Provides `Array2` (2D, numeric or boolean) and `Array1` (1D) containers
//! with the handful of operations the training algorithms need, plus the
//! elementwise helpers in [`tools`].
pub mod matrix;
pub mod tools;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
