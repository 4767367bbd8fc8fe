//! Small dense array types used by the matrix builder and similarity engine.
//!
//! `Array2` is a row-major 2D buffer and `Array1` a thin vector wrapper. They
//! carry just the operations the lookup engine needs (indexing, row slices,
//! transpose, dot products and distances).
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::{dot, squared_distance, Array1};
