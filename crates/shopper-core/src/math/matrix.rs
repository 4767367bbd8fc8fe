use std::ops::{Index, IndexMut};

use num_traits::Zero;

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
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Swap rows and columns into a new buffer.
    pub fn transpose(&self) -> Array2<T>
    where
        T: Clone,
    {
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

impl<T> Array2<T>
where
    T: Clone + Zero,
{
    pub fn zeros(shape: (usize, usize)) -> Self {
        let (rows, cols) = shape;
        Array2 {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_swaps_axes() {
        let a = Array2::from_shape_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.row_slice(0), &[1, 4]);
        assert_eq!(t.row_slice(2), &[3, 6]);
    }

    #[test]
    fn transpose_of_empty_is_empty() {
        let a: Array2<f64> = Array2::zeros((0, 0));
        assert_eq!(a.transpose().shape(), (0, 0));
    }

    #[test]
    fn shape_mismatch_errors() {
        let err = Array2::from_shape_vec((2, 2), vec![1.0f64]).unwrap_err();
        assert_eq!(err.to_string(), "invalid shape (2, 2) for buffer of length 1");
    }
}
