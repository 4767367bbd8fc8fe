use std::iter::FromIterator;
use std::ops::Index;
use std::slice::Iter;

/// Read-only vector built by collecting an iterator.
#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

/// Dot product of two equal-length slices.
pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(
        lhs.len(),
        rhs.len(),
        "Dot product requires equal length vectors"
    );
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

/// Squared Euclidean distance between two equal-length slices.
pub fn squared_distance(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(
        lhs.len(),
        rhs.len(),
        "Distance requires equal length vectors"
    );
    lhs.iter().zip(rhs.iter()).map(|(a, b)| (a - b) * (a - b)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_slices() {
        assert_eq!(dot(&[3.0, 4.0], &[1.0, 2.0]), 11.0);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn squared_distance_between_points() {
        assert_eq!(squared_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_distance(&[], &[]), 0.0);
    }

    #[test]
    fn collected_values_are_indexable() {
        let squares: Array1<f64> = (1..=3).map(|i| (i * i) as f64).collect();
        assert_eq!(squares[2], 9.0);
        assert_eq!(squares.iter().filter(|&&v| v > 1.0).count(), 2);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn dot_length_mismatch_panics() {
        dot(&[1.0], &[1.0, 2.0]);
    }
}
