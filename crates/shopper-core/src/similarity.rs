//! Product × product cosine similarity.
//!
//! The matrix is computed once from a [`CustomerProductMatrix`] (or loaded from
//! a precomputed table) and is read-only afterwards.
use std::collections::HashMap;

use rayon::prelude::*;

use crate::customer_product::CustomerProductMatrix;
use crate::data_handling::ProductId;
use crate::error::{Result, ShopperError};
use crate::math::{dot, Array1, Array2};

/// Allowed asymmetry, range overshoot and diagonal drift when accepting a
/// precomputed table.
const TABLE_TOLERANCE: f64 = 1e-9;

/// Cosine similarity of two vectors. Zero-norm inputs yield `0.0`.
pub fn cosine_similarity(u: &[f64], v: &[f64]) -> f64 {
    cosine_with_sq_norms(u, v, dot(u, u), dot(v, v))
}

// sqrt(|u|^2 * |v|^2) rather than |u| * |v| keeps identical vectors at exactly 1.0.
fn cosine_with_sq_norms(u: &[f64], v: &[f64], sq_u: f64, sq_v: f64) -> f64 {
    if sq_u == 0.0 || sq_v == 0.0 {
        return 0.0;
    }
    (dot(u, v) / (sq_u * sq_v).sqrt()).clamp(-1.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct ProductSimilarityMatrix {
    products: Vec<ProductId>,
    index: HashMap<ProductId, usize>,
    scores: Array2<f64>,
}

impl ProductSimilarityMatrix {
    /// Compute pairwise cosine similarity between every pair of products.
    ///
    /// Only the upper triangle is evaluated; the lower triangle mirrors it so
    /// `similarity(a, b) == similarity(b, a)` holds exactly. A product whose
    /// quantities net to zero has similarity `0.0` with every product,
    /// including itself.
    pub fn compute(matrix: &CustomerProductMatrix) -> Self {
        let vectors = matrix.product_vectors();
        let n = vectors.nrows();

        let sq_norms: Array1<f64> = (0..n)
            .map(|i| {
                let row = vectors.row_slice(i);
                dot(row, row)
            })
            .collect();
        let degenerate = sq_norms.iter().filter(|&&sq| sq == 0.0).count();
        if degenerate > 0 {
            log::debug!(
                "{} product(s) have a zero quantity vector; their similarities fall back to 0.0",
                degenerate
            );
        }

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let u = vectors.row_slice(i);
                (i..n)
                    .map(|j| {
                        if i == j {
                            if sq_norms[i] == 0.0 {
                                0.0
                            } else {
                                1.0
                            }
                        } else {
                            cosine_with_sq_norms(u, vectors.row_slice(j), sq_norms[i], sq_norms[j])
                        }
                    })
                    .collect()
            })
            .collect();

        let mut scores = Array2::zeros((n, n));
        for (i, row) in upper.iter().enumerate() {
            for (offset, &score) in row.iter().enumerate() {
                let j = i + offset;
                scores[(i, j)] = score;
                scores[(j, i)] = score;
            }
        }

        log::info!("Computed {}x{} product similarity matrix", n, n);
        Self::assemble(matrix.products().to_vec(), scores)
    }

    /// Accept a precomputed square score table keyed by `products`.
    ///
    /// Every score must be finite and within `[-1, 1]`, the table must be
    /// symmetric, and each diagonal entry must be `1.0` (or `0.0` for a
    /// product with a zero quantity vector).
    pub fn from_parts(products: Vec<ProductId>, scores: Array2<f64>) -> Result<Self> {
        let n = products.len();
        if scores.shape() != (n, n) {
            return Err(ShopperError::InvalidInput(format!(
                "similarity table must be {}x{} for {} products, got {:?}",
                n,
                n,
                n,
                scores.shape()
            )));
        }
        for i in 0..n {
            for j in 0..n {
                let score = scores[(i, j)];
                if !score.is_finite() || score.abs() > 1.0 + TABLE_TOLERANCE {
                    return Err(ShopperError::InvalidInput(format!(
                        "similarity of '{}' and '{}' must be a number in [-1, 1], got {}",
                        products[i], products[j], score
                    )));
                }
            }
            let diagonal = scores[(i, i)];
            if (diagonal - 1.0).abs() > TABLE_TOLERANCE && diagonal.abs() > TABLE_TOLERANCE {
                return Err(ShopperError::InvalidInput(format!(
                    "self-similarity of '{}' must be 1 or 0, got {}",
                    products[i], diagonal
                )));
            }
            for j in (i + 1)..n {
                if (scores[(i, j)] - scores[(j, i)]).abs() > TABLE_TOLERANCE {
                    return Err(ShopperError::InvalidInput(format!(
                        "similarity table is not symmetric for '{}' and '{}'",
                        products[i], products[j]
                    )));
                }
            }
        }

        let matrix = Self::assemble(products, scores);
        if matrix.index.len() != n {
            return Err(ShopperError::InvalidInput(
                "similarity table contains duplicate product ids".to_string(),
            ));
        }
        Ok(matrix)
    }

    fn assemble(products: Vec<ProductId>, scores: Array2<f64>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        Self {
            products,
            index,
            scores,
        }
    }

    /// Product ids in matrix order.
    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, product: &str) -> bool {
        self.index.contains_key(product)
    }

    pub fn position(&self, product: &str) -> Option<usize> {
        self.index.get(product).copied()
    }

    pub fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let i = self.require(a)?;
        let j = self.require(b)?;
        Ok(self.scores[(i, j)])
    }

    /// Scores of `product` against every product, in matrix order.
    pub fn row(&self, product: &str) -> Result<&[f64]> {
        let i = self.require(product)?;
        Ok(self.scores.row_slice(i))
    }

    pub fn scores(&self) -> &Array2<f64> {
        &self.scores
    }

    fn require(&self, product: &str) -> Result<usize> {
        self.position(product)
            .ok_or_else(|| ShopperError::ProductNotFound(product.to_string()))
    }
}
