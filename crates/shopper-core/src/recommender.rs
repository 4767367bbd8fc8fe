//! Top-K similar product lookup over a prebuilt similarity matrix.
use std::cmp::Ordering;

use serde::Serialize;

use crate::data_handling::ProductId;
use crate::error::Result;
use crate::similarity::ProductSimilarityMatrix;

/// Number of recommendations returned when the caller does not ask otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// A recommended product together with its similarity to the query product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product: ProductId,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Recommender {
    similarity: ProductSimilarityMatrix,
    catalog: Vec<ProductId>,
}

impl Recommender {
    pub fn new(similarity: ProductSimilarityMatrix) -> Self {
        let mut catalog = similarity.products().to_vec();
        catalog.sort();
        Self {
            similarity,
            catalog,
        }
    }

    /// Sorted product ids, for populating a selection list.
    pub fn list_products(&self) -> &[ProductId] {
        &self.catalog
    }

    pub fn similarity(&self) -> &ProductSimilarityMatrix {
        &self.similarity
    }

    /// Up to `k` products most similar to `product`, best first.
    pub fn recommend(&self, product: &str, k: usize) -> Result<Vec<ProductId>> {
        Ok(self
            .recommend_scored(product, k)?
            .into_iter()
            .map(|r| r.product)
            .collect())
    }

    /// Like [`Recommender::recommend`] but keeps the similarity scores.
    ///
    /// Candidates are ordered by descending score, ties by ascending product
    /// id. The query product itself is never returned.
    pub fn recommend_scored(&self, product: &str, k: usize) -> Result<Vec<Recommendation>> {
        let row = self.similarity.row(product)?;
        let products = self.similarity.products();

        let mut candidates: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(idx, _)| products[idx] != product)
            .collect();

        candidates.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => products[a.0].cmp(&products[b.0]),
            other => other,
        });
        candidates.truncate(k);

        log::debug!(
            "Recommended {} of {} candidate(s) for '{}'",
            candidates.len(),
            products.len().saturating_sub(1),
            product
        );

        Ok(candidates
            .into_iter()
            .map(|(idx, score)| Recommendation {
                product: products[idx].clone(),
                score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer_product::CustomerProductMatrix;
    use crate::data_handling::TransactionRecord;
    use crate::error::ShopperError;
    use crate::math::Array2;

    fn from_table(products: &[&str], scores: Vec<f64>) -> Recommender {
        let n = products.len();
        let scores = Array2::from_shape_vec((n, n), scores).unwrap();
        let products = products.iter().map(|p| p.to_string()).collect();
        Recommender::new(ProductSimilarityMatrix::from_parts(products, scores).unwrap())
    }

    #[test]
    fn abc_scenario() {
        let records = vec![
            TransactionRecord::new("c1", "A", 1),
            TransactionRecord::new("c3", "A", 1),
            TransactionRecord::new("c1", "B", 1),
            TransactionRecord::new("c3", "B", 1),
            TransactionRecord::new("c2", "C", 1),
        ];
        let sim = ProductSimilarityMatrix::compute(&CustomerProductMatrix::build(&records));
        let rec = Recommender::new(sim);
        assert_eq!(rec.recommend("A", 2).unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn ties_break_by_product_id() {
        let rec = from_table(
            &["d", "c", "b", "a"],
            vec![
                1.0, 0.5, 0.5, 0.5, //
                0.5, 1.0, 0.1, 0.1, //
                0.5, 0.1, 1.0, 0.1, //
                0.5, 0.1, 0.1, 1.0,
            ],
        );
        assert_eq!(rec.recommend("d", 3).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn query_product_is_excluded_even_when_not_ranked_first() {
        // A zero-norm product scores 0.0 with itself.
        let rec = from_table(&["x", "y"], vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(rec.recommend("x", 5).unwrap(), vec!["y"]);
    }

    #[test]
    fn fewer_than_k_candidates_returns_all() {
        let rec = from_table(&["a", "b"], vec![1.0, 0.3, 0.3, 1.0]);
        let out = rec.recommend_scored("a", DEFAULT_TOP_K).unwrap();
        assert_eq!(
            out,
            vec![Recommendation {
                product: "b".to_string(),
                score: 0.3
            }]
        );
    }

    #[test]
    fn k_zero_returns_nothing() {
        let rec = from_table(&["a", "b"], vec![1.0, 0.3, 0.3, 1.0]);
        assert!(rec.recommend("a", 0).unwrap().is_empty());
    }

    #[test]
    fn unknown_product_is_an_error() {
        let rec = from_table(&["a"], vec![1.0]);
        assert_eq!(
            rec.recommend("nope", 5).unwrap_err(),
            ShopperError::ProductNotFound("nope".to_string())
        );
    }

    #[test]
    fn catalog_is_sorted() {
        let rec = from_table(&["b", "a"], vec![1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rec.list_products(), &["a", "b"]);
    }
}
