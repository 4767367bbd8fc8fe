//! Customer × product quantity matrix.
//!
//! Rows are customers and columns are products, both in ascending id order.
//! Each cell holds the arithmetic sum of every quantity recorded for that
//! pair; pairs never seen in the input are zero rather than missing. Cells are
//! `i128` so summing any number of `i64` quantities cannot overflow.
use std::collections::{BTreeSet, HashMap};

use crate::data_handling::{ProductId, TransactionRecord};
use crate::math::Array2;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProductMatrix {
    customers: Vec<String>,
    products: Vec<ProductId>,
    quantities: Array2<i128>,
}

impl CustomerProductMatrix {
    /// Aggregate raw records into a dense matrix over all observed customers
    /// and products.
    pub fn build(records: &[TransactionRecord]) -> Self {
        let customers: Vec<String> = records
            .iter()
            .map(|r| r.customer_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let products: Vec<ProductId> = records
            .iter()
            .map(|r| r.product.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let customer_idx: HashMap<&str, usize> = customers
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let product_idx: HashMap<&str, usize> = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect();

        let mut quantities = Array2::zeros((customers.len(), products.len()));
        for record in records {
            let row = customer_idx[record.customer_id.as_str()];
            let col = product_idx[record.product.as_str()];
            quantities[(row, col)] += i128::from(record.quantity);
        }

        log::debug!(
            "Built customer-product matrix with {} customers x {} products",
            customers.len(),
            products.len()
        );

        Self {
            customers,
            products,
            quantities,
        }
    }

    pub fn customers(&self) -> &[String] {
        &self.customers
    }

    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    pub fn shape(&self) -> (usize, usize) {
        self.quantities.shape()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Summed quantity for a pair. `None` only when either id was never
    /// observed; observed ids with no shared transaction yield `Some(0)`.
    pub fn quantity(&self, customer_id: &str, product: &str) -> Option<i128> {
        let row = self.customers.binary_search_by(|c| c.as_str().cmp(customer_id)).ok()?;
        let col = self.products.binary_search_by(|p| p.as_str().cmp(product)).ok()?;
        Some(self.quantities[(row, col)])
    }

    /// Product-major view: one row per product, one column per customer.
    pub fn product_vectors(&self) -> Array2<f64> {
        self.quantities.transpose().mapv(|&q| q as f64)
    }
}
