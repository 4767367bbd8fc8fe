//! shopper-core: product similarity and customer segmentation lookups.
//!
//! Transactions are aggregated into a customer × product matrix, turned into
//! a product × product cosine similarity matrix once, and then queried for
//! top-K similar products. Independently, a pretrained scaler and k-means
//! model map recency/frequency/monetary values to a named customer segment.
//!
//! Both halves are built at startup and are read-only afterwards; see
//! [`engine::LookupEngine`].
pub mod config;
pub mod customer_product;
pub mod data_handling;
pub mod engine;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod recommender;
pub mod segmentation;
pub mod similarity;

pub use error::ShopperError;
