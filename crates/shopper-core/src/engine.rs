//! Startup wiring for the two lookup services.
//!
//! Everything here runs once: the similarity matrix is built (or loaded) and
//! the pretrained artifacts are read, then the resulting [`LookupEngine`] is
//! handed to whatever serves queries. It holds no interior mutability and is
//! `Send + Sync`, so it can be shared behind an `Arc`.
use anyhow::{bail, Result};

use crate::config::EngineConfig;
use crate::customer_product::CustomerProductMatrix;
use crate::data_handling::{ProductId, TransactionRecord};
use crate::io::{load_cluster_model, load_scaler, read_similarity_table, read_transactions_with_columns};
use crate::recommender::Recommender;
use crate::segmentation::{SegmentClassifier, SegmentLabel};
use crate::similarity::ProductSimilarityMatrix;

/// Build the similarity matrix from in-memory records.
pub fn build_similarity(records: &[TransactionRecord]) -> ProductSimilarityMatrix {
    let matrix = CustomerProductMatrix::build(records);
    ProductSimilarityMatrix::compute(&matrix)
}

/// Load a precomputed similarity table if configured, otherwise build one
/// from the transactions file.
pub fn load_recommender(config: &EngineConfig) -> Result<Recommender> {
    let similarity = match (&config.similarity_table, &config.transactions) {
        (Some(table), _) => read_similarity_table(table)?,
        (None, Some(transactions)) => {
            let records = read_transactions_with_columns(transactions, &config.columns)?;
            build_similarity(&records)
        }
        (None, None) => bail!("Config must name either a similarity table or a transactions file"),
    };
    Ok(Recommender::new(similarity))
}

pub fn load_classifier(config: &EngineConfig) -> Result<SegmentClassifier> {
    let scaler = load_scaler(&config.scaler)?;
    let model = load_cluster_model(&config.cluster_model)?;
    Ok(SegmentClassifier::new(Box::new(scaler), Box::new(model)))
}

#[derive(Debug)]
pub struct LookupEngine {
    recommender: Recommender,
    classifier: SegmentClassifier,
    top_k: usize,
}

impl LookupEngine {
    pub fn new(recommender: Recommender, classifier: SegmentClassifier, top_k: usize) -> Self {
        Self {
            recommender,
            classifier,
            top_k,
        }
    }

    pub fn load(config: &EngineConfig) -> Result<Self> {
        let recommender = load_recommender(config)?;
        let classifier = load_classifier(config)?;
        log::info!(
            "Lookup engine ready: {} products, classifier {:?}",
            recommender.list_products().len(),
            classifier
        );
        Ok(Self::new(recommender, classifier, config.top_k))
    }

    pub fn list_products(&self) -> &[ProductId] {
        self.recommender.list_products()
    }

    /// Up to the configured top-k most similar products.
    pub fn recommend(&self, product: &str) -> crate::error::Result<Vec<ProductId>> {
        self.recommender.recommend(product, self.top_k)
    }

    /// Rejects negative or non-finite metrics before classifying them.
    pub fn classify(
        &self,
        recency: f64,
        frequency: f64,
        monetary: f64,
    ) -> crate::error::Result<SegmentLabel> {
        self.classifier.classify_checked(recency, frequency, monetary)
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn classifier(&self) -> &SegmentClassifier {
        &self.classifier
    }
}
