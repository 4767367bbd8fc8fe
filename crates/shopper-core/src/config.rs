use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::io::transactions::TransactionColumns;
use crate::recommender::DEFAULT_TOP_K;

/// Startup configuration for the lookup engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Raw transactions used to build the similarity matrix.
    pub transactions: Option<String>,
    /// Precomputed similarity table; preferred over `transactions` when set.
    pub similarity_table: Option<String>,
    pub scaler: String,
    pub cluster_model: String,
    pub top_k: usize,
    pub columns: TransactionColumns,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transactions: Some("online_retail.csv".to_string()),
            similarity_table: None,
            scaler: "scaler.json".to_string(),
            cluster_model: "kmeans.json".to_string(),
            top_k: DEFAULT_TOP_K,
            columns: TransactionColumns::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file. Fields that are missing or fail to parse keep
    /// their default value and are reported with a warning.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let partial: serde_json::Value = serde_json::from_str(content)?;
        let mut config = EngineConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            config.$field
                        );
                    }
                } else {
                    log::debug!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            };
        }

        load_or_default!(transactions);
        load_or_default!(similarity_table);
        load_or_default!(scaler);
        load_or_default!(cluster_model);
        load_or_default!(top_k);
        load_or_default!(columns);

        Ok(config)
    }
}
