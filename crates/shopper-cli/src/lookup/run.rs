//! Subcommand bodies. Each writes its user-facing output to `out` so the
//! same code path serves stdout and tests.
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};

use shopper_core::config::EngineConfig;
use shopper_core::engine::{build_similarity, load_classifier, load_recommender};
use shopper_core::io::{read_transactions_with_columns, write_similarity_table};

pub fn run_products<W: Write>(config: &EngineConfig, out: &mut W) -> Result<()> {
    let recommender = load_recommender(config)?;
    for product in recommender.list_products() {
        writeln!(out, "{}", product)?;
    }
    Ok(())
}

pub fn run_recommend<W: Write>(config: &EngineConfig, product: &str, out: &mut W) -> Result<()> {
    let recommender = load_recommender(config)?;
    let recommendations = recommender
        .recommend_scored(product, config.top_k)
        .with_context(|| format!("Cannot recommend for '{}'", product))?;

    writeln!(
        out,
        "Top {} Similar Products to '{}':",
        recommendations.len(),
        product
    )?;
    for (i, rec) in recommendations.iter().enumerate() {
        writeln!(out, "{}. {}\t{:.4}", i + 1, rec.product, rec.score)?;
    }
    Ok(())
}

pub fn run_segment<W: Write>(
    config: &EngineConfig,
    recency: f64,
    frequency: f64,
    monetary: f64,
    out: &mut W,
) -> Result<()> {
    let classifier = load_classifier(config)?;
    let label = classifier.classify_checked(recency, frequency, monetary)?;
    writeln!(out, "Predicted Customer Segment: {}", label)?;
    Ok(())
}

/// Build the similarity matrix from transactions and write it as a table.
pub fn run_build_similarity(config: &EngineConfig, output: &Path) -> Result<()> {
    let Some(transactions) = &config.transactions else {
        bail!("A transactions file is required to build the similarity table");
    };
    let records = read_transactions_with_columns(transactions, &config.columns)?;
    let similarity = build_similarity(&records);
    write_similarity_table(&similarity, output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_with_transactions(dir: &Path) -> EngineConfig {
        let path = dir.join("tx.csv");
        fs::write(
            &path,
            "CustomerID,Description,Quantity\n1,A,1\n3,A,1\n1,B,1\n3,B,1\n2,C,1\n",
        )
        .unwrap();
        EngineConfig {
            transactions: Some(path.to_str().unwrap().to_string()),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn recommend_prints_numbered_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transactions(dir.path());
        let mut out = Vec::new();
        run_recommend(&config, "A", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Top 2 Similar Products to 'A':"));
        assert!(text.contains("1. B\t1.0000"));
        assert!(text.contains("2. C\t0.0000"));
    }

    #[test]
    fn products_prints_sorted_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transactions(dir.path());
        let mut out = Vec::new();
        run_products(&config, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A\nB\nC\n");
    }

    #[test]
    fn unknown_product_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transactions(dir.path());
        let mut out = Vec::new();
        let err = run_recommend(&config, "Z", &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("product not found"));
    }

    #[test]
    fn segment_prints_label() {
        let dir = tempfile::tempdir().unwrap();
        let scaler = dir.path().join("scaler.json");
        let model = dir.path().join("kmeans.json");
        fs::write(&scaler, r#"{"center": [0, 0, 0], "scale": [1, 1, 1]}"#).unwrap();
        fs::write(&model, r#"{"centroids": [[0, 0, 0], [100, 100, 100]]}"#).unwrap();
        let config = EngineConfig {
            scaler: scaler.to_str().unwrap().to_string(),
            cluster_model: model.to_str().unwrap().to_string(),
            ..EngineConfig::default()
        };
        let mut out = Vec::new();
        run_segment(&config, 90.0, 95.0, 99.0, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Predicted Customer Segment: Regular\n");
        assert!(run_segment(&config, -1.0, 0.0, 0.0, &mut Vec::new()).is_err());
    }

    #[test]
    fn build_similarity_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transactions(dir.path());
        let output = dir.path().join("sim.csv");
        run_build_similarity(&config, &output).unwrap();
        let table = fs::read_to_string(&output).unwrap();
        assert!(table.starts_with("product,A,B,C\n"));
        assert!(table.contains("A,1,1,0\n"));
    }
}
