//! Square CSV/TSV form of the product similarity matrix.
//!
//! Layout: a header row `product,<p1>,<p2>,...` followed by one row per
//! product in the same order, each starting with its id.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::math::Array2;
use crate::similarity::ProductSimilarityMatrix;

const ID_HEADER: &str = "product";

pub fn write_similarity_table<P: AsRef<Path>>(
    matrix: &ProductSimilarityMatrix,
    output_path: P,
) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create similarity table: {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(super::delimiter_for(path))
        .from_writer(BufWriter::new(file));

    let products = matrix.products();
    let mut header = Vec::with_capacity(products.len() + 1);
    header.push(ID_HEADER);
    header.extend(products.iter().map(String::as_str));
    writer.write_record(&header)?;

    for (i, product) in products.iter().enumerate() {
        let mut row = Vec::with_capacity(products.len() + 1);
        row.push(product.clone());
        // `{}` on f64 prints the shortest string that parses back exactly.
        row.extend(matrix.scores().row_slice(i).iter().map(|s| format!("{}", s)));
        writer.write_record(&row)?;
    }
    writer.flush()?;

    log::info!(
        "Wrote {}x{} similarity table to {}",
        products.len(),
        products.len(),
        path.display()
    );
    Ok(())
}

pub fn read_similarity_table<P: AsRef<Path>>(path: P) -> Result<ProductSimilarityMatrix> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(super::delimiter_for(path))
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open similarity table: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read similarity table header")?
        .clone();
    let products: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let n = products.len();

    let mut scores = Vec::with_capacity(n * n);
    let mut rows = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let id = record.get(0).unwrap_or("");
        match products.get(row_idx) {
            Some(expected) if expected == id => {}
            Some(expected) => bail!(
                "Row {} is for '{}' but the header expects '{}'",
                row_idx + 1,
                id,
                expected
            ),
            None => bail!("Similarity table has more rows than columns"),
        }
        for (col, value) in record.iter().skip(1).enumerate() {
            let score: f64 = value.trim().parse().with_context(|| {
                format!(
                    "Invalid score '{}' at row {} column '{}'",
                    value,
                    row_idx + 1,
                    products.get(col).map(String::as_str).unwrap_or("")
                )
            })?;
            scores.push(score);
        }
        rows += 1;
    }
    if rows != n {
        bail!("Similarity table has {} rows for {} products", rows, n);
    }

    let scores = Array2::from_shape_vec((n, n), scores)
        .map_err(|e| anyhow!("Malformed similarity table: {}", e))?;
    let matrix = ProductSimilarityMatrix::from_parts(products, scores)?;
    log::info!(
        "Loaded {}x{} similarity table from {}",
        n,
        n,
        path.display()
    );
    Ok(matrix)
}
