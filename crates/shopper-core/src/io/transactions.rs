//! Transaction CSV/TSV reader.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::data_handling::{log_transaction_summary, normalize_customer_id, TransactionRecord};

/// Header names of the columns the loader reads. Defaults match the
/// online retail export (`CustomerID`, `Description`, `Quantity`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionColumns {
    pub customer_id: String,
    pub product: String,
    pub quantity: String,
}

impl Default for TransactionColumns {
    fn default() -> Self {
        Self {
            customer_id: "CustomerID".to_string(),
            product: "Description".to_string(),
            quantity: "Quantity".to_string(),
        }
    }
}

/// Read transactions using the default column names.
pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>> {
    read_transactions_with_columns(path, &TransactionColumns::default())
}

/// Read transactions from a delimited file with a header row.
///
/// Rows whose customer id, product or quantity is blank are skipped, since
/// they contribute nothing to the customer-product matrix. A quantity that is
/// present but not an integer in the `i64` range is an error.
pub fn read_transactions_with_columns<P: AsRef<Path>>(
    path: P,
    columns: &TransactionColumns,
) -> Result<Vec<TransactionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(super::delimiter_for(&path))
        .has_headers(true)
        .flexible(true)
        .from_path(&path)
        .with_context(|| {
            format!(
                "Failed to open transactions file: {}",
                path.as_ref().display()
            )
        })?;

    let headers = reader
        .headers()
        .context("Failed to read transactions header row")?
        .clone();

    let customer_idx = require_column(&headers, &columns.customer_id)?;
    let product_idx = require_column(&headers, &columns.product)?;
    let quantity_idx = require_column(&headers, &columns.quantity)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based numbering.
        let line = row_idx + 2;
        let record = result.with_context(|| format!("Failed to read line {}", line))?;

        let customer = record.get(customer_idx).unwrap_or("").trim();
        let product = record.get(product_idx).unwrap_or("").trim();
        if customer.is_empty() || product.is_empty() {
            skipped += 1;
            continue;
        }

        let raw_quantity = record.get(quantity_idx).unwrap_or("").trim();
        if raw_quantity.is_empty() {
            skipped += 1;
            continue;
        }
        let quantity = parse_quantity(raw_quantity)
            .with_context(|| format!("Invalid quantity '{}' at line {}", raw_quantity, line))?;

        records.push(TransactionRecord::new(
            normalize_customer_id(customer),
            product,
            quantity,
        ));
    }

    if skipped > 0 {
        log::debug!(
            "Skipped {} row(s) with a missing customer id, product or quantity",
            skipped
        );
    }
    log_transaction_summary(&records);

    Ok(records)
}

fn require_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("Missing column '{}' in transactions header", name))
}

/// Integers, or floats with no fractional part (`6.0`), within `i64` range.
fn parse_quantity(raw: &str) -> Result<i64> {
    if let Ok(q) = raw.parse::<i64>() {
        return Ok(q);
    }
    let q: f64 = raw.parse()?;
    if !q.is_finite() || q.fract() != 0.0 {
        return Err(anyhow!("quantity must be a whole number"));
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if q < i64::MIN as f64 || q >= i64::MAX as f64 {
        return Err(anyhow!("quantity does not fit in a 64-bit integer"));
    }
    Ok(q as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_accept_whole_floats() {
        assert_eq!(parse_quantity("-3").unwrap(), -3);
        assert_eq!(parse_quantity("6.0").unwrap(), 6);
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("abc").is_err());
    }

    #[test]
    fn quantities_outside_i64_are_rejected() {
        assert_eq!(parse_quantity("9223372036854775807").unwrap(), i64::MAX);
        assert!(parse_quantity("9223372036854775808").is_err());
        assert!(parse_quantity("1e19").is_err());
        assert!(parse_quantity("-1e19").is_err());
        assert_eq!(parse_quantity("-9223372036854775808").unwrap(), i64::MIN);
    }
}
