//! Raw transaction rows and the small helpers used to summarise them.
use std::collections::HashSet;

/// Product identifier (the product description in the retail dataset).
pub type ProductId = String;

/// One row of the raw transaction input.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionRecord {
    pub customer_id: String,
    pub product: ProductId,
    /// Signed quantity; negative values are returns.
    pub quantity: i64,
}

impl TransactionRecord {
    pub fn new(customer_id: impl Into<String>, product: impl Into<String>, quantity: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            product: product.into(),
            quantity,
        }
    }
}

/// Log counts of distinct customers and products and the number of returns.
pub fn log_transaction_summary(records: &[TransactionRecord]) {
    let customers: HashSet<&str> = records.iter().map(|r| r.customer_id.as_str()).collect();
    let products: HashSet<&str> = records.iter().map(|r| r.product.as_str()).collect();
    let returns = records.iter().filter(|r| r.quantity < 0).count();

    log::info!(
        "Loaded {} transactions: {} customers, {} products, {} return rows",
        records.len(),
        customers.len(),
        products.len(),
        returns
    );
}

/// Normalise a customer identifier read from a CSV cell.
///
/// Spreadsheet exports often store integer ids as floats (`17850.0`); those
/// are reduced to their integer form so the same customer is not split in two.
pub fn normalize_customer_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((int_part, frac)) = trimmed.split_once('.') {
        if !int_part.is_empty()
            && int_part.chars().all(|c| c.is_ascii_digit())
            && frac.chars().all(|c| c == '0')
        {
            return int_part.to_string();
        }
    }
    trimmed.to_string()
}
