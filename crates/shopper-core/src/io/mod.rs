//! File readers and writers for transactions, similarity tables and
//! pretrained artifacts.
pub mod artifacts;
pub mod similarity_table;
pub mod transactions;

pub use artifacts::{load_cluster_model, load_scaler};
pub use similarity_table::{read_similarity_table, write_similarity_table};
pub use transactions::{read_transactions, read_transactions_with_columns};

use std::path::Path;

/// Delimiter for a table file, by extension: `\t` for `.tsv`, `,` for `.csv`,
/// `None` for anything else.
pub fn table_delimiter<P: AsRef<Path>>(path: P) -> Option<u8> {
    let ext = path.as_ref().extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("tsv") {
        Some(b'\t')
    } else if ext.eq_ignore_ascii_case("csv") {
        Some(b',')
    } else {
        None
    }
}

/// Like [`table_delimiter`], reading unknown extensions as comma-separated.
pub(crate) fn delimiter_for<P: AsRef<Path>>(path: P) -> u8 {
    table_delimiter(path).unwrap_or(b',')
}
