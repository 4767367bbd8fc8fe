use std::path::Path;

use anyhow::{bail, Result};

use shopper_core::io::table_delimiter;

/// Delimiter of the table named by `--<flag>`; only `.csv` and `.tsv` are
/// accepted.
pub fn table_format(flag: &str, path: &Path) -> Result<u8> {
    match table_delimiter(path) {
        Some(delimiter) => Ok(delimiter),
        None => bail!("--{} must name a .csv or .tsv file: {}", flag, path.display()),
    }
}

/// As [`table_format`], for an input table that must already exist.
pub fn existing_table(flag: &str, path: &Path) -> Result<u8> {
    let delimiter = table_format(flag, path)?;
    if !path.is_file() {
        bail!("--{} file does not exist: {}", flag, path.display());
    }
    Ok(delimiter)
}
