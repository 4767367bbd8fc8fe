use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;

use shopper_core::config::EngineConfig;

use crate::util::existing_table;

/// Load the engine config from `--config` (or defaults) and apply the
/// command line overrides shared by every subcommand.
pub fn config_from_arguments(matches: &ArgMatches) -> Result<EngineConfig> {
    let mut config = match optional::<PathBuf>(matches, "config") {
        Some(path) => {
            log::info!("[Shopper] Using config: {:?}", path);
            EngineConfig::from_file(path)?
        }
        None => {
            log::debug!("[Shopper] No config provided; using defaults.");
            EngineConfig::default()
        }
    };

    if let Some(transactions) = optional::<String>(matches, "transactions") {
        existing_table("transactions", Path::new(transactions))?;
        config.transactions = Some(transactions.clone());
        // An explicit transactions file wins over a configured table.
        config.similarity_table = None;
    }
    if let Some(table) = optional::<String>(matches, "similarity_table") {
        existing_table("similarity-table", Path::new(table))?;
        config.similarity_table = Some(table.clone());
    }
    if let Some(scaler) = optional::<String>(matches, "scaler") {
        config.scaler = scaler.clone();
    }
    if let Some(model) = optional::<String>(matches, "cluster_model") {
        config.cluster_model = model.clone();
    }
    if let Some(&top_k) = optional::<usize>(matches, "top_k") {
        config.top_k = top_k;
    }

    Ok(config)
}

/// Subcommands only declare the arguments they use; absent ids read as `None`.
fn optional<'a, T>(matches: &'a ArgMatches, id: &str) -> Option<&'a T>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    matches.try_get_one::<T>(id).ok().flatten()
}
