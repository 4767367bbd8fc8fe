//! Loading of the pretrained scaler and cluster model.
//!
//! Both artifacts are small JSON documents:
//!
//! ```json
//! {"center": [r, f, m], "scale": [r, f, m]}
//! {"centroids": [[r, f, m], ...]}
//! ```
//!
//! Any failure here is reported as [`ShopperError::ArtifactLoad`] and is meant
//! to abort startup.
use std::fs;
use std::path::Path;

use crate::error::{Result, ShopperError};
use crate::models::cluster_trait::ClusterModel;
use crate::models::kmeans::KMeansModel;
use crate::preprocessing::{FeatureScaler, StandardScaler};

pub fn load_scaler<P: AsRef<Path>>(path: P) -> Result<StandardScaler> {
    let path = path.as_ref();
    let scaler = read_artifact(path).and_then(|json| {
        StandardScaler::from_json(&json).map_err(|e| artifact_error(path, e))
    })?;
    log::info!("Loaded {} from {}", scaler.name(), path.display());
    Ok(scaler)
}

pub fn load_cluster_model<P: AsRef<Path>>(path: P) -> Result<KMeansModel> {
    let path = path.as_ref();
    let model = read_artifact(path).and_then(|json| {
        KMeansModel::from_json(&json).map_err(|e| artifact_error(path, e))
    })?;
    log::info!(
        "Loaded {} model with {} clusters from {}",
        model.name(),
        model.n_clusters(),
        path.display()
    );
    Ok(model)
}

fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| artifact_error(path, e))
}

fn artifact_error(path: &Path, reason: impl std::fmt::Display) -> ShopperError {
    ShopperError::ArtifactLoad {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
