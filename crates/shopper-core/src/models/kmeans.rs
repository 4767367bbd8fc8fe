//! Nearest-centroid assignment for a pretrained k-means partition.
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopperError};
use crate::math::squared_distance;
use crate::models::cluster_trait::ClusterModel;
use crate::preprocessing::{to_feature_vector, FeatureVector};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KMeansModel {
    centroids: Vec<FeatureVector>,
}

#[derive(Deserialize)]
struct RawKMeans {
    #[serde(alias = "cluster_centers_")]
    centroids: Vec<Vec<f64>>,
}

impl KMeansModel {
    pub fn new(centroids: Vec<FeatureVector>) -> Result<Self> {
        if centroids.is_empty() {
            return Err(ShopperError::InvalidInput(
                "cluster model needs at least one centroid".to_string(),
            ));
        }
        if centroids.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ShopperError::InvalidInput(
                "centroid coordinates must be finite".to_string(),
            ));
        }
        Ok(Self { centroids })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawKMeans = serde_json::from_str(json)
            .map_err(|e| ShopperError::InvalidInput(format!("malformed cluster model: {}", e)))?;
        let centroids = raw
            .centroids
            .into_iter()
            .map(to_feature_vector)
            .collect::<Result<Vec<_>>>()?;
        Self::new(centroids)
    }

    pub fn centroids(&self) -> &[FeatureVector] {
        &self.centroids
    }
}

impl ClusterModel for KMeansModel {
    /// Index of the closest centroid; equal distances go to the lower index.
    fn predict(&self, x: &FeatureVector) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, centroid) in self.centroids.iter().enumerate() {
            let dist = squared_distance(x, centroid);
            if dist < best_dist {
                best = idx;
                best_dist = dist;
            }
        }
        best
    }

    fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    fn name(&self) -> &str {
        "kmeans"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> KMeansModel {
        KMeansModel::new(vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]).unwrap()
    }

    #[test]
    fn predicts_nearest_centroid() {
        let m = model();
        assert_eq!(m.predict(&[1.0, 1.0, 0.0]), 0);
        assert_eq!(m.predict(&[9.0, 2.0, 1.0]), 1);
        assert_eq!(m.predict(&[0.0, 7.0, -1.0]), 2);
        assert_eq!(m.n_clusters(), 3);
    }

    #[test]
    fn equidistant_point_goes_to_lower_index() {
        assert_eq!(model().predict(&[5.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn empty_model_is_rejected() {
        assert!(KMeansModel::new(vec![]).is_err());
    }

    #[test]
    fn json_with_wrong_dimension_is_rejected() {
        let err = KMeansModel::from_json(r#"{"centroids": [[0, 0, 0], [1, 1]]}"#).unwrap_err();
        assert_eq!(
            err,
            ShopperError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn json_accepts_python_attribute_name() {
        let m = KMeansModel::from_json(r#"{"cluster_centers_": [[1, 2, 3]]}"#).unwrap();
        assert_eq!(m.centroids(), &[[1.0, 2.0, 3.0]]);
    }
}
