use crate::preprocessing::FeatureVector;

/// A small trait abstraction over pretrained cluster models. The segment
/// classifier only needs `predict`, so tests can supply a fixed-answer model
/// in place of a loaded artifact.
pub trait ClusterModel: Send + Sync {
    /// Assign a scaled feature vector to a cluster id.
    fn predict(&self, x: &FeatureVector) -> usize;

    /// Number of clusters the model can return.
    fn n_clusters(&self) -> usize;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "cluster_model"
    }
}
