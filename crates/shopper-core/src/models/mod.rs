pub mod cluster_trait;
pub mod kmeans;
