use thiserror::Error;

/// Errors surfaced by the lookup engine to its immediate caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShopperError {
    /// The requested product is not part of the similarity matrix.
    #[error("product not found in similarity matrix: '{0}'")]
    ProductNotFound(String),

    /// A scaler or cluster model artifact could not be loaded at startup.
    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// An artifact does not have the expected feature dimension.
    #[error("expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ShopperError>;
