//! Customer segmentation from recency, frequency and monetary values.
//!
//! A [`SegmentClassifier`] owns a [`FeatureScaler`] and a [`ClusterModel`],
//! both loaded once at startup. Classification scales the raw triple, asks the
//! model for the nearest cluster and maps the cluster id to a [`SegmentLabel`].
use std::fmt;

use serde::Serialize;

use crate::error::{Result, ShopperError};
use crate::models::cluster_trait::ClusterModel;
use crate::preprocessing::{FeatureScaler, FeatureVector};

/// Raw customer metrics as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RfmFeatures {
    /// Days since last purchase.
    pub recency: f64,
    /// Number of purchases.
    pub frequency: f64,
    /// Total spend.
    pub monetary: f64,
}

impl RfmFeatures {
    pub fn new(recency: f64, frequency: f64, monetary: f64) -> Self {
        Self {
            recency,
            frequency,
            monetary,
        }
    }

    pub fn to_array(&self) -> FeatureVector {
        [self.recency, self.frequency, self.monetary]
    }

    /// Reject negative or non-finite metrics.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("recency", self.recency),
            ("frequency", self.frequency),
            ("monetary", self.monetary),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShopperError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// The fixed set of named segments, indexed by cluster id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    HighValue,
    Regular,
    Occasional,
    AtRisk,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::HighValue,
        Segment::Regular,
        Segment::Occasional,
        Segment::AtRisk,
    ];

    pub fn from_cluster_id(id: usize) -> Option<Segment> {
        Self::ALL.get(id).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::HighValue => "High-Value",
            Segment::Regular => "Regular",
            Segment::Occasional => "Occasional",
            Segment::AtRisk => "At-Risk",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classification. Cluster ids without a named segment are kept as
/// `Unknown` and only rendered as `Cluster N` for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SegmentLabel {
    Known(Segment),
    Unknown(usize),
}

impl SegmentLabel {
    pub fn from_cluster_id(id: usize) -> Self {
        match Segment::from_cluster_id(id) {
            Some(segment) => SegmentLabel::Known(segment),
            None => SegmentLabel::Unknown(id),
        }
    }
}

impl fmt::Display for SegmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentLabel::Known(segment) => write!(f, "{}", segment),
            SegmentLabel::Unknown(id) => write!(f, "Cluster {}", id),
        }
    }
}

pub struct SegmentClassifier {
    scaler: Box<dyn FeatureScaler>,
    model: Box<dyn ClusterModel>,
}

impl SegmentClassifier {
    pub fn new(scaler: Box<dyn FeatureScaler>, model: Box<dyn ClusterModel>) -> Self {
        if model.n_clusters() > Segment::ALL.len() {
            log::warn!(
                "Cluster model '{}' has {} clusters but only {} are named; extra ids render as 'Cluster N'",
                model.name(),
                model.n_clusters(),
                Segment::ALL.len()
            );
        }
        Self { scaler, model }
    }

    /// Cluster id for a raw feature vector, before labelling.
    pub fn predict_cluster(&self, features: &RfmFeatures) -> usize {
        let scaled = self.scaler.transform(&features.to_array());
        self.model.predict(&scaled)
    }

    /// Classify without validating the inputs.
    ///
    /// Inputs must be finite and non-negative. A NaN metric makes every
    /// centroid distance NaN and the result degenerates to cluster 0, so
    /// untrusted values go through [`classify_checked`](Self::classify_checked).
    pub fn classify(&self, recency: f64, frequency: f64, monetary: f64) -> SegmentLabel {
        let features = RfmFeatures::new(recency, frequency, monetary);
        let cluster = self.predict_cluster(&features);
        let label = SegmentLabel::from_cluster_id(cluster);
        log::debug!("Classified {:?} into cluster {} ({})", features, cluster, label);
        label
    }

    /// Classify after rejecting negative or non-finite inputs.
    pub fn classify_checked(&self, recency: f64, frequency: f64, monetary: f64) -> Result<SegmentLabel> {
        RfmFeatures::new(recency, frequency, monetary).validate()?;
        Ok(self.classify(recency, frequency, monetary))
    }
}

impl fmt::Debug for SegmentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentClassifier")
            .field("scaler", &self.scaler.name())
            .field("model", &self.model.name())
            .field("n_clusters", &self.model.n_clusters())
            .finish()
    }
}
