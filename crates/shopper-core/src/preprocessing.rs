//! Feature scaling applied to RFM vectors before cluster assignment.
//!
//! Scaling parameters are fitted offline; this module only applies them. The
//! [`FeatureScaler`] trait is the seam that lets callers swap the loaded
//! artifact for a deterministic fake.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopperError};

/// Number of features in a recency/frequency/monetary vector.
pub const N_FEATURES: usize = 3;

/// A raw or scaled feature vector.
pub type FeatureVector = [f64; N_FEATURES];

/// Anything that maps a raw feature vector into the model's scaled space.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, x: &FeatureVector) -> FeatureVector;

    /// Optional human readable name for the scaler
    fn name(&self) -> &str {
        "scaler"
    }
}

/// Per-feature affine transform: `(x - center) / scale`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StandardScaler {
    pub center: FeatureVector,
    pub scale: FeatureVector,
}

/// On-disk layout; accepts both our key names and the fitted-attribute names
/// a Python standard scaler exports (`mean_`, `scale_`).
#[derive(Deserialize)]
struct RawScaler {
    #[serde(alias = "mean", alias = "mean_")]
    center: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler, replacing zero scales with 1.0 so constant features
    /// pass through centred instead of dividing by zero.
    pub fn new(center: FeatureVector, scale: FeatureVector) -> Result<Self> {
        if center.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ShopperError::InvalidInput(
                "scaler parameters must be finite".to_string(),
            ));
        }
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Ok(Self { center, scale })
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            center: [0.0; N_FEATURES],
            scale: [1.0; N_FEATURES],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawScaler = serde_json::from_str(json)
            .map_err(|e| ShopperError::InvalidInput(format!("malformed scaler: {}", e)))?;
        let center = to_feature_vector(raw.center)?;
        let scale = to_feature_vector(raw.scale)?;
        Self::new(center, scale)
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, x: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; N_FEATURES];
        for (i, v) in out.iter_mut().enumerate() {
            *v = (x[i] - self.center[i]) / self.scale[i];
        }
        out
    }

    fn name(&self) -> &str {
        "standard_scaler"
    }
}

pub(crate) fn to_feature_vector(values: Vec<f64>) -> Result<FeatureVector> {
    let found = values.len();
    values
        .try_into()
        .map_err(|_| ShopperError::DimensionMismatch {
            expected: N_FEATURES,
            found,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_centres_and_scales() {
        let sc = StandardScaler::new([10.0, 2.0, 100.0], [5.0, 2.0, 50.0]).unwrap();
        assert_eq!(sc.transform(&[20.0, 2.0, 0.0]), [2.0, 0.0, -2.0]);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let sc = StandardScaler::new([1.0, 1.0, 1.0], [0.0, 2.0, 1.0]).unwrap();
        assert_eq!(sc.scale, [1.0, 2.0, 1.0]);
        assert_eq!(sc.transform(&[3.0, 3.0, 3.0]), [2.0, 1.0, 2.0]);
    }

    #[test]
    fn identity_leaves_input_unchanged() {
        let x = [5.0, 20.0, 5000.0];
        assert_eq!(StandardScaler::identity().transform(&x), x);
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        assert!(StandardScaler::new([f64::NAN, 0.0, 0.0], [1.0; 3]).is_err());
    }

    #[test]
    fn json_accepts_python_attribute_names() {
        let sc = StandardScaler::from_json(r#"{"mean_": [1, 2, 3], "scale_": [1, 1, 1]}"#).unwrap();
        assert_eq!(sc.center, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn json_with_wrong_dimension_is_rejected() {
        let err = StandardScaler::from_json(r#"{"center": [1, 2], "scale": [1, 1, 1]}"#).unwrap_err();
        assert_eq!(
            err,
            ShopperError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }
}
