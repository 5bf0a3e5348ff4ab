//! Document comparison options

use crate::error::{DiffError, DiffResult};
use pagediff_compare::{ComparisonOptions, ComparisonOverrides, Rgb};
use serde::{Deserialize, Serialize};

/// What to do when a page cannot be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageFailurePolicy {
    /// Abort the whole comparison with [`DiffError::PageRender`]
    #[default]
    Abort,
    /// Record the page as a `RenderFailed` difference and continue
    ReportAsDiff,
}

/// Options for a document comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOptions {
    /// Render scale handed to the rasterizer (finite, > 0)
    pub scale: f32,
    /// Pixel comparator options, applied to every page
    pub comparison: ComparisonOptions,
    /// Handling of per-page render failures
    pub page_failure: PageFailurePolicy,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            comparison: ComparisonOptions::default(),
            page_failure: PageFailurePolicy::Abort,
        }
    }
}

impl DocumentOptions {
    /// Check every field, including the comparator options.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidOptions`]; nothing is clamped.
    pub fn validate(&self) -> DiffResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DiffError::InvalidOptions(format!(
                "scale must be finite and positive, got {}",
                self.scale
            )));
        }
        self.comparison
            .validate()
            .map_err(|e| DiffError::InvalidOptions(e.to_string()))
    }
}

/// Partial [`DocumentOptions`]
///
/// The JSON form is flat: comparator keys sit next to `scale` and
/// `pageFailure`, e.g. `{"scale": 2.0, "threshold": 0.05,
/// "pageFailure": "reportAsDiff"}`. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentOverrides {
    pub scale: Option<f32>,
    pub page_failure: Option<PageFailurePolicy>,
    pub threshold: Option<f64>,
    pub include_anti_aliasing: Option<bool>,
    pub diff_alpha: Option<f64>,
    pub anti_aliasing_color: Option<Rgb>,
    pub diff_color: Option<Rgb>,
    pub diff_color_alt: Option<Rgb>,
    pub include_diff_mask: Option<bool>,
}

impl DocumentOverrides {
    /// Parse overrides from JSON text.
    pub fn from_json(text: &str) -> DiffResult<Self> {
        serde_json::from_str(text).map_err(|e| DiffError::InvalidOptions(e.to_string()))
    }

    /// The comparator part of these overrides.
    pub fn comparison(&self) -> ComparisonOverrides {
        ComparisonOverrides {
            threshold: self.threshold,
            include_anti_aliasing: self.include_anti_aliasing,
            diff_alpha: self.diff_alpha,
            anti_aliasing_color: self.anti_aliasing_color,
            diff_color: self.diff_color,
            diff_color_alt: self.diff_color_alt,
            include_diff_mask: self.include_diff_mask,
        }
    }

    /// Merge onto `base` and validate the result.
    pub fn apply_to(&self, base: &DocumentOptions) -> DiffResult<DocumentOptions> {
        let comparison = self
            .comparison()
            .apply_to(&base.comparison)
            .map_err(|e| DiffError::InvalidOptions(e.to_string()))?;
        let merged = DocumentOptions {
            scale: self.scale.unwrap_or(base.scale),
            comparison,
            page_failure: self.page_failure.unwrap_or(base.page_failure),
        };
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DocumentOptions::default();
        assert_eq!(opts.scale, 1.0);
        assert_eq!(opts.page_failure, PageFailurePolicy::Abort);
        assert_eq!(opts.comparison, ComparisonOptions::default());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_flat_json_overrides() {
        let ov = DocumentOverrides::from_json(
            r#"{"scale": 2.0, "threshold": 0.05, "pageFailure": "reportAsDiff",
                "antiAliasingColor": [0, 255, 255]}"#,
        )
        .unwrap();
        let opts = ov.apply_to(&DocumentOptions::default()).unwrap();
        assert_eq!(opts.scale, 2.0);
        assert_eq!(opts.comparison.threshold, 0.05);
        assert_eq!(opts.comparison.anti_aliasing_color, Rgb::new(0, 255, 255));
        assert_eq!(opts.page_failure, PageFailurePolicy::ReportAsDiff);
    }

    #[test]
    fn test_invalid_scale() {
        for scale in [0.0, -1.0, f32::NAN] {
            let ov = DocumentOverrides {
                scale: Some(scale),
                ..Default::default()
            };
            assert!(matches!(
                ov.apply_to(&DocumentOptions::default()),
                Err(DiffError::InvalidOptions(_))
            ));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DocumentOverrides::from_json(r#"{"dpi": 300}"#).is_err());
        assert!(DocumentOverrides::from_json(r#"{"pageFailure": "retry"}"#).is_err());
    }

    #[test]
    fn test_comparator_range_checked() {
        let ov = DocumentOverrides::from_json(r#"{"diffAlpha": -0.5}"#).unwrap();
        assert!(ov.apply_to(&DocumentOptions::default()).is_err());
    }
}
