//! Comparison options
//!
//! [`ComparisonOptions`] carries the tunables of the pixel comparator with
//! documented defaults. [`ComparisonOverrides`] is its partial form: every
//! field optional, deserializable from camelCase JSON, merged onto a base
//! value with [`ComparisonOverrides::apply_to`].

use crate::error::{CompareError, CompareResult};
use serde::{Deserialize, Serialize};

/// An opaque RGB color, written as `[r, g, b]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure red
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Pure yellow
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// The color as an opaque RGBA pixel.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Options for the pixel comparator
///
/// # Defaults
///
/// | field | default |
/// |---|---|
/// | `threshold` | 0.1 |
/// | `include_anti_aliasing` | false |
/// | `diff_alpha` | 0.1 |
/// | `anti_aliasing_color` | yellow |
/// | `diff_color` | red |
/// | `diff_color_alt` | red |
/// | `include_diff_mask` | false |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOptions {
    /// Normalized perceptual distance (0..=1) a pixel must exceed to count
    /// as different. Smaller is more sensitive.
    pub threshold: f64,
    /// Count anti-aliasing differences instead of tolerating them
    pub include_anti_aliasing: bool,
    /// Opacity (0..=1) of the faded original drawn under unchanged pixels
    pub diff_alpha: f64,
    /// Color of tolerated anti-aliasing pixels in the diff
    pub anti_aliasing_color: Rgb,
    /// Color of differing pixels where the second image is brighter
    pub diff_color: Rgb,
    /// Color of differing pixels where the first image is brighter
    pub diff_color_alt: Rgb,
    /// Draw only differences on a transparent background
    pub include_diff_mask: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            include_anti_aliasing: false,
            diff_alpha: 0.1,
            anti_aliasing_color: Rgb::YELLOW,
            diff_color: Rgb::RED,
            diff_color_alt: Rgb::RED,
            include_diff_mask: false,
        }
    }
}

fn check_unit_range(name: &'static str, value: f64) -> CompareResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CompareError::InvalidOption {
            name,
            value: value.to_string(),
            reason: "must be within 0..=1",
        })
    }
}

impl ComparisonOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set whether anti-aliasing differences are counted.
    pub fn with_anti_aliasing(mut self, include: bool) -> Self {
        self.include_anti_aliasing = include;
        self
    }

    /// Set whether the diff is drawn as a mask.
    pub fn with_diff_mask(mut self, mask: bool) -> Self {
        self.include_diff_mask = mask;
        self
    }

    /// Set both difference colors.
    pub fn with_diff_colors(mut self, color: Rgb, alt: Rgb) -> Self {
        self.diff_color = color;
        self.diff_color_alt = alt;
        self
    }

    /// Check that every numeric field is within range.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidOption`] naming the first bad field.
    /// Values are never clamped.
    pub fn validate(&self) -> CompareResult<()> {
        check_unit_range("threshold", self.threshold)?;
        check_unit_range("diffAlpha", self.diff_alpha)?;
        Ok(())
    }

    /// Largest squared YIQ distance still considered equal.
    #[inline]
    pub(crate) fn max_delta(&self) -> f64 {
        pagediff_core::color::MAX_YIQ_DELTA * self.threshold * self.threshold
    }
}

/// Partial [`ComparisonOptions`]
///
/// Deserializes from JSON such as
/// `{"threshold": 0.2, "diffColor": [0, 0, 255]}`. Unknown keys are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComparisonOverrides {
    pub threshold: Option<f64>,
    pub include_anti_aliasing: Option<bool>,
    pub diff_alpha: Option<f64>,
    pub anti_aliasing_color: Option<Rgb>,
    pub diff_color: Option<Rgb>,
    pub diff_color_alt: Option<Rgb>,
    pub include_diff_mask: Option<bool>,
}

impl ComparisonOverrides {
    /// Parse overrides from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidOverrides`] for malformed JSON, wrong
    /// value types and unknown keys.
    pub fn from_json(text: &str) -> CompareResult<Self> {
        serde_json::from_str(text).map_err(|e| CompareError::InvalidOverrides(e.to_string()))
    }

    /// Merge onto `base`, field by field, and validate the result.
    pub fn apply_to(&self, base: &ComparisonOptions) -> CompareResult<ComparisonOptions> {
        let merged = ComparisonOptions {
            threshold: self.threshold.unwrap_or(base.threshold),
            include_anti_aliasing: self
                .include_anti_aliasing
                .unwrap_or(base.include_anti_aliasing),
            diff_alpha: self.diff_alpha.unwrap_or(base.diff_alpha),
            anti_aliasing_color: self.anti_aliasing_color.unwrap_or(base.anti_aliasing_color),
            diff_color: self.diff_color.unwrap_or(base.diff_color),
            diff_color_alt: self.diff_color_alt.unwrap_or(base.diff_color_alt),
            include_diff_mask: self.include_diff_mask.unwrap_or(base.include_diff_mask),
        };
        merged.validate()?;
        Ok(merged)
    }
}
