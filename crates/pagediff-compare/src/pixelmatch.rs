//! Perceptual pixel comparison
//!
//! Compares two equally-sized RGBA bitmaps in YIQ space and synthesizes a
//! diff bitmap:
//!
//! - pixels within the threshold are drawn as a faded grayscale copy of the
//!   first image (transparent in mask mode)
//! - anti-aliasing differences are drawn in `anti_aliasing_color` and not
//!   counted (not drawn in mask mode)
//! - real differences are drawn in `diff_color`, or `diff_color_alt` when
//!   the first image is the brighter one
//!
//! Rows are processed in parallel; every pixel is computed independently,
//! so the result does not depend on how rows are scheduled.

use crate::antialias::is_antialiased;
use crate::error::{CompareError, CompareResult};
use crate::options::ComparisonOptions;
use pagediff_core::color::{
    ALPHA, BYTES_PER_PIXEL, MAX_YIQ_DELTA, blend_with_white, rgb_to_y, yiq_delta,
};
use pagediff_core::{Bitmap, BitmapMut};
use rayon::prelude::*;
use tracing::debug;

/// Raw comparator output
///
/// The diff bitmap is always synthesized, even when no pixel differs.
#[derive(Debug, Clone)]
pub struct MatchOutput {
    /// Highlighted diff image, same size as the inputs
    pub diff: Bitmap,
    /// Number of pixels counted as different
    pub diff_pixels: u64,
    /// Number of differing pixels tolerated as anti-aliasing
    pub anti_aliased_pixels: u64,
}

/// Verdict for one pair of bitmaps
#[derive(Debug, Clone)]
pub enum PixelComparison {
    /// No pixel exceeded the threshold (anti-aliasing tolerated)
    Equal,
    /// At least one pixel differs
    NotEqual {
        /// Highlighted diff image
        diff: Bitmap,
        /// Number of differing pixels, always > 0
        diff_pixels: u64,
    },
}

impl PixelComparison {
    /// Check whether the bitmaps were judged equal.
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    /// Get the diff bitmap, if the bitmaps differ.
    pub fn diff(&self) -> Option<&Bitmap> {
        match self {
            Self::Equal => None,
            Self::NotEqual { diff, .. } => Some(diff),
        }
    }

    /// Number of differing pixels (0 when equal).
    pub fn diff_pixels(&self) -> u64 {
        match self {
            Self::Equal => 0,
            Self::NotEqual { diff_pixels, .. } => *diff_pixels,
        }
    }
}

impl From<MatchOutput> for PixelComparison {
    fn from(out: MatchOutput) -> Self {
        if out.diff_pixels == 0 {
            PixelComparison::Equal
        } else {
            PixelComparison::NotEqual {
                diff: out.diff,
                diff_pixels: out.diff_pixels,
            }
        }
    }
}

/// Signed perceptual distance between two pixels.
///
/// The magnitude is the larger of the YIQ distance and the alpha term
/// `(Δα/255)² · 35215`, so a fully transparent pixel is maximally distant
/// from a fully opaque one whatever their RGB. The sign is negative when
/// `a` is brighter than `b`.
pub fn pixel_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
    if a == b {
        return 0.0;
    }
    let yiq = yiq_delta(a, b);
    let da = (a[ALPHA] as f64 - b[ALPHA] as f64) / 255.0;
    let alpha_term = da * da * MAX_YIQ_DELTA;
    if alpha_term > yiq.abs() {
        if yiq < 0.0 { -alpha_term } else { alpha_term }
    } else {
        yiq
    }
}

/// Faded grayscale rendering of an unchanged pixel (opaque).
#[inline]
fn gray_pixel(px: [u8; 4], diff_alpha: f64) -> [u8; 4] {
    let y = rgb_to_y(px[0] as f64, px[1] as f64, px[2] as f64);
    let val = blend_with_white(y, diff_alpha * px[ALPHA] as f64 / 255.0).clamp(0.0, 255.0);
    let val = val as u8;
    [val, val, val, 255]
}

fn check_sizes(a: &Bitmap, b: &Bitmap) -> CompareResult<()> {
    if a.sizes_equal(b) {
        Ok(())
    } else {
        Err(CompareError::DimensionMismatch {
            first: a.dimensions(),
            second: b.dimensions(),
        })
    }
}

/// Shared per-call state for the row workers.
struct RowContext<'a> {
    a: &'a Bitmap,
    b: &'a Bitmap,
    options: &'a ComparisonOptions,
    max_delta: f64,
    diff_rgba: [u8; 4],
    diff_alt_rgba: [u8; 4],
    aa_rgba: [u8; 4],
}

impl RowContext<'_> {
    /// Fill one output row; returns `(diff_pixels, anti_aliased_pixels)`.
    fn process_row(&self, y: u32, out: &mut [u8]) -> (u64, u64) {
        let mask = self.options.include_diff_mask;
        let row_a = self.a.row_data(y);
        let row_b = self.b.row_data(y);
        let mut diff = 0u64;
        let mut aa = 0u64;

        for (x, dst) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let pos = x * BYTES_PER_PIXEL;
            let pa = [row_a[pos], row_a[pos + 1], row_a[pos + 2], row_a[pos + 3]];
            let pb = [row_b[pos], row_b[pos + 1], row_b[pos + 2], row_b[pos + 3]];

            let delta = pixel_delta(pa, pb);

            if delta.abs() > self.max_delta {
                let x = x as u32;
                if !self.options.include_anti_aliasing
                    && (is_antialiased(self.a, self.b, x, y)
                        || is_antialiased(self.b, self.a, x, y))
                {
                    aa += 1;
                    if !mask {
                        dst.copy_from_slice(&self.aa_rgba);
                    }
                } else {
                    diff += 1;
                    let color = if delta < 0.0 {
                        self.diff_alt_rgba
                    } else {
                        self.diff_rgba
                    };
                    dst.copy_from_slice(&color);
                }
            } else if !mask {
                dst.copy_from_slice(&gray_pixel(pa, self.options.diff_alpha));
            }
        }

        (diff, aa)
    }
}

/// Compare two bitmaps pixel by pixel and synthesize the diff.
///
/// # Arguments
///
/// * `a` - First bitmap; its faded copy is the diff background
/// * `b` - Second bitmap, same size as `a`
/// * `options` - Comparator options
///
/// # Errors
///
/// Returns [`CompareError::InvalidOption`] for out-of-range options and
/// [`CompareError::DimensionMismatch`] if the sizes differ.
pub fn pixel_match(
    a: &Bitmap,
    b: &Bitmap,
    options: &ComparisonOptions,
) -> CompareResult<MatchOutput> {
    options.validate()?;
    check_sizes(a, b)?;

    // unpainted pixels stay transparent; that is the mask background
    let mut out = BitmapMut::new(a.width(), a.height())?;
    let stride = out.stride();

    let ctx = RowContext {
        a,
        b,
        options,
        max_delta: options.max_delta(),
        diff_rgba: options.diff_color.to_rgba(),
        diff_alt_rgba: options.diff_color_alt.to_rgba(),
        aa_rgba: options.anti_aliasing_color.to_rgba(),
    };

    let (diff_pixels, anti_aliased_pixels) = out
        .data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .map(|(y, row)| ctx.process_row(y as u32, row))
        .reduce(|| (0, 0), |l, r| (l.0 + r.0, l.1 + r.1));

    Ok(MatchOutput {
        diff: out.into(),
        diff_pixels,
        anti_aliased_pixels,
    })
}

/// Decide whether two page bitmaps are visually equal.
///
/// Byte-identical inputs return [`PixelComparison::Equal`] without
/// allocating a diff bitmap. Otherwise runs [`pixel_match`] and keeps the
/// diff only when at least one pixel is counted as different.
///
/// # Errors
///
/// Same as [`pixel_match`].
pub fn compare_page_bitmaps(
    a: &Bitmap,
    b: &Bitmap,
    options: &ComparisonOptions,
) -> CompareResult<PixelComparison> {
    options.validate()?;
    check_sizes(a, b)?;

    if a.data() == b.data() {
        debug!(
            width = a.width(),
            height = a.height(),
            "identical bitmaps, skipping pixel match"
        );
        return Ok(PixelComparison::Equal);
    }

    let out = pixel_match(a, b, options)?;
    debug!(
        diff_pixels = out.diff_pixels,
        anti_aliased_pixels = out.anti_aliased_pixels,
        "pixel match done"
    );
    Ok(out.into())
}
