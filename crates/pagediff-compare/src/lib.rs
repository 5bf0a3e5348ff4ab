//! pagediff-compare - Perceptual pixel comparator
//!
//! This crate decides whether two equally-sized bitmaps are visually
//! equivalent and produces a highlighted diff bitmap:
//!
//! - **Comparison** ([`pixelmatch`]): YIQ color distance, threshold test,
//!   diff synthesis
//! - **Anti-aliasing** ([`antialias`]): detection of edge-smoothing noise
//! - **Options** ([`options`]): tunables, defaults and JSON overrides
//!
//! # Example
//!
//! ```
//! use pagediff_compare::{ComparisonOptions, compare_page_bitmaps};
//! use pagediff_core::Bitmap;
//!
//! let a = Bitmap::new_filled(16, 16, [255, 255, 255, 255]).unwrap();
//! let b = a.clone();
//! let result = compare_page_bitmaps(&a, &b, &ComparisonOptions::default()).unwrap();
//! assert!(result.is_equal());
//! ```

pub mod antialias;
mod error;
pub mod options;
pub mod pixelmatch;

pub use error::{CompareError, CompareResult};
pub use options::{ComparisonOptions, ComparisonOverrides, Rgb};
pub use pixelmatch::{MatchOutput, PixelComparison, compare_page_bitmaps, pixel_delta, pixel_match};
