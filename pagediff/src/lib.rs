//! pagediff - Perceptual page comparison for paginated documents
//!
//! Decides whether two versions of a multi-page document look the same
//! and, when they do not, produces a highlighted diff image per page.
//!
//! # Overview
//!
//! - Bitmap container and YIQ color math (re-exported at the root)
//! - Bitmap codecs for PNG and multi-page TIFF ([`io`])
//! - Perceptual pixel comparator with anti-aliasing tolerance ([`compare`])
//! - Page alignment and verdict aggregation ([`doc`])
//!
//! # Example
//!
//! ```
//! use pagediff::{Bitmap, ComparisonOptions, compare_pages};
//!
//! let white = Bitmap::new_filled(32, 32, [255, 255, 255, 255]).unwrap();
//! let mut marked = white.to_mut();
//! marked.set_pixel(10, 10, [0, 0, 0, 255]).unwrap();
//! let marked: Bitmap = marked.into();
//!
//! let result = compare_pages(
//!     &[white.clone(), white.clone()],
//!     &[white, marked],
//!     &ComparisonOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(result.diffs()[0].page_number, 2);
//! assert_eq!(result.diffs()[0].diff_pixels(), 1);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pagediff_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pagediff_compare as compare;
pub use pagediff_doc as doc;
pub use pagediff_io as io;

// Entry points
pub use pagediff_compare::{
    ComparisonOptions, ComparisonOverrides, PixelComparison, Rgb, compare_page_bitmaps,
    pixel_match,
};
pub use pagediff_doc::{
    DocumentComparison, DocumentDiffer, DocumentOptions, DocumentOverrides, ImageRasterizer,
    PageDiff, PageDiffKind, PageFailurePolicy, compare_documents, compare_pages,
};
