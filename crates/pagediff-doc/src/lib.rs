//! pagediff-doc - Document-level visual diff
//!
//! This crate compares two paginated documents page by page:
//!
//! - **Differ** ([`differ`]): page alignment, page-count mismatch detection,
//!   per-page comparison and aggregation into a single verdict
//! - **Rasterization** ([`raster`]): the collaborator contract that turns
//!   document bytes into page bitmaps, plus [`ImageRasterizer`] for TIFF
//!   and PNG documents
//! - **Options** ([`options`]): render scale, comparator options and the
//!   page failure policy
//! - **Results** ([`result`]): [`DocumentComparison`] and [`PageDiff`]
//!
//! # Example
//!
//! ```no_run
//! use pagediff_doc::{DocumentOverrides, ImageRasterizer, compare_documents};
//!
//! let before = std::fs::read("before.tif").unwrap();
//! let after = std::fs::read("after.tif").unwrap();
//! let overrides = DocumentOverrides::from_json(r#"{"threshold": 0.05}"#).unwrap();
//! let result = compare_documents(&ImageRasterizer, &before, &after, &overrides).unwrap();
//! for page in result.diffs() {
//!     if let Some(png) = page.encode_png().unwrap() {
//!         std::fs::write(format!("diff-{}.png", page.page_number), png).unwrap();
//!     }
//! }
//! ```

pub mod differ;
mod error;
pub mod options;
pub mod raster;
pub mod result;

pub use differ::{DocumentDiffer, compare_documents, compare_pages};
pub use error::{DiffError, DiffResult, DocumentSide, RasterError, RasterResult};
pub use options::{DocumentOptions, DocumentOverrides, PageFailurePolicy};
pub use raster::{ImageDocument, ImageRasterizer, RasterDocument, Rasterizer};
pub use result::{DocumentComparison, PageDiff, PageDiffKind};
