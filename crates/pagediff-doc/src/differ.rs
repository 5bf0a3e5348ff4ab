//! Document differ
//!
//! Aligns two paginated documents by position, compares each aligned page
//! pair with the pixel comparator and folds the per-page outcomes into a
//! single [`DocumentComparison`].
//!
//! # Alignment
//!
//! Page `i` of the first document is compared with page `i` of the second,
//! for `i < min(count_a, count_b)`. Extra pages are not rendered or
//! compared; they only set `page_count_mismatch`.
//!
//! # Concurrency
//!
//! Page pairs are processed on the rayon pool. Results are collected in
//! page order, so the diff list is always sorted by page number.

use crate::error::{DiffError, DiffResult, DocumentSide, RasterError};
use crate::options::{DocumentOptions, DocumentOverrides, PageFailurePolicy};
use crate::raster::{RasterDocument, Rasterizer};
use crate::result::{DocumentComparison, PageDiff, PageDiffKind};
use pagediff_compare::{ComparisonOptions, PixelComparison, compare_page_bitmaps};
use pagediff_core::Bitmap;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Configured document comparison
///
/// # Examples
///
/// ```
/// use pagediff_core::Bitmap;
/// use pagediff_doc::{DocumentDiffer, DocumentOptions, ImageRasterizer};
///
/// let differ = DocumentDiffer::new(ImageRasterizer, DocumentOptions::default()).unwrap();
/// let page = Bitmap::new_filled(8, 8, [255, 255, 255, 255]).unwrap();
/// let result = differ.compare_pages(&[page.clone()], &[page]).unwrap();
/// assert!(result.is_equal());
/// ```
pub struct DocumentDiffer<R> {
    rasterizer: R,
    options: DocumentOptions,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R: Rasterizer> DocumentDiffer<R> {
    /// Create a differ.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidOptions`] if `options` do not validate.
    pub fn new(rasterizer: R, options: DocumentOptions) -> DiffResult<Self> {
        options.validate()?;
        Ok(Self {
            rasterizer,
            options,
            cancel: None,
        })
    }

    /// Attach a cancel flag.
    ///
    /// Once the flag is set, page work that has not started yet is skipped
    /// and the comparison returns [`DiffError::Cancelled`].
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Get the options.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Compare two documents given as bytes.
    ///
    /// Both documents are opened before any page is rendered, so input
    /// errors surface as [`DiffError::DocumentLoad`] without partial work.
    ///
    /// # Errors
    ///
    /// - [`DiffError::DocumentLoad`] if either document cannot be opened
    /// - [`DiffError::PageRender`] if a page fails to render under
    ///   [`PageFailurePolicy::Abort`]
    /// - [`DiffError::PageCompare`] if the comparator fails
    /// - [`DiffError::Cancelled`] if the cancel flag is set
    pub fn compare_documents(
        &self,
        doc_a: &[u8],
        doc_b: &[u8],
    ) -> DiffResult<DocumentComparison> {
        check_cancelled(self.cancel.as_deref())?;

        let first = self
            .rasterizer
            .open(doc_a)
            .map_err(|source| DiffError::DocumentLoad {
                side: DocumentSide::First,
                source,
            })?;
        let second = self
            .rasterizer
            .open(doc_b)
            .map_err(|source| DiffError::DocumentLoad {
                side: DocumentSide::Second,
                source,
            })?;

        let count_a = first.page_count();
        let count_b = second.page_count();
        let aligned = count_a.min(count_b);
        debug!(count_a, count_b, scale = self.options.scale, "documents opened");

        let options = &self.options;
        let cancel = self.cancel.as_deref();
        let results = (0..aligned)
            .into_par_iter()
            .map(|index| {
                check_cancelled(cancel)?;
                let page_number = index + 1;
                let rendered = render_pair(&first, &second, index, options.scale);
                match rendered {
                    Ok((a, b)) => compare_pair(page_number, &a, &b, &options.comparison),
                    Err((side, source)) => match options.page_failure {
                        PageFailurePolicy::Abort => Err(DiffError::PageRender {
                            side,
                            page_number,
                            source,
                        }),
                        PageFailurePolicy::ReportAsDiff => {
                            warn!(
                                page_number,
                                %side,
                                error = %source,
                                "page render failed, recorded as diff"
                            );
                            Ok(Some(PageDiff {
                                page_number,
                                kind: PageDiffKind::RenderFailed {
                                    side,
                                    message: source.to_string(),
                                },
                            }))
                        }
                    },
                }
            })
            .collect::<DiffResult<Vec<_>>>()?;

        Ok(aggregate(count_a, count_b, results))
    }

    /// Compare two pre-rasterized page sequences.
    ///
    /// The pages are used as given; the scale option does not apply.
    pub fn compare_pages(
        &self,
        pages_a: &[Bitmap],
        pages_b: &[Bitmap],
    ) -> DiffResult<DocumentComparison> {
        compare_page_sequences(
            pages_a,
            pages_b,
            &self.options.comparison,
            self.cancel.as_deref(),
        )
    }
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> DiffResult<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(DiffError::Cancelled),
        _ => Ok(()),
    }
}

/// Render page `index` of both documents, first document first.
fn render_pair<D: RasterDocument>(
    first: &D,
    second: &D,
    index: usize,
    scale: f32,
) -> Result<(Bitmap, Bitmap), (DocumentSide, RasterError)> {
    let a = first
        .render_page(index, scale)
        .map_err(|e| (DocumentSide::First, e))?;
    let b = second
        .render_page(index, scale)
        .map_err(|e| (DocumentSide::Second, e))?;
    Ok((a, b))
}

/// Compare one aligned page pair; `None` means the pages are equal.
fn compare_pair(
    page_number: usize,
    a: &Bitmap,
    b: &Bitmap,
    options: &ComparisonOptions,
) -> DiffResult<Option<PageDiff>> {
    if !a.sizes_equal(b) {
        warn!(
            page_number,
            first = ?a.dimensions(),
            second = ?b.dimensions(),
            "page size mismatch"
        );
        return Ok(Some(PageDiff {
            page_number,
            kind: PageDiffKind::DimensionMismatch {
                first: a.dimensions(),
                second: b.dimensions(),
            },
        }));
    }

    let comparison = compare_page_bitmaps(a, b, options)
        .map_err(|source| DiffError::PageCompare {
            page_number,
            source,
        })?;

    match comparison {
        PixelComparison::Equal => {
            debug!(page_number, "page equal");
            Ok(None)
        }
        PixelComparison::NotEqual { diff, diff_pixels } => {
            debug!(page_number, diff_pixels, "page differs");
            Ok(Some(PageDiff {
                page_number,
                kind: PageDiffKind::Pixels { diff, diff_pixels },
            }))
        }
    }
}

fn compare_page_sequences(
    pages_a: &[Bitmap],
    pages_b: &[Bitmap],
    options: &ComparisonOptions,
    cancel: Option<&AtomicBool>,
) -> DiffResult<DocumentComparison> {
    check_cancelled(cancel)?;

    let results = pages_a
        .par_iter()
        .zip(pages_b.par_iter())
        .enumerate()
        .map(|(index, (a, b))| {
            check_cancelled(cancel)?;
            compare_pair(index + 1, a, b, options)
        })
        .collect::<DiffResult<Vec<_>>>()?;

    Ok(aggregate(pages_a.len(), pages_b.len(), results))
}

fn aggregate(
    count_a: usize,
    count_b: usize,
    results: Vec<Option<PageDiff>>,
) -> DocumentComparison {
    let page_count_mismatch = count_a != count_b;
    if page_count_mismatch {
        warn!(count_a, count_b, "page count mismatch");
    }

    let diffs: Vec<PageDiff> = results.into_iter().flatten().collect();
    info!(
        count_a,
        count_b,
        diff_pages = diffs.len(),
        page_count_mismatch,
        "document comparison done"
    );

    DocumentComparison::from_parts(diffs, page_count_mismatch)
}

/// Compare two pre-rasterized page sequences with the given comparator
/// options.
///
/// # Errors
///
/// - [`DiffError::InvalidOptions`] if `options` do not validate
/// - [`DiffError::PageCompare`] if the comparator fails on a page
pub fn compare_pages(
    pages_a: &[Bitmap],
    pages_b: &[Bitmap],
    options: &ComparisonOptions,
) -> DiffResult<DocumentComparison> {
    options
        .validate()
        .map_err(|e| DiffError::InvalidOptions(e.to_string()))?;
    compare_page_sequences(pages_a, pages_b, options, None)
}

/// Compare two documents with the default options merged with `overrides`.
///
/// # Errors
///
/// See [`DocumentDiffer::compare_documents`]; malformed or out-of-range
/// overrides fail with [`DiffError::InvalidOptions`] before any document
/// is opened.
pub fn compare_documents<R: Rasterizer>(
    rasterizer: &R,
    doc_a: &[u8],
    doc_b: &[u8],
    overrides: &DocumentOverrides,
) -> DiffResult<DocumentComparison> {
    let options = overrides.apply_to(&DocumentOptions::default())?;
    DocumentDiffer::new(rasterizer, options)?.compare_documents(doc_a, doc_b)
}
