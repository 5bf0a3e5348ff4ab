//! Document comparison results

use crate::error::DocumentSide;
use pagediff_core::Bitmap;
use pagediff_io::IoResult;

/// Why a page pair was reported as different
#[derive(Debug, Clone)]
pub enum PageDiffKind {
    /// The comparator found differing pixels
    Pixels {
        /// Highlighted diff image
        diff: Bitmap,
        /// Number of differing pixels
        diff_pixels: u64,
    },
    /// The two pages have different sizes; no diff image exists
    DimensionMismatch {
        /// `(width, height)` of the first document's page
        first: (u32, u32),
        /// `(width, height)` of the second document's page
        second: (u32, u32),
    },
    /// A page could not be rendered (only with
    /// [`PageFailurePolicy::ReportAsDiff`](crate::PageFailurePolicy::ReportAsDiff))
    RenderFailed {
        /// Document whose page failed first
        side: DocumentSide,
        /// Collaborator error message
        message: String,
    },
}

/// One differing page pair
#[derive(Debug, Clone)]
pub struct PageDiff {
    /// 1-based page number
    pub page_number: usize,
    pub kind: PageDiffKind,
}

impl PageDiff {
    /// Get the diff bitmap, if the comparator produced one.
    pub fn diff(&self) -> Option<&Bitmap> {
        match &self.kind {
            PageDiffKind::Pixels { diff, .. } => Some(diff),
            _ => None,
        }
    }

    /// Number of differing pixels (0 unless the comparator ran).
    pub fn diff_pixels(&self) -> u64 {
        match &self.kind {
            PageDiffKind::Pixels { diff_pixels, .. } => *diff_pixels,
            _ => 0,
        }
    }

    /// Encode the diff bitmap as PNG.
    ///
    /// Returns `Ok(None)` for pages without a diff bitmap.
    pub fn encode_png(&self) -> IoResult<Option<Vec<u8>>> {
        self.diff().map(pagediff_io::encode_png).transpose()
    }
}

/// Verdict for a pair of documents
#[derive(Debug, Clone)]
pub enum DocumentComparison {
    /// Same page count and every aligned page pair is equal
    Equal,
    /// Something differs
    NotEqual {
        /// Differing page pairs in increasing page order; may be empty
        /// when only the page count differs
        diffs: Vec<PageDiff>,
        /// The documents have different page counts
        page_count_mismatch: bool,
    },
}

impl DocumentComparison {
    /// Build the verdict from the collected page diffs.
    pub fn from_parts(diffs: Vec<PageDiff>, page_count_mismatch: bool) -> Self {
        if diffs.is_empty() && !page_count_mismatch {
            DocumentComparison::Equal
        } else {
            DocumentComparison::NotEqual {
                diffs,
                page_count_mismatch,
            }
        }
    }

    /// Check whether the documents were judged equal.
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    /// Get the page diffs (empty when equal).
    pub fn diffs(&self) -> &[PageDiff] {
        match self {
            Self::Equal => &[],
            Self::NotEqual { diffs, .. } => diffs,
        }
    }

    /// Whether the page counts differ.
    pub fn page_count_mismatch(&self) -> bool {
        match self {
            Self::Equal => false,
            Self::NotEqual {
                page_count_mismatch,
                ..
            } => *page_count_mismatch,
        }
    }

    /// Number of differing page pairs.
    pub fn diff_page_count(&self) -> usize {
        self.diffs().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert!(DocumentComparison::from_parts(vec![], false).is_equal());

        let only_count = DocumentComparison::from_parts(vec![], true);
        assert!(!only_count.is_equal());
        assert!(only_count.page_count_mismatch());
        assert!(only_count.diffs().is_empty());
    }

    #[test]
    fn test_encode_png() {
        let diff = Bitmap::new_filled(3, 3, [255, 0, 0, 255]).unwrap();
        let page = PageDiff {
            page_number: 2,
            kind: PageDiffKind::Pixels {
                diff: diff.clone(),
                diff_pixels: 9,
            },
        };
        let png = page.encode_png().unwrap().unwrap();
        assert_eq!(pagediff_io::read_image_mem(&png).unwrap(), diff);

        let mismatch = PageDiff {
            page_number: 1,
            kind: PageDiffKind::DimensionMismatch {
                first: (3, 3),
                second: (4, 3),
            },
        };
        assert!(mismatch.encode_png().unwrap().is_none());
        assert_eq!(mismatch.diff_pixels(), 0);
    }
}
