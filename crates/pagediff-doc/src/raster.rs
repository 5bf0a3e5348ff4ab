//! Rasterization collaborator
//!
//! The differ never interprets document bytes itself. A [`Rasterizer`]
//! opens a document and a [`RasterDocument`] renders its pages to RGBA
//! bitmaps. Rendering must be deterministic for a fixed scale.
//!
//! [`ImageRasterizer`] handles documents that are already raster: a
//! multi-page TIFF (one page per directory) or a single PNG.

use crate::error::{RasterError, RasterResult};
use pagediff_core::Bitmap;
use std::sync::Arc;

/// Opens documents for rendering
pub trait Rasterizer {
    /// Opened document
    type Document: RasterDocument;

    /// Parse document bytes.
    ///
    /// # Errors
    ///
    /// Fails when the bytes are not a readable document of this kind.
    fn open(&self, data: &[u8]) -> RasterResult<Self::Document>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    type Document = R::Document;

    fn open(&self, data: &[u8]) -> RasterResult<Self::Document> {
        (**self).open(data)
    }
}

/// An opened, paginated document
///
/// Pages may be rendered from several threads at once.
pub trait RasterDocument: Sync {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Render page `index` (0-based) at `scale`.
    fn render_page(&self, index: usize, scale: f32) -> RasterResult<Bitmap>;
}

/// Rasterizer for multi-page TIFF and PNG documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRasterizer;

impl ImageRasterizer {
    pub fn new() -> Self {
        ImageRasterizer
    }
}

/// An opened raster document
///
/// Opening only checks the container and counts its pages. Each page is
/// decoded when it is rendered, so pages that are never rendered cannot
/// fail the comparison.
#[derive(Debug, Clone)]
pub struct ImageDocument {
    data: Arc<[u8]>,
    page_count: usize,
}

impl Rasterizer for ImageRasterizer {
    type Document = ImageDocument;

    fn open(&self, data: &[u8]) -> RasterResult<ImageDocument> {
        let page_count = pagediff_io::page_count_mem(data)?;
        Ok(ImageDocument {
            data: Arc::from(data),
            page_count,
        })
    }
}

impl RasterDocument for ImageDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    /// Pages at a scale other than 1.0 are resampled by nearest neighbour.
    fn render_page(&self, index: usize, scale: f32) -> RasterResult<Bitmap> {
        if index >= self.page_count {
            return Err(RasterError::PageOutOfRange {
                index,
                page_count: self.page_count,
            });
        }
        let page = pagediff_io::read_page_mem(&self.data, index)?;
        Ok(page.scale_by_sampling(scale)?)
    }
}
