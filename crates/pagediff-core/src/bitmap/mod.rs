//! Bitmap - The RGBA raster container
//!
//! The `Bitmap` structure is the page image exchanged between the
//! rasterization collaborator, the comparator and the codec crate.
//!
//! # Pixel layout
//!
//! - Image data is stored as bytes, 4 per pixel, in `[R, G, B, A]` order
//! - Rows are stored top-to-bottom with no padding
//! - The buffer length is always exactly `width * height * 4`
//!
//! # Ownership model
//!
//! `Bitmap` uses `Arc` for cheap cloning (shared ownership), so a diff
//! bitmap can be handed to the caller and kept around without copying.
//! To modify pixel data, copy into a `BitmapMut` with [`Bitmap::to_mut`]
//! or start from [`BitmapMut::new`], then convert back with `Into<Bitmap>`.

mod access;
mod scale;

use crate::color::BYTES_PER_PIXEL;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Image container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// TIFF format (possibly multi-page)
    Tiff,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Tiff => "tif",
        }
    }
}

/// Internal bitmap data
#[derive(Debug, PartialEq, Eq)]
struct BitmapData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// RGBA bytes, row-major
    data: Vec<u8>,
}

impl BitmapData {
    fn zeroed(width: u32, height: u32) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        Ok(BitmapData {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Compute the buffer length for the given dimensions.
    ///
    /// Uses checked arithmetic so oversized pages are rejected instead of
    /// wrapping.
    fn byte_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::InvalidDimension { width, height })
    }
}

/// Bitmap - RGBA page image
///
/// # Examples
///
/// ```
/// use pagediff_core::Bitmap;
///
/// let bitmap = Bitmap::new(640, 480).unwrap();
/// assert_eq!(bitmap.width(), 640);
/// assert_eq!(bitmap.height(), 480);
/// assert_eq!(bitmap.data().len(), 640 * 480 * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    inner: Arc<BitmapData>,
}

impl Bitmap {
    /// Create a new fully transparent bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(BitmapMut::new(width, height)?.into())
    }

    /// Create a bitmap with every pixel set to `rgba`.
    pub fn new_filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let mut bm = BitmapMut::new(width, height)?;
        bm.fill(rgba);
        Ok(bm.into())
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSize`] if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = BitmapData::byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Bitmap {
            inner: Arc::new(BitmapData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the bitmap width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the bitmap height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw access to the RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Check if two bitmaps have the same width and height.
    pub fn sizes_equal(&self, other: &Bitmap) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Create a mutable copy of this bitmap.
    pub fn to_mut(&self) -> BitmapMut {
        BitmapMut {
            inner: BitmapData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable bitmap
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Bitmap`] using `Into<Bitmap>`.
#[derive(Debug)]
pub struct BitmapMut {
    inner: BitmapData,
}

impl BitmapMut {
    /// Create a new fully transparent mutable bitmap.
    ///
    /// The whole `width * height * 4` buffer is allocated up front.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(BitmapMut {
            inner: BitmapData::zeroed(width, height)?,
        })
    }

    /// Get the bitmap width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the bitmap height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Get raw access to the RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every pixel to `rgba`.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.inner.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }
}

impl From<BitmapMut> for Bitmap {
    fn from(bm: BitmapMut) -> Self {
        Bitmap {
            inner: Arc::new(bm.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_creation() {
        let bm = Bitmap::new(100, 200).unwrap();
        assert_eq!(bm.width(), 100);
        assert_eq!(bm.height(), 200);
        assert_eq!(bm.stride(), 400);
        assert_eq!(bm.data().len(), 100 * 200 * 4);
        assert!(bm.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bitmap_creation_invalid() {
        assert!(matches!(
            Bitmap::new(0, 100),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Bitmap::new(100, 0).is_err());
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_ok());
        match Bitmap::from_rgba(2, 2, vec![0; 15]) {
            Err(Error::BufferSize { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_new_filled() {
        let bm = Bitmap::new_filled(3, 2, [1, 2, 3, 4]).unwrap();
        for px in bm.data().chunks_exact(4) {
            assert_eq!(px, [1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_bitmap_clone_shares_data() {
        let bm1 = Bitmap::new(10, 10).unwrap();
        let bm2 = bm1.clone();
        assert_eq!(bm1.data().as_ptr(), bm2.data().as_ptr());
    }

    #[test]
    fn test_to_mut_copies() {
        let bm = Bitmap::new_filled(2, 2, [5, 5, 5, 255]).unwrap();
        let mut copy = bm.to_mut();
        copy.fill([0, 0, 0, 0]);
        assert_eq!(&bm.data()[..4], &[5, 5, 5, 255]);
        assert_eq!(&copy.data()[..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_row_data() {
        let mut data = vec![0u8; 2 * 3 * 4];
        data[8..16].fill(7);
        let bm = Bitmap::from_rgba(2, 3, data).unwrap();
        assert!(bm.row_data(0).iter().all(|&b| b == 0));
        assert!(bm.row_data(1).iter().all(|&b| b == 7));
        assert_eq!(bm.row_data(1).len(), 8);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Tiff.extension(), "tif");
    }
}
