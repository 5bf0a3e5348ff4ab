//! pagediff-io - Bitmap codecs
//!
//! This crate reads and writes the raster formats pagediff works with:
//!
//! - **PNG** ([`png`]): single-page input, and the encoding used for
//!   serialized diff bitmaps
//! - **TIFF** ([`tiff`]): multi-page raster documents, one page per IFD
//!
//! Formats are detected from magic numbers ([`format`]), never from file
//! extensions. All decoders normalize to 8-bit RGBA.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::detect_format_from_bytes;
pub use pagediff_core::ImageFormat;

#[cfg(feature = "png-format")]
pub use png::encode_png;

use pagediff_core::Bitmap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Read a single image from a file path.
///
/// For a multi-page TIFF only the first page is returned; use
/// [`read_pages`] to get all of them.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let data = fs::read(path)?;
    read_image_mem(&data)
}

/// Read a single image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Bitmap> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(Cursor::new(data)),
        other => Err(unsupported(other)),
    }
}

/// Read every page of an image file.
///
/// PNG files yield exactly one page.
pub fn read_pages<P: AsRef<Path>>(path: P) -> IoResult<Vec<Bitmap>> {
    let data = fs::read(path)?;
    read_pages_mem(&data)
}

/// Read every page of an in-memory image.
pub fn read_pages_mem(data: &[u8]) -> IoResult<Vec<Bitmap>> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => Ok(vec![png::read_png(Cursor::new(data))?]),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff_pages(Cursor::new(data)),
        other => Err(unsupported(other)),
    }
}

/// Count the pages of an in-memory image without decoding pixel data.
///
/// PNG files have exactly one page.
pub fn page_count_mem(data: &[u8]) -> IoResult<usize> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => Ok(1),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::tiff_page_count(Cursor::new(data)),
        other => Err(unsupported(other)),
    }
}

/// Decode page `index` (0-based) of an in-memory image.
pub fn read_page_mem(data: &[u8], index: usize) -> IoResult<Bitmap> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png if index == 0 => png::read_png(Cursor::new(data)),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => Err(IoError::InvalidData(format!(
            "PNG has a single page, requested index {}",
            index
        ))),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff_page(Cursor::new(data), index),
        other => Err(unsupported(other)),
    }
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(bitmap: &Bitmap, path: P, format: ImageFormat) -> IoResult<()> {
    let data = write_image_mem(bitmap, format)?;
    fs::write(path, data)?;
    Ok(())
}

/// Encode an image to memory in the given format.
pub fn write_image_mem(bitmap: &Bitmap, format: ImageFormat) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::encode_png(bitmap),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => {
            let mut buffer = Cursor::new(Vec::new());
            tiff::write_tiff(bitmap, &mut buffer)?;
            Ok(buffer.into_inner())
        }
        other => Err(unsupported(other)),
    }
}

/// Write several pages into one multi-page TIFF file.
#[cfg(feature = "tiff-format")]
pub fn write_pages<P: AsRef<Path>>(pages: &[&Bitmap], path: P) -> IoResult<()> {
    let mut buffer = Cursor::new(Vec::new());
    tiff::write_tiff_pages(pages, &mut buffer)?;
    fs::write(path, buffer.into_inner())?;
    Ok(())
}

fn unsupported(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!("{:?} support is not enabled", format))
}
