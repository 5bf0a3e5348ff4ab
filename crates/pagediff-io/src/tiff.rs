//! TIFF image format support
//!
//! Multi-page TIFF is the raster document container: each IFD is one page.
//! Pages decode to RGBA8 regardless of their stored layout; writing always
//! produces uncompressed RGBA8 pages.

use crate::{IoError, IoResult};
use pagediff_core::Bitmap;
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::RGBA8;
use tiff::tags::Tag;

/// PhotometricInterpretation value for inverted grayscale
const WHITE_IS_ZERO: u32 = 0;

/// Read the first page of a TIFF file
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Bitmap> {
    read_tiff_page(reader, 0)
}

/// Read one page of a TIFF file
///
/// Only the IFDs before `page` are visited; their image data is not
/// decoded, so a page this layout cannot represent does not affect the
/// pages before it.
///
/// # Arguments
///
/// * `reader` - The reader to read from
/// * `page` - The page index (0-based)
pub fn read_tiff_page<R: Read + Seek>(reader: R, page: usize) -> IoResult<Bitmap> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    for _ in 0..page {
        if !decoder.more_images() {
            return Err(IoError::InvalidData(format!(
                "TIFF file has fewer than {} pages",
                page + 1
            )));
        }
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }

    decode_tiff_page(&mut decoder)
}

/// Read all pages from a multipage TIFF file, in file order
pub fn read_tiff_pages<R: Read + Seek>(reader: R) -> IoResult<Vec<Bitmap>> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let mut pages = Vec::new();

    loop {
        pages.push(decode_tiff_page(&mut decoder)?);

        if !decoder.more_images() {
            break;
        }

        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
    }

    Ok(pages)
}

/// Get the number of pages in a TIFF file
pub fn tiff_page_count<R: Read + Seek>(reader: R) -> IoResult<usize> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let mut count = 1;
    while decoder.more_images() {
        decoder
            .next_image()
            .map_err(|e| IoError::DecodeError(format!("TIFF page navigation error: {}", e)))?;
        count += 1;
    }

    Ok(count)
}

fn decode_tiff_page<R: Read + Seek>(decoder: &mut Decoder<R>) -> IoResult<Bitmap> {
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    let inverted = decoder
        .get_tag_u32(Tag::PhotometricInterpretation)
        .map(|v| v == WHITE_IS_ZERO)
        .unwrap_or(false);

    let samples = match color_type {
        ColorType::Gray(8 | 16) => 1,
        ColorType::GrayA(8 | 16) => 2,
        ColorType::RGB(8 | 16) => 3,
        ColorType::RGBA(8 | 16) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                color_type
            )));
        }
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    // 16-bit samples keep their high byte
    let samples8: Vec<u8> = match image_data {
        DecodingResult::U8(data) => data,
        DecodingResult::U16(data) => data.iter().map(|&v| (v >> 8) as u8).collect(),
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format".to_string(),
            ));
        }
    };

    let pixel_count = width as usize * height as usize;
    if samples8.len() < pixel_count * samples {
        return Err(IoError::InvalidData(format!(
            "TIFF page has {} samples, expected {}",
            samples8.len(),
            pixel_count * samples
        )));
    }

    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for px in samples8.chunks_exact(samples).take(pixel_count) {
        match samples {
            1 => {
                let v = if inverted { 255 - px[0] } else { px[0] };
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
            2 => {
                let v = if inverted { 255 - px[0] } else { px[0] };
                rgba.extend_from_slice(&[v, v, v, px[1]]);
            }
            3 => rgba.extend_from_slice(&[px[0], px[1], px[2], 255]),
            _ => rgba.extend_from_slice(px),
        }
    }

    Ok(Bitmap::from_rgba(width, height, rgba)?)
}

/// Write a single-page TIFF image
pub fn write_tiff<W: Write + Seek>(bitmap: &Bitmap, writer: W) -> IoResult<()> {
    write_tiff_pages(&[bitmap], writer)
}

/// Write a multipage TIFF image
///
/// # Arguments
///
/// * `pages` - The images to write, one IFD each
/// * `writer` - The writer to write to
pub fn write_tiff_pages<W: Write + Seek>(pages: &[&Bitmap], writer: W) -> IoResult<()> {
    if pages.is_empty() {
        return Err(IoError::InvalidData("no pages to write".to_string()));
    }

    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;

    for bitmap in pages {
        encoder
            .write_image::<RGBA8>(bitmap.width(), bitmap.height(), bitmap.data())
            .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
    }

    Ok(())
}
