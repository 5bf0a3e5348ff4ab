//! Synthetic page fixtures
//!
//! Deterministic bitmaps for regression tests, so that no binary test data
//! has to be checked in.

use crate::TestResult;
use pagediff_core::{Bitmap, BitmapMut};

/// Opaque black
pub const BLACK: [u8; 4] = [0, 0, 0, 255];
/// Opaque white
pub const WHITE: [u8; 4] = [255, 255, 255, 255];
/// Opaque mid gray
pub const GRAY: [u8; 4] = [128, 128, 128, 255];

/// A bitmap filled with one color.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> TestResult<Bitmap> {
    Ok(Bitmap::new_filled(width, height, rgba)?)
}

/// Columns `< split_x` are `left`, the rest `right`.
pub fn split_vertical(
    width: u32,
    height: u32,
    split_x: u32,
    left: [u8; 4],
    right: [u8; 4],
) -> TestResult<Bitmap> {
    let mut bm = BitmapMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            bm.set_pixel(x, y, if x < split_x { left } else { right })?;
        }
    }
    Ok(bm.into())
}

/// Black/white vertical edge with a one-pixel gray column at `edge_x`.
///
/// The gray column is what a rasterizer leaves behind when it smooths a
/// hard edge.
pub fn antialiased_edge(width: u32, height: u32, edge_x: u32) -> TestResult<Bitmap> {
    let mut bm = BitmapMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let px = match x.cmp(&edge_x) {
                std::cmp::Ordering::Less => BLACK,
                std::cmp::Ordering::Equal => GRAY,
                std::cmp::Ordering::Greater => WHITE,
            };
            bm.set_pixel(x, y, px)?;
        }
    }
    Ok(bm.into())
}

/// Copy `base` and paint the rectangle `(x0, y0, w, h)` with `rgba`.
///
/// Parts of the rectangle outside the bitmap are ignored.
pub fn with_block(base: &Bitmap, x0: u32, y0: u32, w: u32, h: u32, rgba: [u8; 4]) -> Bitmap {
    let mut bm = base.to_mut();
    let x1 = x0.saturating_add(w).min(bm.width());
    let y1 = y0.saturating_add(h).min(bm.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let pos = (y as usize * bm.width() as usize + x as usize) * 4;
            bm.data_mut()[pos..pos + 4].copy_from_slice(&rgba);
        }
    }
    bm.into()
}

/// Opaque pseudo-random noise from a linear congruential generator.
///
/// The same seed always yields the same bitmap.
pub fn noise(width: u32, height: u32, seed: u64) -> TestResult<Bitmap> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u8
    };
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..(width as usize * height as usize) {
        data.extend_from_slice(&[next(), next(), next(), 255]);
    }
    Ok(Bitmap::from_rgba(width, height, data)?)
}
