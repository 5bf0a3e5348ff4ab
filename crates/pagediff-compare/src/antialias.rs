//! Anti-aliasing detection
//!
//! Anti-aliased pixel and intensity slope detector (V. Vysniauskas, 2009).
//! A pixel is considered anti-aliasing when it sits on an intensity slope
//! between a darker and a brighter neighbour, and at least one of those
//! extremes lies inside a flat region in both images.

use pagediff_core::Bitmap;
use pagediff_core::color::luma_delta;

/// Inclusive neighbourhood bounds of `(x, y)` clipped to the image.
#[inline]
fn window(x: u32, y: u32, width: u32, height: u32) -> (u32, u32, u32, u32) {
    (
        x.saturating_sub(1),
        y.saturating_sub(1),
        (x + 1).min(width - 1),
        (y + 1).min(height - 1),
    )
}

#[inline]
fn on_border(x: u32, y: u32, width: u32, height: u32) -> bool {
    x == 0 || y == 0 || x == width - 1 || y == height - 1
}

/// Whether the pixel at `(x, y)` of `img` looks like anti-aliasing, judged
/// against `other`.
///
/// Callers test both directions: `is_antialiased(a, b, ..) ||
/// is_antialiased(b, a, ..)`.
pub fn is_antialiased(img: &Bitmap, other: &Bitmap, x: u32, y: u32) -> bool {
    let (width, height) = img.dimensions();
    let (x0, y0, x1, y1) = window(x, y, width, height);

    // border pixels count as having one equal sibling outside the image
    let mut zeroes: u8 = u8::from(on_border(x, y, width, height));
    let mut min = 0.0;
    let mut max = 0.0;
    let mut min_pos = (0, 0);
    let mut max_pos = (0, 0);

    let center = img.pixel_at(x, y);

    for nx in x0..=x1 {
        for ny in y0..=y1 {
            if nx == x && ny == y {
                continue;
            }

            let delta = luma_delta(center, img.pixel_at(nx, ny));

            if delta == 0.0 {
                zeroes += 1;
                if zeroes > 2 {
                    return false;
                }
                continue;
            }

            if delta < min {
                min = delta;
                min_pos = (nx, ny);
                continue;
            }

            if delta > max {
                max = delta;
                max_pos = (nx, ny);
            }
        }
    }

    // no slope through this pixel
    if min == 0.0 || max == 0.0 {
        return false;
    }

    (has_many_siblings(img, min_pos.0, min_pos.1)
        && has_many_siblings(other, min_pos.0, min_pos.1))
        || (has_many_siblings(img, max_pos.0, max_pos.1)
            && has_many_siblings(other, max_pos.0, max_pos.1))
}

/// Whether the pixel at `(x, y)` has 3+ neighbours of exactly its color.
pub fn has_many_siblings(img: &Bitmap, x: u32, y: u32) -> bool {
    let (width, height) = img.dimensions();
    let (x0, y0, x1, y1) = window(x, y, width, height);

    let mut zeroes: u8 = u8::from(on_border(x, y, width, height));
    let center = img.pixel_at(x, y);

    for nx in x0..=x1 {
        for ny in y0..=y1 {
            if nx == x && ny == y {
                continue;
            }
            if img.pixel_at(nx, ny) == center {
                zeroes += 1;
            }
            if zeroes > 2 {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagediff_core::BitmapMut;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const GRAY: [u8; 4] = [128, 128, 128, 255];

    /// Columns: black black gray white white
    fn edge(gray_column: bool) -> Bitmap {
        let mut bm = BitmapMut::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let px = match x {
                    0 | 1 => BLACK,
                    2 if gray_column => GRAY,
                    _ => WHITE,
                };
                bm.set_pixel(x, y, px).unwrap();
            }
        }
        bm.into()
    }

    #[test]
    fn test_flat_region_has_many_siblings() {
        let bm = Bitmap::new_filled(3, 3, WHITE).unwrap();
        assert!(has_many_siblings(&bm, 1, 1));
        assert!(has_many_siblings(&bm, 0, 0));
    }

    #[test]
    fn test_isolated_pixel_has_no_siblings() {
        let mut bm = Bitmap::new_filled(3, 3, WHITE).unwrap().to_mut();
        bm.set_pixel(1, 1, BLACK).unwrap();
        let bm: Bitmap = bm.into();
        assert!(!has_many_siblings(&bm, 1, 1));
    }

    #[test]
    fn test_gray_edge_column_is_antialiased() {
        let smooth = edge(true);
        let hard = edge(false);
        for y in 0..5 {
            assert!(is_antialiased(&smooth, &hard, 2, y), "row {y}");
        }
    }

    #[test]
    fn test_flat_pixel_is_not_antialiased() {
        let smooth = edge(true);
        let hard = edge(false);
        assert!(!is_antialiased(&smooth, &hard, 0, 2));
        assert!(!is_antialiased(&smooth, &hard, 4, 2));
    }

    #[test]
    fn test_isolated_dot_is_not_antialiased() {
        let base = Bitmap::new_filled(5, 5, WHITE).unwrap();
        let mut dotted = base.to_mut();
        dotted.set_pixel(2, 2, BLACK).unwrap();
        let dotted: Bitmap = dotted.into();
        // every neighbour is brighter; no darker side
        assert!(!is_antialiased(&dotted, &base, 2, 2));
        // in the base image the pixel is flat white
        assert!(!is_antialiased(&base, &dotted, 2, 2));
    }
}
