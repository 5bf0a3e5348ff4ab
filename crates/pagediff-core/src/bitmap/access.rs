//! Pixel access functions
//!
//! Low-level functions for getting and setting individual RGBA pixels.

use super::{Bitmap, BitmapMut};
use crate::color::BYTES_PER_PIXEL;
use crate::error::{Error, Result};

/// Read the pixel starting at byte offset `pos`.
#[inline]
pub(crate) fn read_rgba(data: &[u8], pos: usize) -> [u8; 4] {
    [data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]
}

impl Bitmap {
    /// Get the RGBA value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pos = (y as usize * self.width() as usize + x as usize) * BYTES_PER_PIXEL;
        Some(read_rgba(self.data(), pos))
    }

    /// Get the RGBA value at (x, y) for coordinates known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the bitmap.
    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width() && y < self.height(),
            "pixel ({x}, {y}) out of bounds for {}x{} bitmap",
            self.width(),
            self.height()
        );
        let pos = (y as usize * self.width() as usize + x as usize) * BYTES_PER_PIXEL;
        read_rgba(self.data(), pos)
    }
}

impl BitmapMut {
    /// Get the RGBA value at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pos = (y as usize * self.width() as usize + x as usize) * BYTES_PER_PIXEL;
        Some(read_rgba(self.data(), pos))
    }

    /// Set the RGBA value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if x >= width || y >= height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        let pos = (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data_mut()[pos..pos + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_pixel() {
        let mut bm = BitmapMut::new(4, 3).unwrap();
        bm.set_pixel(3, 2, [10, 20, 30, 40]).unwrap();
        assert_eq!(bm.pixel(3, 2), Some([10, 20, 30, 40]));
        let bm: Bitmap = bm.into();
        assert_eq!(bm.pixel(3, 2), Some([10, 20, 30, 40]));
        assert_eq!(bm.pixel(0, 0), Some([0, 0, 0, 0]));
        // last pixel is at the end of the buffer
        assert_eq!(&bm.data()[bm.data().len() - 4..], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let mut bm = BitmapMut::new(4, 3).unwrap();
        assert!(matches!(
            bm.set_pixel(4, 0, [0; 4]),
            Err(Error::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(bm.set_pixel(0, 3, [0; 4]).is_err());
        let bm: Bitmap = bm.into();
        assert_eq!(bm.pixel(4, 0), None);
        assert_eq!(bm.pixel(0, 3), None);
    }

    #[test]
    fn test_pixel_at() {
        let bm = Bitmap::new_filled(4, 3, [1, 2, 3, 4]).unwrap();
        assert_eq!(bm.pixel_at(3, 2), [1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_at_past_row_end_panics() {
        let bm = Bitmap::new(4, 3).unwrap();
        bm.pixel_at(4, 0);
    }
}
