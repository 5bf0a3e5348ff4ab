//! Scaling by sampling
//!
//! Nearest-neighbour resampling used when a raster document is rendered
//! at a scale other than 1.0. Sampling never blends pixels, so the output
//! of a given input and scale is byte-for-byte reproducible.

use super::{Bitmap, BitmapMut};
use crate::color::BYTES_PER_PIXEL;
use crate::error::{Error, Result};

/// Output size for one axis: `round(size * scale)`, at least 1.
fn scaled_size(size: u32, scale: f32) -> u32 {
    let scaled = (size as f64 * scale as f64).round();
    if scaled < 1.0 {
        1
    } else if scaled > u32::MAX as f64 {
        u32::MAX
    } else {
        scaled as u32
    }
}

impl Bitmap {
    /// Scale by nearest-neighbour sampling.
    ///
    /// The output is `round(width * scale) x round(height * scale)`, with a
    /// minimum of one pixel per axis. A scale of exactly 1.0 returns a cheap
    /// clone of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `scale` is not finite and
    /// positive.
    pub fn scale_by_sampling(&self, scale: f32) -> Result<Bitmap> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "scale must be finite and positive, got {scale}"
            )));
        }
        if scale == 1.0 {
            return Ok(self.clone());
        }

        let (ws, hs) = self.dimensions();
        let wd = scaled_size(ws, scale);
        let hd = scaled_size(hs, scale);

        let mut out = BitmapMut::new(wd, hd)?;
        let src = self.data();
        let src_stride = self.stride();
        let dst_stride = out.stride();
        let x_ratio = ws as f64 / wd as f64;
        let y_ratio = hs as f64 / hd as f64;

        for (yd, row) in out.data_mut().chunks_exact_mut(dst_stride).enumerate() {
            let ys = ((yd as f64 * y_ratio) as usize).min(hs as usize - 1);
            let src_row = &src[ys * src_stride..(ys + 1) * src_stride];
            for (xd, px) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let xs = ((xd as f64 * x_ratio) as usize).min(ws as usize - 1);
                let pos = xs * BYTES_PER_PIXEL;
                px.copy_from_slice(&src_row[pos..pos + BYTES_PER_PIXEL]);
            }
        }

        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants() -> Bitmap {
        // 2x2: red, green / blue, white
        let data = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        Bitmap::from_rgba(2, 2, data).unwrap()
    }

    #[test]
    fn test_scale_identity_shares_data() {
        let bm = quadrants();
        let scaled = bm.scale_by_sampling(1.0).unwrap();
        assert_eq!(scaled.data().as_ptr(), bm.data().as_ptr());
    }

    #[test]
    fn test_scale_up_replicates_pixels() {
        let scaled = quadrants().scale_by_sampling(2.0).unwrap();
        assert_eq!(scaled.dimensions(), (4, 4));
        assert_eq!(scaled.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(scaled.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(scaled.pixel(2, 0), Some([0, 255, 0, 255]));
        assert_eq!(scaled.pixel(0, 3), Some([0, 0, 255, 255]));
        assert_eq!(scaled.pixel(3, 3), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_scale_down_keeps_minimum_size() {
        let scaled = quadrants().scale_by_sampling(0.1).unwrap();
        assert_eq!(scaled.dimensions(), (1, 1));
        assert_eq!(scaled.pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_scale_invalid() {
        let bm = quadrants();
        assert!(bm.scale_by_sampling(0.0).is_err());
        assert!(bm.scale_by_sampling(-1.0).is_err());
        assert!(bm.scale_by_sampling(f32::NAN).is_err());
        assert!(bm.scale_by_sampling(f32::INFINITY).is_err());
    }

    #[test]
    fn test_scale_is_deterministic() {
        let bm = quadrants();
        let a = bm.scale_by_sampling(1.5).unwrap();
        let b = bm.scale_by_sampling(1.5).unwrap();
        assert_eq!(a.dimensions(), (3, 3));
        assert_eq!(a.data(), b.data());
    }
}
