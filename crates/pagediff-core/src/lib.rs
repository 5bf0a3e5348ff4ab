//! pagediff Core - Basic data structures for page comparison
//!
//! This crate provides the fundamental data structures used throughout
//! the pagediff workspace:
//!
//! - [`Bitmap`] / [`BitmapMut`] - The RGBA raster container (immutable / mutable)
//! - [`ImageFormat`] - Container formats understood by the codec crate
//! - [`color`] - Channel layout and YIQ color-space helpers

pub mod bitmap;
pub mod error;

pub use bitmap::{Bitmap, BitmapMut, ImageFormat};
pub use error::{Error, Result};

/// Channel layout and color-space helpers for RGBA pixels.
///
/// # Pixel format
///
/// Pixels are stored as 4 consecutive bytes `[R, G, B, A]`, non-premultiplied.
///
/// # Color distance
///
/// Perceptual distances are computed in the YIQ (NTSC) color space, where
/// `Y` carries luma and `I`/`Q` carry chroma. Semi-transparent pixels are
/// first composited over white so that transparency reads as "paper".
pub mod color {
    /// Red channel offset
    pub const RED: usize = 0;
    /// Green channel offset
    pub const GREEN: usize = 1;
    /// Blue channel offset
    pub const BLUE: usize = 2;
    /// Alpha channel offset
    pub const ALPHA: usize = 3;

    /// Bytes per RGBA pixel
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Opaque white
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// Fully transparent black
    pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

    /// Largest value [`yiq_delta`] can produce for two 8-bit colors.
    pub const MAX_YIQ_DELTA: f64 = 35215.0;

    /// Luma weight in the squared distance.
    const Y_WEIGHT: f64 = 0.5053;
    /// In-phase chroma weight.
    const I_WEIGHT: f64 = 0.299;
    /// Quadrature chroma weight.
    const Q_WEIGHT: f64 = 0.1957;

    /// A color in YIQ space.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Yiq {
        pub y: f64,
        pub i: f64,
        pub q: f64,
    }

    /// Composite one channel value over white with the given opacity (0..1).
    #[inline]
    pub fn blend_with_white(c: f64, alpha: f64) -> f64 {
        255.0 + (c - 255.0) * alpha
    }

    /// Luma of an RGB triple.
    #[inline]
    pub fn rgb_to_y(r: f64, g: f64, b: f64) -> f64 {
        r * 0.29889531 + g * 0.58662247 + b * 0.11448223
    }

    /// In-phase chroma of an RGB triple.
    #[inline]
    pub fn rgb_to_i(r: f64, g: f64, b: f64) -> f64 {
        r * 0.59597799 - g * 0.27417610 - b * 0.32180189
    }

    /// Quadrature chroma of an RGB triple.
    #[inline]
    pub fn rgb_to_q(r: f64, g: f64, b: f64) -> f64 {
        r * 0.21147017 - g * 0.52261711 + b * 0.31114694
    }

    /// Composite an RGBA pixel over white and return its RGB as `f64`.
    #[inline]
    pub fn flatten_over_white(px: [u8; 4]) -> (f64, f64, f64) {
        let r = px[RED] as f64;
        let g = px[GREEN] as f64;
        let b = px[BLUE] as f64;
        if px[ALPHA] == 255 {
            return (r, g, b);
        }
        let a = px[ALPHA] as f64 / 255.0;
        (
            blend_with_white(r, a),
            blend_with_white(g, a),
            blend_with_white(b, a),
        )
    }

    /// Convert an RGBA pixel to YIQ after compositing over white.
    pub fn rgba_to_yiq(px: [u8; 4]) -> Yiq {
        let (r, g, b) = flatten_over_white(px);
        Yiq {
            y: rgb_to_y(r, g, b),
            i: rgb_to_i(r, g, b),
            q: rgb_to_q(r, g, b),
        }
    }

    /// Luma of an RGBA pixel after compositing over white.
    #[inline]
    pub fn luma(px: [u8; 4]) -> f64 {
        let (r, g, b) = flatten_over_white(px);
        rgb_to_y(r, g, b)
    }

    /// Signed squared YIQ distance between two pixels.
    ///
    /// The magnitude is the weighted squared distance
    /// `0.5053·ΔY² + 0.299·ΔI² + 0.1957·ΔQ²`, bounded by [`MAX_YIQ_DELTA`].
    /// The sign is negative when `a` is brighter than `b`.
    pub fn yiq_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
        if a == b {
            return 0.0;
        }
        let ya = rgba_to_yiq(a);
        let yb = rgba_to_yiq(b);
        let dy = ya.y - yb.y;
        let di = ya.i - yb.i;
        let dq = ya.q - yb.q;
        let delta = Y_WEIGHT * dy * dy + I_WEIGHT * di * di + Q_WEIGHT * dq * dq;
        if ya.y > yb.y { -delta } else { delta }
    }

    /// Signed luma difference `luma(a) - luma(b)`.
    #[inline]
    pub fn luma_delta(a: [u8; 4], b: [u8; 4]) -> f64 {
        if a == b {
            return 0.0;
        }
        luma(a) - luma(b)
    }

}
