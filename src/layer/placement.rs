//! Whole-image placement: resampling, centring and background fills.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use super::composite::composite_over;
use crate::icon::SizePx;

/// Resampling filter used when an image is stretched to a new size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    /// Pixel art stays crisp.
    #[default]
    Nearest,
    Bilinear,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
        }
    }
}

/// Stretches `image` to exactly `size`, ignoring aspect ratio.
pub fn scale_to(image: &RgbaImage, size: SizePx, resample: Resample) -> RgbaImage {
    if SizePx::of(image) == size {
        return image.clone();
    }
    imageops::resize(image, size.width, size.height, resample.filter())
}

/// Places `image`, unscaled, in the middle of a transparent `size` canvas.
///
/// The offset truncates toward zero. When the image is larger than the
/// canvas the offset goes negative and the overflow is clipped.
pub fn center_fit_to(image: &RgbaImage, size: SizePx) -> RgbaImage {
    let mut canvas = RgbaImage::new(size.width, size.height);
    let (x, y) = center_offset(SizePx::of(image), size);
    composite_over(&mut canvas, image, x, y);
    canvas
}

/// Offset that centres `inner` inside `outer`.
pub fn center_offset(inner: SizePx, outer: SizePx) -> (i64, i64) {
    (
        (outer.width as i64 - inner.width as i64) / 2,
        (outer.height as i64 - inner.height as i64) / 2,
    )
}

/// Draws `background` stretched to the size of `image`, then `image` on top.
pub fn add_background(image: &RgbaImage, background: &RgbaImage, resample: Resample) -> RgbaImage {
    let mut canvas = scale_to(background, SizePx::of(image), resample);
    composite_over(&mut canvas, image, 0, 0);
    canvas
}
