//! Tint layer: blends every pixel toward a flat colour.

use image::RgbaImage;
use palette::Srgb;

use crate::error::{Result, ThemeError};

// ============================================================================
// TintConfig
// ============================================================================

/// Configuration for tinting.
///
/// Each output channel is `round(orig * (1 - alpha) + tint * alpha)`; the
/// alpha channel of the source pixel is kept as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintConfig {
    /// The colour to blend toward.
    pub color: Srgb<u8>,

    /// Blend factor (0.0-1.0). 0.0 is identity, 1.0 is a flat fill.
    pub alpha: f32,
}

impl TintConfig {
    /// Creates a new tint config. The alpha is clamped to 0.0-1.0.
    pub fn new(color: Srgb<u8>, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Creates a tint config from a hex colour such as `#29272A`.
    pub fn from_hex(hex: &str, alpha: f32) -> Result<Self> {
        let color = hex
            .trim()
            .parse::<Srgb<u8>>()
            .map_err(|e| ThemeError::InvalidColor {
                value: hex.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(color, alpha))
    }

    /// Formats the colour as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.color.red, self.color.green, self.color.blue
        )
    }

    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        tint(image, self.color, self.alpha)
    }
}

impl Default for TintConfig {
    /// The dark stone shade used by the theme (a lighter variant is `#403B3C`).
    fn default() -> Self {
        Self::new(Srgb::new(0x29, 0x27, 0x2A), 1.0)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Blends every pixel of `image` toward `color` by `alpha`.
pub fn tint(image: &RgbaImage, color: Srgb<u8>, alpha: f32) -> RgbaImage {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut result = image.clone();

    let blend = |orig: u8, tint: u8| -> u8 {
        (orig as f32 * (1.0 - alpha) + tint as f32 * alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    for pixel in result.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            blend(r, color.red),
            blend(g, color.green),
            blend(b, color.blue),
            a,
        ];
    }

    result
}

// ============================================================================
// Tests
// ============================================================================
