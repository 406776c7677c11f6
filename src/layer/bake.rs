//! Bake layer: stamps a run of button icons onto a wallpaper.
//!
//! The wallpaper then shows pressed buttons behind the real rEFInd icons,
//! which gives the illusion of a button press without any theme support.

use image::RgbaImage;

use super::composite::composite_over;
use crate::icon::SizePx;

/// Side of the big selection highlight.
pub const SELECTION_BIG_SIZE: u32 = 256 + 32;

/// Side of the small selection highlight.
pub const SELECTION_SMALL_SIZE: u32 = 64 + 22;

/// Side of a big (OS) icon.
pub const BIG_ICON_SIZE: u32 = 256;

/// Side of a small (tool) icon.
pub const SMALL_ICON_SIZE: u32 = 64;

/// Horizontal gap between baked icons, matching rEFInd's big icon spacing.
pub const DEFAULT_X_PADDING: i32 = (SELECTION_BIG_SIZE as i32 - BIG_ICON_SIZE as i32) + 8;

/// Vertical drop from the big icon row to the small icon row.
pub const DEFAULT_Y_PADDING: i32 =
    BIG_ICON_SIZE as i32 / 2 + SMALL_ICON_SIZE as i32 / 2 + DEFAULT_X_PADDING + 3;

// ============================================================================
// BakeLayout
// ============================================================================

/// Placement of a run of baked icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeLayout {
    /// Number of icons to stamp. Zero leaves the base untouched.
    pub count: u32,

    /// Gap between consecutive icons.
    pub x_padding: i32,

    /// Extra vertical offset, only used when `row` is false.
    pub y_padding: i32,

    /// Centre the run vertically (`true`) or shift it down by `y_padding`.
    pub row: bool,
}

impl BakeLayout {
    /// A vertically centred run, as used for the OS icon row.
    pub fn row(count: u32) -> Self {
        Self {
            count,
            x_padding: DEFAULT_X_PADDING,
            y_padding: DEFAULT_Y_PADDING,
            row: true,
        }
    }

    /// A run shifted below the centre, as used for the tool icon row.
    pub fn below(count: u32) -> Self {
        Self {
            row: false,
            ..Self::row(count)
        }
    }

    /// Top-left corners of the stamped icons that overlap a `base` canvas.
    ///
    /// Stamps that would land entirely off the canvas are skipped without
    /// walking over them, so the cost follows what is visible, not `count`.
    pub fn positions(&self, base: SizePx, icon: SizePx) -> impl Iterator<Item = (i64, i64)> {
        let (base_w, base_h) = (base.width as i64, base.height as i64);
        let (icon_w, icon_h) = (icon.width as i64, icon.height as i64);
        let x_padding = self.x_padding as i64;
        let count = self.count as i64;
        let step_x = icon_w + x_padding;
        let start_x = (base_w + x_padding - step_x.saturating_mul(count)) / 2;
        let mut start_y = (base_h - icon_h) / 2;
        if !self.row {
            start_y += self.y_padding as i64;
        }

        let row_visible = icon_w > 0 && icon_h > 0 && start_y < base_h && start_y + icon_h > 0;
        let candidates = if !row_visible {
            0..0
        } else if step_x > 0 {
            // First index ending right of 0, last index starting left of `base_w`.
            let first = -((start_x + icon_w - 1).div_euclid(step_x));
            let last = (base_w - 1 - start_x).div_euclid(step_x);
            first.clamp(0, count)..(last + 1).clamp(0, count)
        } else {
            0..count
        };

        candidates
            .map(move |i| (start_x + step_x * i, start_y))
            .filter(move |&(x, _)| x < base_w && x + icon_w > 0)
    }
}

impl Default for BakeLayout {
    fn default() -> Self {
        Self::row(0)
    }
}

/// Copies `base` and stamps the visible copies of `icon` from `layout` on it.
pub fn bake_icons(base: &RgbaImage, icon: &RgbaImage, layout: &BakeLayout) -> RgbaImage {
    let mut canvas = base.clone();
    for (x, y) in layout.positions(SizePx::of(base), SizePx::of(icon)) {
        composite_over(&mut canvas, icon, x, y);
    }
    canvas
}
