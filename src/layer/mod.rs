//! Per-image transforms used by the asset pipelines.
//!
//! Every transform takes one or more source images and returns a freshly
//! allocated destination image; sources are never modified.
//!
//! - [`tint`]: the only per-pixel operator, a convex blend toward a colour
//! - [`placement`]: stretch, centre and background fill
//! - [`bake`]: stamps a run of icons onto a base image
//! - [`composite`]: source-over blending used by the above

pub mod bake;
pub mod composite;
pub mod placement;
pub mod tint;

pub use bake::{
    BakeLayout, BIG_ICON_SIZE, DEFAULT_X_PADDING, DEFAULT_Y_PADDING, SELECTION_BIG_SIZE,
    SELECTION_SMALL_SIZE, SMALL_ICON_SIZE, bake_icons,
};
pub use composite::composite_over;
pub use placement::{Resample, add_background, center_fit_to, center_offset, scale_to};
pub use tint::{TintConfig, tint};
