//! refind-theme-builder: asset pipeline for a rEFInd boot-loader theme
//!
//! This crate reads icon and template images, runs them through small lazy
//! pipelines (scale, tint, composite, centre, bake button presses) and writes
//! the results plus a patched `theme.conf` into a build directory.
//!
//! # Example
//!
//! ```no_run
//! use refind_theme_builder::{BuildOptions, ThemeLayout, theme};
//!
//! # fn main() -> refind_theme_builder::Result<()> {
//! let layout = ThemeLayout::new(".", theme::DEFAULT_NAME);
//! let options = BuildOptions::from_settings(["bakeBg", "bakeBg.osIcons=3"])?;
//!
//! let report = theme::build(&layout, &options)?;
//! println!("wrote {} files", report.written.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Pipelines
//!
//! The building blocks are public so single assets can be produced without
//! the full theme:
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use refind_theme_builder::{
//!     icon::collection, ImageCollectionExt, NamedImage, Pipeline, Resample, SizePx, TintConfig,
//! };
//!
//! let icon = NamedImage::new("os_test.png", RgbaImage::from_pixel(32, 32, Rgba([255, 0, 0, 255])));
//!
//! let out: Vec<_> = Pipeline::new()
//!     .stage(true, |c| c.scale_to(SizePx::square(256), Resample::Nearest))
//!     .stage(true, |c| c.tint(TintConfig::default()))
//!     .run(collection([icon]))
//!     .collect();
//!
//! assert_eq!(out[0].dimensions(), SizePx::square(256));
//! assert_eq!(out[0].image.get_pixel(0, 0).0, [0x29, 0x27, 0x2A, 255]);
//! ```

pub mod error;
pub mod icon;
pub mod layer;
pub mod options;
pub mod pipeline;
pub mod source;
pub mod theme;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Result, ThemeError};
pub use icon::{ImageCollection, NamedImage, SizePx};
pub use layer::{BakeLayout, Resample, TintConfig};
pub use options::{BuildOptions, TintSettings};
pub use pipeline::{ImageCollectionExt, Pipeline, Stage};
pub use source::NameFilter;
pub use theme::{BuildReport, Category, ThemeBuilder, ThemeLayout};
