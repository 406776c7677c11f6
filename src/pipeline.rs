//! Lazy image pipelines.
//!
//! A [`Pipeline`] is an ordered list of stages, each turning one
//! [`ImageCollection`] into another. Stages are iterator adapters, so nothing
//! is decoded or transformed until [`Pipeline::execute`] pulls the next image
//! for writing; each image travels through every stage before the next one is
//! read.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use refind_theme_builder::{
//!     source, ImageCollectionExt, NameFilter, Pipeline, Resample, SizePx, TintConfig,
//! };
//!
//! # fn main() -> refind_theme_builder::Result<()> {
//! let bake = false;
//! let button = source::load(Path::new("templates/button_big_alpha.png"))?;
//!
//! Pipeline::new()
//!     .stage(true, |c| c.scale_to(SizePx::square(256), Resample::Nearest))
//!     .stage(true, |c| c.tint(TintConfig::default()))
//!     .stage(!bake, move |c| c.add_background(button, Resample::Nearest))
//!     .execute(
//!         source::list(Path::new("icons"), |n| NameFilter::OsIcons.matches(n))?,
//!         Path::new("build/icons"),
//!     )?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, ThemeError};
use crate::icon::{ImageCollection, SizePx};
use crate::layer::{self, BakeLayout, Resample, TintConfig};

/// One step of a pipeline.
pub type Stage = Box<dyn FnOnce(ImageCollection) -> ImageCollection>;

// ============================================================================
// Pipeline
// ============================================================================

/// An ordered list of collection-to-collection stages.
///
/// Built with [`stage`](Self::stage), then consumed by
/// [`execute`](Self::execute) or [`run`](Self::run). Both take the pipeline
/// by value, so a pipeline cannot be run twice.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `stage` when `enabled` is true; otherwise leaves the pipeline as is.
    pub fn stage<F>(mut self, enabled: bool, stage: F) -> Self
    where
        F: FnOnce(ImageCollection) -> ImageCollection + 'static,
    {
        if enabled {
            self.stages.push(Box::new(stage));
        }
        self
    }

    /// Appends a stage that consumes `input`. A `None` input leaves the
    /// pipeline as is, so a template loaded only when needed enables its
    /// own stage.
    pub fn stage_with<T, F>(self, input: Option<T>, stage: F) -> Self
    where
        T: 'static,
        F: FnOnce(ImageCollection, T) -> ImageCollection + 'static,
    {
        match input {
            Some(input) => self.stage(true, move |c| stage(c, input)),
            None => self,
        }
    }

    /// Number of included stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Chains every stage onto `source` without pulling any image.
    pub fn run(self, source: ImageCollection) -> ImageCollection {
        self.stages
            .into_iter()
            .fold(source, |collection, stage| stage(collection))
    }

    /// Runs the pipeline and writes every resulting image as PNG to
    /// `dest/<name>`, in order, overwriting existing files.
    ///
    /// Stops at the first write failure. Returns the written paths.
    pub fn execute(self, source: ImageCollection, dest: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for named in self.run(source) {
            let path = dest.join(&named.name);
            write_png(&named.image, &path)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ThemeError::Write {
            path: path.to_path_buf(),
            source,
        })
}

// ============================================================================
// Collection adapters
// ============================================================================

/// Lazy per-image transforms over an [`ImageCollection`].
pub trait ImageCollectionExt {
    /// Stretches every image to `size`.
    fn scale_to(self, size: SizePx, resample: Resample) -> ImageCollection;

    /// Centres every image, unscaled, on a transparent `size` canvas.
    fn center_fit_to(self, size: SizePx) -> ImageCollection;

    /// Tints every image.
    fn tint(self, config: TintConfig) -> ImageCollection;

    /// Puts `background`, stretched, behind every image.
    fn add_background(self, background: RgbaImage, resample: Resample) -> ImageCollection;

    /// Stamps `icon` onto every image according to `layout`.
    fn bake_icons(self, icon: RgbaImage, layout: BakeLayout) -> ImageCollection;

    /// Gives every image the output filename `name`.
    fn rename(self, name: &str) -> ImageCollection;
}

impl ImageCollectionExt for ImageCollection {
    fn scale_to(self, size: SizePx, resample: Resample) -> ImageCollection {
        Box::new(self.map(move |n| n.map_image(|img| layer::scale_to(&img, size, resample))))
    }

    fn center_fit_to(self, size: SizePx) -> ImageCollection {
        Box::new(self.map(move |n| n.map_image(|img| layer::center_fit_to(&img, size))))
    }

    fn tint(self, config: TintConfig) -> ImageCollection {
        Box::new(self.map(move |n| n.map_image(|img| config.apply(&img))))
    }

    fn add_background(self, background: RgbaImage, resample: Resample) -> ImageCollection {
        Box::new(self.map(move |n| {
            n.map_image(|img| layer::add_background(&img, &background, resample))
        }))
    }

    fn bake_icons(self, icon: RgbaImage, layout: BakeLayout) -> ImageCollection {
        Box::new(self.map(move |n| n.map_image(|img| layer::bake_icons(&img, &icon, &layout))))
    }

    fn rename(self, name: &str) -> ImageCollection {
        let name = name.to_string();
        Box::new(self.map(move |mut n| {
            n.name.clone_from(&name);
            n
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{NamedImage, collection};
    use image::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn solid(name: &str, w: u32, h: u32, color: [u8; 4]) -> NamedImage {
        NamedImage::new(name, RgbaImage::from_pixel(w, h, Rgba(color)))
    }

    fn sample() -> Vec<NamedImage> {
        vec![
            solid("b.png", 2, 3, [1, 2, 3, 255]),
            solid("a.png", 5, 1, [4, 5, 6, 128]),
            solid("c.png", 1, 1, [7, 8, 9, 0]),
        ]
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let out: Vec<_> = pipeline.run(collection(sample())).collect();
        assert_eq!(out, sample());
    }

    #[test]
    fn disabled_stage_is_omitted() {
        let pipeline = Pipeline::new()
            .stage(false, |c| c.rename("never.png"))
            .stage(false, |c| c.tint(TintConfig::default()));
        assert_eq!(pipeline.len(), 0);
        let out: Vec<_> = pipeline.run(collection(sample())).collect();
        assert_eq!(out, sample());
    }

    #[test]
    fn stage_with_follows_its_input() {
        let button = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        let pipeline = Pipeline::new()
            .stage_with(None::<RgbaImage>, |c, bg| c.add_background(bg, Resample::Nearest))
            .stage_with(Some(button), |c, bg| c.add_background(bg, Resample::Nearest));
        assert_eq!(pipeline.len(), 1);

        let out: Vec<_> = pipeline.run(collection(sample())).collect();
        // `c.png` is fully transparent, so only the background is left.
        assert_eq!(out[2].image.get_pixel(0, 0).0, [9, 9, 9, 255]);
    }

    #[test]
    fn stages_run_in_order() {
        let out: Vec<_> = Pipeline::new()
            .stage(true, |c| c.scale_to(SizePx::square(4), Resample::Nearest))
            .stage(true, |c| c.center_fit_to(SizePx::square(8)))
            .run(collection(sample()))
            .collect();

        for named in &out {
            assert_eq!(named.dimensions(), SizePx::square(8));
            assert_eq!(named.image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        }
        let first = &out[0];
        assert_eq!(first.image.get_pixel(2, 2).0, [1, 2, 3, 255]);
    }

    #[test]
    fn stages_interleave_per_image() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let source_log = Rc::clone(&log);
        let source: ImageCollection = Box::new(sample().into_iter().map(move |n| {
            source_log.borrow_mut().push(format!("read {}", n.name));
            n
        }));

        let stage_log = Rc::clone(&log);
        let out: Vec<_> = Pipeline::new()
            .stage(true, move |c| {
                Box::new(c.map(move |n| {
                    stage_log.borrow_mut().push(format!("stage {}", n.name));
                    n
                }))
            })
            .run(source)
            .collect();

        assert_eq!(out.len(), 3);
        assert_eq!(
            *log.borrow(),
            vec!["read b.png", "stage b.png", "read a.png", "stage a.png", "read c.png", "stage c.png"]
        );
    }

    #[test]
    fn execute_writes_in_order_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"stale").unwrap();

        let written = Pipeline::new()
            .execute(collection(sample()), dir.path())
            .unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b.png", "a.png", "c.png"]);

        let reread = image::open(dir.path().join("a.png")).unwrap().to_rgba8();
        assert_eq!(reread.dimensions(), (5, 1));
        assert_eq!(reread.get_pixel(0, 0).0, [4, 5, 6, 128]);
    }

    #[test]
    fn execute_stops_at_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = Pipeline::new().execute(collection(sample()), &missing);

        match result {
            Err(ThemeError::Write { path, .. }) => assert_eq!(path, missing.join("b.png")),
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn rename_applies_to_every_image() {
        let out: Vec<_> = collection(sample()).rename("background.png").collect();
        assert!(out.iter().all(|n| n.name == "background.png"));
    }
}
