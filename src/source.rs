//! Image sources: directory listings and required templates.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use image::RgbaImage;
use regex::Regex;

use crate::error::{Result, ThemeError};
use crate::icon::{ImageCollection, NamedImage};

static OS_ICON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^os_.*\.png$").expect("static pattern is valid"));

/// Filename filters used to split the icon directory into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFilter {
    /// `os_*.png`
    OsIcons,
    /// Everything that is not an OS icon.
    OtherIcons,
}

impl NameFilter {
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::OsIcons => OS_ICON.is_match(name),
            Self::OtherIcons => !OS_ICON.is_match(name),
        }
    }
}

/// Lists the images in `dir` whose filename satisfies `predicate`.
///
/// Entries are sorted by filename. Decoding is deferred until the returned
/// collection is pulled; an entry that fails to decode is logged and skipped.
pub fn list<P>(dir: &Path, predicate: P) -> Result<ImageCollection>
where
    P: Fn(&str) -> bool,
{
    let entries = std::fs::read_dir(dir).map_err(|e| ThemeError::io(dir, e))?;

    let mut paths: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ThemeError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("skipping non UTF-8 filename {}", path.display());
            continue;
        };
        if predicate(name) {
            paths.push((name.to_string(), path));
        }
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    log::debug!("{} image(s) selected from {}", paths.len(), dir.display());

    Ok(Box::new(paths.into_iter().filter_map(|(name, path)| {
        match decode(&path) {
            Ok(image) => Some(NamedImage::new(name, image)),
            Err(err) => {
                log::warn!("skipping {}: {}", path.display(), err);
                None
            }
        }
    })))
}

/// Loads a template the build cannot proceed without.
pub fn load(path: &Path) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(ThemeError::MissingTemplate {
            path: path.to_path_buf(),
        });
    }
    decode(path)
}

/// Loads a required template as a one-element collection, keeping its filename.
///
/// The file is decoded eagerly so a missing template fails before any
/// pipeline stage runs.
pub fn single(path: &Path) -> Result<ImageCollection> {
    let image = load(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Box::new(std::iter::once(NamedImage::new(name, image))))
}

fn decode(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|source| ThemeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}
