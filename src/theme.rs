//! The theme build: five asset pipelines plus the configuration patch.
//!
//! | category          | source                               | output                     |
//! |-------------------|--------------------------------------|----------------------------|
//! | OS icons          | `icons/os_*.png`                     | `build/icons/<same name>`  |
//! | other icons       | the rest of `icons/`                 | `build/icons/<same name>`  |
//! | background        | `templates/bg_1080.png`              | `build/background.png`     |
//! | big selection     | `selection_big.png` or pressed button | `build/selection_big.png`  |
//! | small selection   | `selection_small.png` or pressed button | `build/selection_small.png` |
//!
//! When the background is baked, the icons lose their individual button
//! backgrounds, the wallpaper gets a row of buttons stamped on it, and the
//! selection highlights become pressed buttons.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Result, ThemeError};
use crate::icon::SizePx;
use crate::layer::{
    BIG_ICON_SIZE, BakeLayout, SELECTION_BIG_SIZE, SELECTION_SMALL_SIZE, SMALL_ICON_SIZE,
    TintConfig, scale_to,
};
use crate::options::BuildOptions;
use crate::pipeline::{ImageCollectionExt, Pipeline};
use crate::source::{self, NameFilter};

/// Name of the generated theme.
pub const DEFAULT_NAME: &str = "rEFInd-Minecraft";

/// Theme name in the upstream `theme.conf`, replaced on migration.
pub const UPSTREAM_NAME: &str = "rEFInd-Minimalist";

pub const BACKGROUND_TEMPLATE: &str = "bg_1080.png";
pub const BUTTON_BIG_TEMPLATE: &str = "button_big_alpha.png";
pub const BUTTON_SMALL_TEMPLATE: &str = "button_small_alpha.png";
pub const BUTTON_DOWN_BIG_TEMPLATE: &str = "button_down_big_alpha.png";
pub const BUTTON_DOWN_SMALL_TEMPLATE: &str = "button_down_small_alpha.png";

pub const BACKGROUND_OUTPUT: &str = "background.png";
pub const SELECTION_BIG_OUTPUT: &str = "selection_big.png";
pub const SELECTION_SMALL_OUTPUT: &str = "selection_small.png";
pub const THEME_CONF: &str = "theme.conf";

// ============================================================================
// ThemeLayout
// ============================================================================

/// Where a theme build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeLayout {
    /// Project root; holds `theme.conf` and the plain selection images.
    pub root: PathBuf,
    /// Source icons.
    pub icons: PathBuf,
    /// Button and wallpaper templates.
    pub templates: PathBuf,
    /// Output directory, `root/build/<name>`.
    pub build: PathBuf,
    /// Theme name written into `theme.conf`.
    pub name: String,
}

impl ThemeLayout {
    /// The standard layout under `root`.
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let root = root.into();
        let name = name.into();
        Self {
            icons: root.join("icons"),
            templates: root.join("templates"),
            build: root.join("build").join(&name),
            root,
            name,
        }
    }

    /// Output directory for icons.
    pub fn build_icons(&self) -> PathBuf {
        self.build.join("icons")
    }

    pub fn template(&self, file: &str) -> PathBuf {
        self.templates.join(file)
    }

    /// Creates the output directories.
    pub fn prepare(&self) -> Result<()> {
        let icons = self.build_icons();
        std::fs::create_dir_all(&icons).map_err(|e| ThemeError::io(&icons, e))
    }
}

// ============================================================================
// Category
// ============================================================================

/// One independently built group of assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    OsIcons,
    OtherIcons,
    Background,
    SelectionBig,
    SelectionSmall,
}

impl Category {
    /// Build order.
    pub const ALL: [Category; 5] = [
        Category::OsIcons,
        Category::OtherIcons,
        Category::Background,
        Category::SelectionBig,
        Category::SelectionSmall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::OsIcons => "os icons",
            Self::OtherIcons => "other icons",
            Self::Background => "background",
            Self::SelectionBig => "big selection",
            Self::SelectionSmall => "small selection",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// ThemeBuilder
// ============================================================================

/// Files produced by a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
}

/// Builds the theme assets for one layout and set of options.
pub struct ThemeBuilder<'a> {
    layout: &'a ThemeLayout,
    options: BuildOptions,
    tint: TintConfig,
}

impl<'a> ThemeBuilder<'a> {
    /// Validates `options` up front so a bad value fails before anything is written.
    pub fn new(layout: &'a ThemeLayout, options: BuildOptions) -> Result<Self> {
        let tint = options.tint_config()?;
        Ok(Self {
            layout,
            options,
            tint,
        })
    }

    /// Builds every category, then patches `theme.conf`.
    ///
    /// A failing category is logged and does not stop the others. If any
    /// category failed, `theme.conf` is left alone and
    /// [`ThemeError::BuildFailed`] names the failures.
    pub fn build(&self) -> Result<BuildReport> {
        log::info!("*** BUILD {} ***", self.layout.name);
        log::info!("root : {}", self.layout.root.display());
        log::info!("build: {}", self.layout.build.display());

        self.layout.prepare()?;

        let mut report = BuildReport::default();
        let mut failures = Vec::new();

        for category in Category::ALL {
            match self.build_category(category) {
                Ok(written) => {
                    log::info!("{category}: {} file(s)", written.len());
                    report.written.extend(written);
                }
                Err(err) => {
                    log::error!("{category}: {err}");
                    failures.push(category.label().to_string());
                }
            }
        }

        if !failures.is_empty() {
            return Err(ThemeError::BuildFailed { failures });
        }

        report.written.push(migrate_configuration(self.layout)?);
        log::info!("*** END ***");
        Ok(report)
    }

    /// Runs the pipeline of a single category.
    pub fn build_category(&self, category: Category) -> Result<Vec<PathBuf>> {
        match category {
            Category::OsIcons => self.icons(NameFilter::OsIcons, BUTTON_BIG_TEMPLATE, BIG_ICON_SIZE),
            Category::OtherIcons => {
                self.icons(NameFilter::OtherIcons, BUTTON_SMALL_TEMPLATE, SMALL_ICON_SIZE)
            }
            Category::Background => self.background(),
            Category::SelectionBig => self.selection(
                BUTTON_DOWN_BIG_TEMPLATE,
                SELECTION_BIG_OUTPUT,
                BIG_ICON_SIZE,
                SELECTION_BIG_SIZE,
            ),
            Category::SelectionSmall => self.selection(
                BUTTON_DOWN_SMALL_TEMPLATE,
                SELECTION_SMALL_OUTPUT,
                SMALL_ICON_SIZE,
                SELECTION_SMALL_SIZE,
            ),
        }
    }

    /// Scale, tint, and unless baking, put each icon on its button.
    fn icons(&self, filter: NameFilter, button: &str, size: u32) -> Result<Vec<PathBuf>> {
        let bake = self.options.bake_background;
        let resample = self.options.resample;
        let tint = self.tint;
        let button = self.template_if(!bake, button)?;

        Pipeline::new()
            .stage(true, move |c| c.scale_to(SizePx::square(size), resample))
            .stage(true, move |c| c.tint(tint))
            .stage_with(button, move |c, button| c.add_background(button, resample))
            .execute(
                source::list(&self.layout.icons, move |n| filter.matches(n))?,
                &self.layout.build_icons(),
            )
    }

    /// The wallpaper, optionally with rows of buttons baked in.
    fn background(&self) -> Result<Vec<PathBuf>> {
        let bake = self.options.bake_background;
        let resample = self.options.resample;
        let big = self
            .template_if(bake, BUTTON_BIG_TEMPLATE)?
            .map(|b| scale_to(&b, SizePx::square(BIG_ICON_SIZE), resample));
        let small = self
            .template_if(bake, BUTTON_SMALL_TEMPLATE)?
            .map(|b| scale_to(&b, SizePx::square(SMALL_ICON_SIZE), resample));
        let big_row = BakeLayout::row(self.options.os_icons);
        let small_row = BakeLayout::below(self.options.other_icons);

        Pipeline::new()
            .stage(true, |c| c.rename(BACKGROUND_OUTPUT))
            .stage_with(big, move |c, icon| c.bake_icons(icon, big_row))
            .stage_with(small, move |c, icon| c.bake_icons(icon, small_row))
            .execute(
                source::single(&self.layout.template(BACKGROUND_TEMPLATE))?,
                &self.layout.build,
            )
    }

    /// The selection highlight: the plain image stretched to `selection`,
    /// or when baking, the pressed button at icon size centred in it.
    fn selection(
        &self,
        pressed: &str,
        output: &'static str,
        icon: u32,
        selection: u32,
    ) -> Result<Vec<PathBuf>> {
        let bake = self.options.bake_background;
        let resample = self.options.resample;
        let path = if bake {
            self.layout.template(pressed)
        } else {
            self.layout.root.join(output)
        };

        Pipeline::new()
            .stage(!bake, move |c| c.scale_to(SizePx::square(selection), resample))
            .stage(bake, move |c| {
                c.scale_to(SizePx::square(icon), resample)
                    .center_fit_to(SizePx::square(selection))
            })
            .stage(true, move |c| c.rename(output))
            .execute(source::single(&path)?, &self.layout.build)
    }

    fn template_if(&self, needed: bool, file: &str) -> Result<Option<RgbaImage>> {
        if needed {
            source::load(&self.layout.template(file)).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Builds the theme described by `layout` with `options`.
pub fn build(layout: &ThemeLayout, options: &BuildOptions) -> Result<BuildReport> {
    ThemeBuilder::new(layout, options.clone())?.build()
}

// ============================================================================
// Configuration and cleanup
// ============================================================================

/// Copies `root/theme.conf` into the build directory, renaming the theme.
pub fn migrate_configuration(layout: &ThemeLayout) -> Result<PathBuf> {
    let src = layout.root.join(THEME_CONF);
    let dest = layout.build.join(THEME_CONF);

    let reader = BufReader::new(File::open(&src).map_err(|e| ThemeError::io(&src, e))?);
    let mut writer = BufWriter::new(File::create(&dest).map_err(|e| ThemeError::io(&dest, e))?);

    for line in reader.lines() {
        let line = line.map_err(|e| ThemeError::io(&src, e))?;
        writeln!(writer, "{}", line.replace(UPSTREAM_NAME, &layout.name))
            .map_err(|e| ThemeError::io(&dest, e))?;
    }
    writer.flush().map_err(|e| ThemeError::io(&dest, e))?;

    log::info!("migrated {} -> {}", src.display(), dest.display());
    Ok(dest)
}

/// Deletes the build directory. Returns false if there was nothing to delete.
pub fn clean(layout: &ThemeLayout) -> Result<bool> {
    log::info!("*** CLEAN {} ***", layout.build.display());
    remove_path(&layout.build)
}

/// Removes a file or a directory tree; a missing path is not an error.
pub fn remove_path(path: &Path) -> Result<bool> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ThemeError::io(path, e)),
    }
}
