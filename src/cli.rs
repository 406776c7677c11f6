use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::layer::Resample;
use crate::options::BuildOptions;
use crate::theme::{DEFAULT_NAME, ThemeLayout};

#[derive(Parser)]
#[command(
    name = "refind-theme",
    version,
    about = "Build the icon, background and selection assets of a rEFInd theme"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing icons/, templates/ and theme.conf
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Theme name, used for the build directory and in theme.conf
    #[arg(long, global = true, default_value = DEFAULT_NAME)]
    pub name: String,
}

impl Cli {
    pub fn layout(&self) -> ThemeLayout {
        ThemeLayout::new(&self.root, &self.name)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the theme into build/<name>
    Build(BuildArgs),

    /// Delete the build directory
    Clean,
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Bake pressed buttons into the wallpaper, to give the illusion of button presses
    #[arg(long)]
    pub bake_bg: bool,

    /// Number of OS icon buttons to bake
    #[arg(long, value_name = "N")]
    pub os_icons: Option<u32>,

    /// Number of other icon buttons to bake
    #[arg(long, value_name = "N")]
    pub other_icons: Option<u32>,

    /// Tint colour for every icon, e.g. "#29272A"
    #[arg(long, value_name = "HEX")]
    pub tint: Option<String>,

    /// Tint strength between 0.0 and 1.0
    #[arg(long, value_name = "ALPHA")]
    pub tint_alpha: Option<f32>,

    /// Use bilinear instead of nearest-neighbour resampling
    #[arg(long)]
    pub bilinear: bool,

    /// JSON build profile applied before any other option
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Extra settings, e.g. bakeBg bakeBg.osIcons=3 bakeBg.otherIcons=2
    #[arg(value_name = "KEY[=VALUE]")]
    pub settings: Vec<String>,
}

impl BuildArgs {
    /// Merges the profile, the `key=value` settings and the flags, in that order.
    pub fn options(&self) -> Result<BuildOptions> {
        let mut options = match &self.profile {
            Some(path) => BuildOptions::load_profile(path)?,
            None => BuildOptions::default(),
        };
        options.apply_settings(&self.settings)?;

        if self.bake_bg {
            options.bake_background = true;
        }
        if let Some(count) = self.os_icons {
            options.os_icons = count;
        }
        if let Some(count) = self.other_icons {
            options.other_icons = count;
        }
        if let Some(color) = &self.tint {
            options.apply_settings([format!("tint={color}")])?;
        }
        if let Some(alpha) = self.tint_alpha {
            options.apply_settings([format!("tint.alpha={alpha}")])?;
        }
        if self.bilinear {
            options.resample = Resample::Bilinear;
        }

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "refind-theme",
            "build",
            "bakeBg.osIcons=2",
            "--os-icons",
            "5",
            "--bake-bg",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        let options = args.options().unwrap();
        assert!(options.bake_background);
        assert_eq!(options.os_icons, 5);
    }

    #[test]
    fn bad_settings_fail_fast() {
        let args = BuildArgs {
            settings: vec!["bakeBg.otherIcons=many".into()],
            ..BuildArgs::default()
        };
        assert!(args.options().is_err());
    }

    #[test]
    fn global_root_builds_layout() {
        let cli = Cli::parse_from(["refind-theme", "clean", "--root", "/srv/theme"]);
        assert!(matches!(cli.command, Commands::Clean));
        assert_eq!(
            cli.layout().build,
            PathBuf::from("/srv/theme/build").join(DEFAULT_NAME)
        );
    }
}
