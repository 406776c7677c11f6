//! Build options and their serializable form.
//!
//! Options can come from three places, applied in this order:
//!
//! 1. a JSON profile ([`BuildOptions::load_profile`])
//! 2. `key=value` settings in the style of `bakeBg.osIcons=3`
//!    ([`BuildOptions::apply_settings`])
//! 3. explicit command-line flags, set directly on the struct
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "bakeBackground": true,
//!   "osIcons": 3,
//!   "otherIcons": 2,
//!   "tint": { "color": "#29272a", "alpha": 1.0 },
//!   "resample": "nearest"
//! }
//! ```
//!
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::layer::{Resample, TintConfig};

// ============================================================================
// TintSettings
// ============================================================================

/// Serializable version of [`TintConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintSettings {
    /// Hex colour, `#rrggbb`.
    pub color: String,

    /// Blend factor (0.0-1.0).
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

impl Default for TintSettings {
    fn default() -> Self {
        TintConfig::default().into()
    }
}

impl From<TintConfig> for TintSettings {
    fn from(config: TintConfig) -> Self {
        Self {
            color: config.hex(),
            alpha: config.alpha,
        }
    }
}

impl TryFrom<&TintSettings> for TintConfig {
    type Error = ThemeError;

    fn try_from(settings: &TintSettings) -> Result<Self> {
        TintConfig::from_hex(&settings.color, settings.alpha)
    }
}

fn default_alpha() -> f32 {
    1.0
}

// ============================================================================
// BuildOptions
// ============================================================================

/// Everything a theme build can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    /// Bake pressed buttons into the wallpaper instead of giving every
    /// icon its own button background.
    pub bake_background: bool,

    /// How many big buttons to bake.
    pub os_icons: u32,

    /// How many small buttons to bake.
    pub other_icons: u32,

    /// Tint applied to every icon.
    pub tint: TintSettings,

    /// Filter used whenever an image is stretched.
    pub resample: Resample,
}

impl BuildOptions {
    /// Parses options from `key=value` settings, starting from the defaults.
    pub fn from_settings<I, S>(settings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        options.apply_settings(settings)?;
        Ok(options)
    }

    /// Applies `key=value` settings on top of the current values.
    ///
    /// Keys are case-insensitive. A bare key means `key=true`.
    ///
    /// | key                  | value                  |
    /// |----------------------|------------------------|
    /// | `bakeBg`             | `true` / `false`       |
    /// | `bakeBg.osIcons`     | non-negative integer   |
    /// | `bakeBg.otherIcons`  | non-negative integer   |
    /// | `tint`               | hex colour             |
    /// | `tint.alpha`         | number in 0.0-1.0      |
    /// | `resample`           | `nearest` / `bilinear` |
    pub fn apply_settings<I, S>(&mut self, settings: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for setting in settings {
            let setting = setting.as_ref().trim();
            if setting.is_empty() {
                continue;
            }
            let (key, value) = setting.split_once('=').unwrap_or((setting, "true"));
            self.apply_setting(key, value)?;
        }
        Ok(())
    }

    fn apply_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| ThemeError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        match key.to_ascii_lowercase().as_str() {
            "bakebg" => {
                self.bake_background = value
                    .to_ascii_lowercase()
                    .parse()
                    .map_err(|e: std::str::ParseBoolError| invalid(e.to_string()))?;
            }
            "bakebg.osicons" => {
                self.os_icons = value
                    .parse()
                    .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
            }
            "bakebg.othericons" => {
                self.other_icons = value
                    .parse()
                    .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
            }
            "tint" => {
                TintConfig::from_hex(value, self.tint.alpha)
                    .map_err(|e| invalid(e.to_string()))?;
                self.tint.color = value.to_string();
            }
            "tint.alpha" => {
                let alpha: f32 = value
                    .parse()
                    .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(invalid("must be between 0.0 and 1.0".to_string()));
                }
                self.tint.alpha = alpha;
            }
            "resample" => {
                self.resample = match value.to_ascii_lowercase().as_str() {
                    "nearest" => Resample::Nearest,
                    "bilinear" => Resample::Bilinear,
                    _ => return Err(invalid("expected `nearest` or `bilinear`".to_string())),
                };
            }
            _ => return Err(invalid("unknown setting".to_string())),
        }
        Ok(())
    }

    /// Resolves the tint settings, failing on a malformed colour.
    pub fn tint_config(&self) -> Result<TintConfig> {
        TintConfig::try_from(&self.tint)
    }

    /// Checks every value that is only validated lazily.
    pub fn validate(&self) -> Result<()> {
        self.tint_config().map(|_| ())
    }

    /// Serializes the options to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a JSON profile from disk.
    pub fn load_profile(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
        Self::from_json(&json).map_err(|source| ThemeError::Profile {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plain_build() {
        let options = BuildOptions::default();
        assert!(!options.bake_background);
        assert_eq!(options.os_icons, 0);
        assert_eq!(options.other_icons, 0);
        assert_eq!(options.tint_config().unwrap(), TintConfig::default());
        assert_eq!(options.resample, Resample::Nearest);
    }

    #[test]
    fn parses_original_style_settings() {
        let options =
            BuildOptions::from_settings(["bakeBg", "bakeBg.osIcons=3", "BAKEBG.OTHERICONS=5"])
                .unwrap();
        assert!(options.bake_background);
        assert_eq!(options.os_icons, 3);
        assert_eq!(options.other_icons, 5);
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let err = BuildOptions::from_settings(["bakeBg.osIcons=abc"]).unwrap_err();
        match err {
            ThemeError::InvalidSetting { key, value, .. } => {
                assert_eq!(key, "bakeBg.osIcons");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidSetting, got {other:?}"),
        }
        assert!(BuildOptions::from_settings(["bakeBg.otherIcons=-1"]).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            BuildOptions::from_settings(["bgBakeIcons=2"]),
            Err(ThemeError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn parses_tint_and_resample() {
        let options =
            BuildOptions::from_settings(["tint=#403B3C", "tint.alpha=0.5", "resample=Bilinear"])
                .unwrap();
        let tint = options.tint_config().unwrap();
        assert_eq!(tint.hex(), "#403b3c");
        assert_eq!(tint.alpha, 0.5);
        assert_eq!(options.resample, Resample::Bilinear);

        assert!(BuildOptions::from_settings(["tint=zzz"]).is_err());
        assert!(BuildOptions::from_settings(["tint.alpha=2"]).is_err());
    }

    #[test]
    fn settings_override_profile_values() {
        let mut options = BuildOptions::from_json(r#"{ "osIcons": 4, "otherIcons": 1 }"#).unwrap();
        options.apply_settings(["bakeBg.otherIcons=7"]).unwrap();
        assert_eq!(options.os_icons, 4);
        assert_eq!(options.other_icons, 7);
    }

    #[test]
    fn json_uses_camel_case() {
        let options = BuildOptions {
            bake_background: true,
            ..BuildOptions::default()
        };
        let json = options.to_json_pretty().unwrap();
        assert!(json.contains("\"bakeBackground\""));
        assert!(json.contains("\"otherIcons\""));
        assert!(json.contains("\"nearest\""));
    }

    #[test]
    fn empty_profile_deserializes() {
        assert_eq!(BuildOptions::from_json("{}").unwrap(), BuildOptions::default());
    }

    #[test]
    fn load_profile_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            BuildOptions::load_profile(&path),
            Err(ThemeError::Profile { .. })
        ));
    }
}
