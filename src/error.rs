//! Error type shared by every stage of the theme build.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ThemeError> = std::result::Result<T, E>;

/// Everything that can go wrong while building a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// A directory or file could not be read or created.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file exists but is not a decodable image.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A template the build cannot do without is absent.
    #[error("missing template {}", .path.display())]
    MissingTemplate { path: PathBuf },

    /// An output image could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A `key=value` build setting was malformed or unknown.
    #[error("invalid setting `{key}={value}`: {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    /// A tint colour could not be parsed as hex.
    #[error("invalid colour `{value}`: {reason}")]
    InvalidColor { value: String, reason: String },

    /// A JSON build profile could not be parsed.
    #[error("invalid build profile {}: {source}", .path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One or more asset categories failed; the others were still built.
    #[error("build failed for: {}", .failures.join(", "))]
    BuildFailed { failures: Vec<String> },
}

impl ThemeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
