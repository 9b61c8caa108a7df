//! Error types for floatlabel.
//!
//! Widget event handling is total; these errors only surface from loading
//! widget descriptions and from resolving constraint handles.

use std::path::PathBuf;

/// Result type alias for floatlabel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while describing or laying out a widget.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A widget description could not be decoded.
    #[error("Invalid widget description: {message}")]
    ConfigParse { message: String },

    /// A widget description could not be encoded.
    #[error("Failed to encode widget description: {message}")]
    ConfigSerialize { message: String },

    /// A description file could not be read or written.
    #[error("Failed to access widget description '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A color string is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid color '{value}', expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { value: String },

    /// A constraint handle no longer resolves to a live constraint.
    #[error("Constraint handle is stale")]
    StaleConstraint,
}

impl Error {
    /// Create a parse error.
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::config_parse(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigSerialize {
            message: err.to_string(),
        }
    }
}
