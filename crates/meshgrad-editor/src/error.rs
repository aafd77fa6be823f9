//! Editor error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use meshgrad_engine::error::{ExportError, InvalidColorFormat};

/// An edit the session refused. The working gradient is left untouched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EditError {
    /// The operation needs a selected point.
    NoSelection,
    /// Removing a point would leave fewer than `min` points.
    TooFewPoints { min: usize },
    InvalidColor(InvalidColorFormat),
    /// No saved gradient carries this id.
    UnknownGradient(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => f.write_str("no point is selected"),
            Self::TooFewPoints { min } => {
                write!(f, "cannot remove point: at least {min} points are required")
            }
            Self::InvalidColor(e) => e.fmt(f),
            Self::UnknownGradient(id) => write!(f, "no saved gradient with id {id:?}"),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidColorFormat> for EditError {
    fn from(e: InvalidColorFormat) -> Self {
        Self::InvalidColor(e)
    }
}

/// Failure writing the saved-gradient file.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Encode(e) => write!(f, "failed to encode saved gradients: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(e) => Some(e),
        }
    }
}

/// The system clipboard refused the text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ClipboardError(pub String);

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard unavailable: {}", self.0)
    }
}

impl std::error::Error for ClipboardError {}

/// Why a copy-to-clipboard action failed.
#[derive(Debug)]
pub enum CopyError {
    /// The gradient type has no representation in the requested format.
    Unsupported(&'static str),
    Export(ExportError),
    Clipboard(ClipboardError),
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(comment) => write!(f, "nothing to copy: {comment}"),
            Self::Export(e) => e.fmt(f),
            Self::Clipboard(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unsupported(_) => None,
            Self::Export(e) => Some(e),
            Self::Clipboard(e) => Some(e),
        }
    }
}

impl From<ExportError> for CopyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

impl From<ClipboardError> for CopyError {
    fn from(e: ClipboardError) -> Self {
        Self::Clipboard(e)
    }
}

/// A config file that exists but could not be read or parsed.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
