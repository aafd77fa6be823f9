//! Editor configuration (`config.toml`).
//!
//! Every field is optional in the file; missing fields take their defaults.
//!
//! ```toml
//! store_path = "/home/me/gradients.json"
//! canvas_width = 500
//! canvas_height = 500
//! quality = "high"
//! log_filter = "meshgrad_engine=debug"
//! frame_interval_ms = 16
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use meshgrad_engine::coords::Canvas;
use meshgrad_engine::export::Quality;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Saved-gradient file; [`Store::default_path`] when unset.
    pub store_path: Option<PathBuf>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub quality: Quality,
    /// `env_logger` filter; overrides `RUST_LOG` when set.
    pub log_filter: Option<String>,
    pub frame_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            canvas_width: 500,
            canvas_height: 500,
            quality: Quality::Normal,
            log_filter: None,
            frame_interval_ms: 16,
        }
    }
}

impl EditorConfig {
    /// `$CONFIG/meshgrad/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meshgrad").join("config.toml"))
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path: path.to_owned(), source }),
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    /// Loads `path` (or the default location), falling back to defaults with a
    /// warning when the file is unreadable or malformed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_owned).or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default configuration: {e}");
                Self::default()
            }
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn store(&self) -> Store {
        Store::new(self.store_path.clone().unwrap_or_else(Store::default_path))
    }

    pub fn to_toml(&self) -> String {
        // Only fails for non-table roots, which this struct never is.
        toml::to_string(self).unwrap_or_default()
    }
}
