//! Saved-gradient persistence.
//!
//! One JSON file holds `{"savedGradients": [...]}`. Loading is forgiving: an
//! unreadable or malformed file is an empty collection, and entries that fail
//! to deserialize are dropped. Writes go to a sibling temp file that is then
//! renamed over the previous file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use meshgrad_engine::model::Gradient;
use serde::{Deserialize, Serialize};

use crate::error::{EditError, StoreError};

const COLLECTION: &str = "savedGradients";

/// Location of the saved-gradient file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$DATA/meshgrad/saved-gradients.json`, or a relative file when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("meshgrad"))
            .unwrap_or_default()
            .join("saved-gradients.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every well-formed saved gradient, in file order.
    pub fn load(&self) -> Vec<Gradient> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("ignoring saved gradients at {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        parse_collection(&text, &self.path)
    }

    /// Replaces the file contents with `gradients`.
    pub fn save(&self, gradients: &[Gradient]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };

        let doc = StoredDocument { saved_gradients: gradients };
        let json = serde_json::to_string_pretty(&doc).map_err(StoreError::Encode)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        log::debug!("saved {} gradients to {}", gradients.len(), self.path.display());
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument<'a> {
    saved_gradients: &'a [Gradient],
}

fn parse_collection(text: &str, path: &Path) -> Vec<Gradient> {
    let doc: serde_json::Value = match serde_json::from_str(text) {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("ignoring malformed saved gradients at {}: {e}", path.display());
            return Vec::new();
        }
    };

    let Some(entries) = doc.get(COLLECTION).and_then(|v| v.as_array()) else {
        log::warn!("{} has no {COLLECTION:?} list", path.display());
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match Gradient::deserialize(entry) {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("dropping saved gradient #{i} in {}: {e}", path.display());
                None
            }
        })
        .collect()
}

/// In-memory saved list backed by a [`Store`].
///
/// Every mutation is written through immediately.
#[derive(Debug)]
pub struct SavedGradients {
    store: Store,
    entries: Vec<Gradient>,
}

impl SavedGradients {
    pub fn open(store: Store) -> Self {
        let entries = store.load();
        log::info!("loaded {} saved gradients from {}", entries.len(), store.path().display());
        Self { store, entries }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn list(&self) -> &[Gradient] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Gradient> {
        self.entries.iter().find(|g| g.id == id)
    }

    /// Appends `gradient` and persists. Returns the id it was stored under,
    /// which differs from `gradient.id` only when that id is already taken.
    pub fn push(&mut self, mut gradient: Gradient) -> Result<String, StoreError> {
        gradient.id = self.unique_id(gradient.id);
        let id = gradient.id.clone();
        self.entries.push(gradient);

        if let Err(e) = self.store.save(&self.entries) {
            self.entries.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Removes the gradient with `id` and persists.
    pub fn remove(&mut self, id: &str) -> Result<Gradient, RemoveError> {
        let index = self
            .entries
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| RemoveError::Edit(EditError::UnknownGradient(id.to_owned())))?;

        let removed = self.entries.remove(index);
        if let Err(e) = self.store.save(&self.entries) {
            self.entries.insert(index, removed);
            return Err(RemoveError::Store(e));
        }
        Ok(removed)
    }

    fn unique_id(&self, id: String) -> String {
        if self.get(&id).is_none() {
            return id;
        }
        let base = id.parse::<u64>().ok();
        let mut n = 1u64;
        loop {
            let candidate = match base {
                Some(base) => base.wrapping_add(n).to_string(),
                None => format!("{id}-{n}"),
            };
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Failure deleting a saved gradient.
#[derive(Debug)]
pub enum RemoveError {
    Edit(EditError),
    Store(StoreError),
}

impl std::fmt::Display for RemoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edit(e) => e.fmt(f),
            Self::Store(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RemoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Edit(e) => Some(e),
            Self::Store(e) => Some(e),
        }
    }
}
