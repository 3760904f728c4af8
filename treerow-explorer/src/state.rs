//! Persisted expansion state, keyed by browsed root.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Expanded directories of every root browsed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    roots: BTreeMap<PathBuf, Vec<PathBuf>>,
}

impl ExpansionState {
    /// Load the state file; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        bincode::deserialize(&bytes).map_err(StateError::Deserialization)
    }

    /// Write the state file, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let bytes = bincode::serialize(self).map_err(StateError::Serialization)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Expanded directories recorded for `root`.
    pub fn expanded(&self, root: &Path) -> &[PathBuf] {
        self.roots.get(root).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_expanded(&mut self, root: impl Into<PathBuf>, expanded: Vec<PathBuf>) {
        self.roots.insert(root.into(), expanded);
    }
}
