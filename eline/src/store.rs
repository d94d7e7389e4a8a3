// E-Line: Provisioning Point-to-Point Circuits in Software-Defined Networks
// Copyright (C) 2021  The E-Line Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Circuit Store
//!
//! Circuits are the only persisted entities. The store is a simple repository, keyed by the ID of
//! the circuit. Two implementations exist:
//!
//! - [`FileStore`]: One JSON document per circuit in a directory, which is created on demand.
//! - [`MemoryStore`]: Circuits are kept in memory only.

use crate::model::Circuit;

use log::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error of the circuit store
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO Error
    #[error("IO Error on {0}: {1}")]
    Io(PathBuf, #[source] io::Error),
    /// A stored record cannot be (de)serialized
    #[error("Invalid circuit record {0}: {1}")]
    Json(String, #[source] serde_json::Error),
    /// The circuit ID cannot be used as a key
    #[error("Invalid circuit id: {0:?}")]
    InvalidId(String),
    /// The lock of the store is poisoned
    #[error("The circuit store is poisoned")]
    Poisoned,
}

/// # Circuit Store
pub trait CircuitStore: Send + Sync {
    /// Store the circuit, replacing any previous record with the same ID.
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError>;
    /// Load the circuit with the given ID, or `None` if there is no such circuit.
    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError>;
    /// Load all stored circuits.
    fn list(&self) -> Result<Vec<Circuit>, StoreError>;
    /// Delete the circuit. Returns `false` if there was no such circuit.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

impl<T: CircuitStore + ?Sized> CircuitStore for Box<T> {
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError> {
        (**self).save(circuit)
    }
    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError> {
        (**self).load(id)
    }
    fn list(&self) -> Result<Vec<Circuit>, StoreError> {
        (**self).list()
    }
    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}

impl<T: CircuitStore + ?Sized> CircuitStore for Arc<T> {
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError> {
        (**self).save(circuit)
    }
    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError> {
        (**self).load(id)
    }
    fn list(&self) -> Result<Vec<Circuit>, StoreError> {
        (**self).list()
    }
    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}

/// Returns true if the ID can be used as a key. Only ASCII letters, digits, `-` and `_` are
/// allowed, such that the ID is always a plain file name.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// # File Store
///
/// Stores each circuit as a JSON document named after its ID. Records are written to a temporary
/// file first, and then moved into place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store in the directory `root`. The directory is created on the first access.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::Io(self.root.clone(), e))
    }

    fn read(&self, path: &Path, id: &str) -> Result<Circuit, StoreError> {
        let data = fs::read(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
        serde_json::from_slice(&data).map_err(|e| StoreError::Json(id.to_string(), e))
    }
}

impl CircuitStore for FileStore {
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError> {
        if !is_valid_id(circuit.id()) {
            return Err(StoreError::InvalidId(circuit.id().to_string()));
        }
        self.ensure_root()?;
        let data = serde_json::to_vec_pretty(circuit)
            .map_err(|e| StoreError::Json(circuit.id().to_string(), e))?;
        let tmp = self.root.join(format!(".{}.tmp", circuit.id()));
        let path = self.root.join(circuit.id());
        fs::write(&tmp, data).map_err(|e| StoreError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(path.clone(), e))?;
        debug!("Stored circuit {} at {}", circuit.id(), path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        let path = self.root.join(id);
        if !path.is_file() {
            return Ok(None);
        }
        self.read(&path, id).map(Some)
    }

    fn list(&self) -> Result<Vec<Circuit>, StoreError> {
        self.ensure_root()?;
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::Io(self.root.clone(), e))?;
        let mut circuits = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::Io(self.root.clone(), e))?.path();
            let id = match path.file_name().and_then(|n| n.to_str()) {
                Some(id) if is_valid_id(id) && path.is_file() => id.to_string(),
                _ => continue,
            };
            circuits.push(self.read(&path, &id)?);
        }
        Ok(circuits)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        if !is_valid_id(id) {
            return Ok(false);
        }
        let path = self.root.join(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(path, e)),
        }
    }
}

/// # Memory Store
///
/// Keeps all circuits in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    circuits: RwLock<HashMap<String, Circuit>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CircuitStore for MemoryStore {
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError> {
        let mut circuits = self.circuits.write().map_err(|_| StoreError::Poisoned)?;
        circuits.insert(circuit.id().to_string(), circuit.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError> {
        Ok(self.circuits.read().map_err(|_| StoreError::Poisoned)?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Circuit>, StoreError> {
        Ok(self.circuits.read().map_err(|_| StoreError::Poisoned)?.values().cloned().collect())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.circuits.write().map_err(|_| StoreError::Poisoned)?.remove(id).is_some())
    }
}
