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

//! # Settings
//!
//! Runtime configuration of the circuit manager. Settings can be read from a JSON file, where all
//! missing fields take their default value:
//!
//! ```json
//! {
//!     "listen": "127.0.0.1:8080",
//!     "pathfinder_url": "http://localhost:8181/api/kytos/pathfinder/v1/",
//!     "flow_manager_url": "http://localhost:8181/api/kytos/flow_manager/",
//!     "circuits_path": "/var/tmp/eline/circuits",
//!     "capacity_ceiling": 100000000000,
//!     "request_timeout_ms": 5000
//! }
//! ```

use crate::ledger::DEFAULT_CAPACITY_CEILING;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error while loading the settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file cannot be read
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, #[source] io::Error),
    /// The file is not valid
    #[error("Cannot parse {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    /// A value is out of range
    #[error("Invalid setting {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// # Settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address on which the HTTP API listens
    pub listen: String,
    /// Base URL of the pathfinder
    pub pathfinder_url: String,
    /// Base URL of the flow manager
    pub flow_manager_url: String,
    /// Directory where circuits are stored
    pub circuits_path: PathBuf,
    /// Capacity of every link without explicit capacity, in bits per second
    pub capacity_ceiling: u64,
    /// Timeout of every request to the controller, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: String::from("127.0.0.1:8080"),
            pathfinder_url: String::from("http://localhost:8181/api/kytos/pathfinder/v1/"),
            flow_manager_url: String::from("http://localhost:8181/api/kytos/flow_manager/"),
            circuits_path: PathBuf::from("/var/tmp/eline/circuits"),
            capacity_ceiling: DEFAULT_CAPACITY_CEILING,
            request_timeout_ms: 5000,
        }
    }
}

impl Settings {
    /// Read the settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| SettingsError::Io(path.to_path_buf(), e))?;
        let settings: Self =
            serde_json::from_slice(&data).map_err(|e| SettingsError::Json(path.to_path_buf(), e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that all values are in range
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capacity_ceiling == 0 {
            return Err(SettingsError::InvalidValue("capacity_ceiling", "must be positive".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "request_timeout_ms",
                "must be positive".into(),
            ));
        }
        if self.pathfinder_url.is_empty() || self.flow_manager_url.is_empty() {
            return Err(SettingsError::InvalidValue("url", "must not be empty".into()));
        }
        Ok(())
    }

    /// Timeout of every request to the controller
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
