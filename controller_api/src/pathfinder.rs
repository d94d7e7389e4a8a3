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

//! # Pathfinder

use crate::connection::Connection;
use crate::types::*;
use crate::Result;

use std::time::Duration;

/// # Pathfinder Handle
///
/// Asks the topology service of the controller for all paths between two interfaces.
#[derive(Debug)]
pub struct Pathfinder {
    conn: Connection,
}

impl Pathfinder {
    /// Create a new handle. `base_url` is the root of the pathfinder API, e.g.,
    /// `http://localhost:8181/api/kytos/pathfinder/v1/`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self { conn: Connection::new(base_url, timeout)? })
    }

    /// The base URL of the pathfinder
    pub fn base_url(&self) -> &str {
        self.conn.base_url()
    }

    /// Get all paths from `source_dpid:source_port` to `target_dpid:target_port`.
    pub fn get_paths(
        &self,
        source_dpid: impl AsRef<str>,
        source_port: u32,
        target_dpid: impl AsRef<str>,
        target_port: u32,
    ) -> Result<Vec<PathfinderPath>> {
        let response: PathfinderResponse = serde_json::from_str(
            &self.conn.request_get(Self::paths_key(
                source_dpid.as_ref(),
                source_port,
                target_dpid.as_ref(),
                target_port,
            ))?,
        )?;
        Ok(response.paths)
    }

    fn paths_key(source: &str, source_port: u32, target: &str, target_port: u32) -> String {
        format!("{}:{}/{}:{}", source, source_port, target, target_port)
    }
}
