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

//! # Flow Manager

use crate::connection::Connection;
use crate::types::*;
use crate::Result;

use std::time::Duration;

/// # Flow Manager Handle
///
/// Installs and deletes flows on a single switch. The flow manager answers as soon as the request
/// is accepted; no flow-level acknowledgement is reported back.
#[derive(Debug)]
pub struct FlowManager {
    conn: Connection,
}

impl FlowManager {
    /// Create a new handle. `base_url` is the root of the flow manager API, e.g.,
    /// `http://localhost:8181/api/kytos/flow_manager/`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self { conn: Connection::new(base_url, timeout)? })
    }

    /// The base URL of the flow manager
    pub fn base_url(&self) -> &str {
        self.conn.base_url()
    }

    /// Install all flows on the switch `dpid`
    pub fn install_flows(&self, dpid: impl AsRef<str>, flows: &[FlowInstall]) -> Result<()> {
        self.conn.request_post(format!("flows/{}", dpid.as_ref()), serde_json::to_string(flows)?)?;
        Ok(())
    }

    /// Delete all flows on the switch `dpid`
    pub fn delete_flows(&self, dpid: impl AsRef<str>, flows: &[FlowDelete]) -> Result<()> {
        self.conn.request_post(format!("delete/{}", dpid.as_ref()), serde_json::to_string(flows)?)?;
        Ok(())
    }
}
