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

use serde::{Deserialize, Serialize};
use std::fmt;

/// # Endpoint
/// A physical attachment point in the network: the port `port` on the switch with the datapath ID
/// `dpid`. Two endpoints are equal if both the device and the port are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Endpoint {
    /// Datapath ID of the switch
    pub dpid: String,
    /// Port number on the switch
    pub port: u32,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(dpid: impl Into<String>, port: u32) -> Self {
        Self { dpid: dpid.into(), port }
    }

    /// Returns true if both endpoints are located on the same switch
    pub fn same_device(&self, other: &Endpoint) -> bool {
        self.dpid == other.dpid
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dpid, self.port)
    }
}

/// Kind of VLAN tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    /// Customer VLAN tag (802.1Q)
    #[serde(rename = "ctag")]
    CTag,
    /// Service VLAN tag (802.1ad)
    #[serde(rename = "stag")]
    STag,
}

impl Default for TagType {
    fn default() -> Self {
        Self::CTag
    }
}

/// VLAN tag of a user-network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Type of the tag
    #[serde(default)]
    pub tag_type: TagType,
    /// VLAN ID, between 1 and 4095
    pub value: u16,
}

impl Tag {
    /// Create a new customer VLAN tag
    pub fn ctag(value: u16) -> Self {
        Self { tag_type: TagType::CTag, value }
    }

    /// Returns true if the VLAN ID can be used on the wire
    pub fn is_valid(&self) -> bool {
        (1..=4095).contains(&self.value)
    }
}

/// # User-Network Interface
/// Endpoint at which the customer traffic enters or leaves the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uni {
    /// Interface of the UNI
    #[serde(flatten)]
    pub endpoint: Endpoint,
    /// VLAN tag of the customer traffic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
}

impl Uni {
    /// Create a new UNI
    pub fn new(endpoint: Endpoint, tag: Option<Tag>) -> Self {
        Self { endpoint, tag }
    }
}
