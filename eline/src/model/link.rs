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

use super::Endpoint;

use serde::{Deserialize, Serialize};
use std::fmt;

/// # Link
/// One hop of a circuit between `endpoint_a` and `endpoint_b`. The `bandwidth` is the capacity the
/// circuit reserves on this hop, not the total capacity of the physical link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// First endpoint
    pub endpoint_a: Endpoint,
    /// Second endpoint
    pub endpoint_b: Endpoint,
    /// Reserved bandwidth in bits per second
    pub bandwidth: u64,
}

impl Link {
    /// Create a new link
    pub fn new(endpoint_a: Endpoint, endpoint_b: Endpoint, bandwidth: u64) -> Self {
        Self { endpoint_a, endpoint_b, bandwidth }
    }

    /// Returns true if both links use the same physical hop, regardless of the direction and the
    /// reserved bandwidth.
    pub fn matches(&self, other: &Link) -> bool {
        (self.endpoint_a == other.endpoint_a && self.endpoint_b == other.endpoint_b)
            || (self.endpoint_a == other.endpoint_b && self.endpoint_b == other.endpoint_a)
    }

    /// Returns true if both endpoints are on the same switch
    pub fn is_intra_device(&self) -> bool {
        self.endpoint_a.same_device(&self.endpoint_b)
    }

    /// Returns true if one of the endpoints is on the switch `dpid`
    pub fn touches_device(&self, dpid: &str) -> bool {
        self.endpoint_a.dpid == dpid || self.endpoint_b.dpid == dpid
    }

    /// Returns true if the two links have an endpoint in common
    pub fn shares_endpoint(&self, other: &Link) -> bool {
        self.endpoint_a == other.endpoint_a
            || self.endpoint_a == other.endpoint_b
            || self.endpoint_b == other.endpoint_a
            || self.endpoint_b == other.endpoint_b
    }

    /// Direction-agnostic key of the physical hop
    pub(crate) fn key(&self) -> (Endpoint, Endpoint) {
        ordered(&self.endpoint_a, &self.endpoint_b)
    }
}

/// Order two endpoints, such that the same pair always results in the same tuple.
pub(crate) fn ordered(a: &Endpoint, b: &Endpoint) -> (Endpoint, Endpoint) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {} ({} bps)", self.endpoint_a, self.endpoint_b, self.bandwidth)
    }
}
