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

use super::{Endpoint, Link, Uni};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Error in a circuit request. Requests with these errors are rejected before anything else
/// happens.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// The request is not valid JSON, or does not have the expected structure
    #[error("Cannot parse the request: {0}")]
    InvalidRequest(String),
    /// The requested bandwidth is zero
    #[error("The requested bandwidth must be greater than zero")]
    ZeroBandwidth,
    /// The UNI has an empty datapath ID
    #[error("The {0} has no datapath ID")]
    EmptyDpid(&'static str),
    /// The UNI A has no VLAN tag
    #[error("The uni_a must carry a VLAN tag")]
    MissingTag,
    /// The VLAN ID is out of range
    #[error("Invalid VLAN ID {1} on {0}")]
    InvalidTag(&'static str, u16),
    /// Both UNIs are the same interface
    #[error("Both UNIs are the same interface: {0}")]
    SameEndpoints(Endpoint),
    /// A circuit with the same ID already exists
    #[error("A circuit with id {0} already exists")]
    DuplicateId(String),
}

/// Error of a path attached to a circuit
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PathError {
    /// The circuit has already a path
    #[error("The circuit {0} has already a path")]
    AlreadyAttached(String),
    /// The path contains no link
    #[error("The path is empty")]
    Empty,
    /// The first link does not touch the switch of uni_a
    #[error("The path does not start at {0}")]
    WrongStart(String),
    /// The last link does not touch the switch of uni_z
    #[error("The path does not end at {0}")]
    WrongEnd(String),
    /// The link at the given position does not share an endpoint with its predecessor
    #[error("The path is not contiguous at link {0}")]
    NotContiguous(usize),
}

/// Lifecycle state of a stored circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitStatus {
    /// The circuit is stored, but its flows are not (yet) installed.
    PendingFlows,
    /// All flows are installed.
    Active,
    /// The circuit is being removed. Its flows may still be present.
    PendingRemoval,
}

impl fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingFlows => write!(f, "pending-flows"),
            Self::Active => write!(f, "active"),
            Self::PendingRemoval => write!(f, "pending-removal"),
        }
    }
}

/// Request for a new circuit, as sent by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CircuitRequest {
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// First UNI
    pub uni_a: Uni,
    /// Second UNI
    pub uni_z: Uni,
    /// Requested bandwidth in bits per second
    pub bandwidth: u64,
}

impl CircuitRequest {
    /// Parse a request from its JSON representation
    pub fn from_json(data: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(data).map_err(|e| ValidationError::InvalidRequest(e.to_string()))
    }

    /// Check that the request describes a circuit which can be provisioned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bandwidth == 0 {
            return Err(ValidationError::ZeroBandwidth);
        }
        for (name, uni) in [("uni_a", &self.uni_a), ("uni_z", &self.uni_z)].iter() {
            if uni.endpoint.dpid.is_empty() {
                return Err(ValidationError::EmptyDpid(*name));
            }
            if let Some(tag) = uni.tag.filter(|t| !t.is_valid()) {
                return Err(ValidationError::InvalidTag(*name, tag.value));
            }
        }
        if self.uni_a.tag.is_none() {
            return Err(ValidationError::MissingTag);
        }
        if self.uni_a.endpoint == self.uni_z.endpoint {
            return Err(ValidationError::SameEndpoints(self.uni_a.endpoint.clone()));
        }
        Ok(())
    }
}

/// # Circuit
///
/// A point-to-point service between `uni_a` and `uni_z`. The circuit is created from a
/// [`CircuitRequest`] with an empty path. The path is attached exactly once, right before the
/// circuit is stored. Afterwards, only the [`CircuitStatus`] changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    id: String,
    #[serde(default)]
    name: String,
    uni_a: Uni,
    uni_z: Uni,
    bandwidth: u64,
    #[serde(default)]
    path: Vec<Link>,
    status: CircuitStatus,
    creation_time: DateTime<Utc>,
}

impl Circuit {
    /// Create a new circuit with a fresh ID out of a validated request.
    pub fn from_request(request: CircuitRequest) -> Result<Self, ValidationError> {
        request.validate()?;
        Ok(Self {
            id: Uuid::new_v4().simple().to_string(),
            name: request.name,
            uni_a: request.uni_a,
            uni_z: request.uni_z,
            bandwidth: request.bandwidth,
            path: Vec::new(),
            status: CircuitStatus::PendingFlows,
            creation_time: Utc::now(),
        })
    }

    /// Get the ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the first UNI
    pub fn uni_a(&self) -> &Uni {
        &self.uni_a
    }

    /// Get the second UNI
    pub fn uni_z(&self) -> &Uni {
        &self.uni_z
    }

    /// Get the requested bandwidth
    pub fn bandwidth(&self) -> u64 {
        self.bandwidth
    }

    /// Get the path. It is empty as long as no path was attached.
    pub fn path(&self) -> &[Link] {
        &self.path
    }

    /// Get the status
    pub fn status(&self) -> CircuitStatus {
        self.status
    }

    /// Get the time at which the circuit was requested
    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// VLAN ID used for all flows of this circuit
    pub fn vlan(&self) -> Option<u16> {
        self.uni_a.tag.map(|t| t.value)
    }

    /// Attach the selected path. This fails if a path is already attached, or if the path does
    /// not connect the two UNIs (see [`Circuit::check_path`]).
    pub fn attach_path(&mut self, path: Vec<Link>) -> Result<(), PathError> {
        if !self.path.is_empty() {
            return Err(PathError::AlreadyAttached(self.id.clone()));
        }
        self.check_path(&path)?;
        self.path = path;
        Ok(())
    }

    /// Check that `path` is contiguous, that the first link touches the switch of `uni_a`, and
    /// that the last link touches the switch of `uni_z`.
    pub fn check_path(&self, path: &[Link]) -> Result<(), PathError> {
        let first = path.first().ok_or(PathError::Empty)?;
        if !first.touches_device(&self.uni_a.endpoint.dpid) {
            return Err(PathError::WrongStart(self.uni_a.endpoint.dpid.clone()));
        }
        if let Some(i) = path.windows(2).position(|w| !w[0].shares_endpoint(&w[1])) {
            return Err(PathError::NotContiguous(i + 1));
        }
        // path is not empty
        if !path[path.len() - 1].touches_device(&self.uni_z.endpoint.dpid) {
            return Err(PathError::WrongEnd(self.uni_z.endpoint.dpid.clone()));
        }
        Ok(())
    }

    pub(crate) fn set_status(&mut self, status: CircuitStatus) {
        self.status = status;
    }

    /// Serializable summary for API responses
    pub fn view(&self) -> CircuitView<'_> {
        CircuitView {
            id: &self.id,
            name: &self.name,
            uni_a: &self.uni_a,
            uni_z: &self.uni_z,
            bandwidth: self.bandwidth,
            path: &self.path,
            status: self.status,
            creation_time: self.creation_time,
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit {} ({} -> {}, {} bps, {})",
            self.id, self.uni_a.endpoint, self.uni_z.endpoint, self.bandwidth, self.status
        )
    }
}

/// Public view of a [`Circuit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitView<'a> {
    /// ID of the circuit
    pub id: &'a str,
    /// Name of the circuit
    pub name: &'a str,
    /// First UNI
    pub uni_a: &'a Uni,
    /// Second UNI
    pub uni_z: &'a Uni,
    /// Reserved bandwidth
    pub bandwidth: u64,
    /// Links of the path
    pub path: &'a [Link],
    /// Status
    pub status: CircuitStatus,
    /// Time at which the circuit was requested
    pub creation_time: DateTime<Utc>,
}
