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

//! # Topology Oracle
//!
//! The oracle returns all candidate paths between two interfaces. The default implementation asks
//! the pathfinder of the controller.

use crate::model::{clean_path, Endpoint, HopError, Uni};

use controller_api::{Pathfinder, PathfinderPath};
use log::*;
use std::sync::Arc;
use thiserror::Error;

/// Error of the topology oracle
#[derive(Debug, Error)]
pub enum OracleError {
    /// The request to the controller failed
    #[error("Controller API Error: {0}")]
    Api(#[from] controller_api::Error),
    /// The oracle cannot answer for another reason
    #[error("Topology oracle unavailable: {0}")]
    Unavailable(String),
}

/// Candidate path returned by the oracle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidatePath {
    /// Raw hop tokens, including metadata tokens
    pub hops: Vec<String>,
    /// Total capacity of the links on this path, where known
    pub capacities: Vec<(Endpoint, Endpoint, u64)>,
}

impl CandidatePath {
    /// Create a candidate path without capacity information
    pub fn new<S: Into<String>>(hops: impl IntoIterator<Item = S>) -> Self {
        Self { hops: hops.into_iter().map(|h| h.into()).collect(), capacities: Vec::new() }
    }

    /// Interfaces of the path, in order
    pub fn endpoints(&self) -> Result<Vec<Endpoint>, HopError> {
        clean_path(&self.hops)
    }

    /// Returns true if the path consists of at least one link, starting at the switch of `uni_a`
    /// and ending at the switch of `uni_z`.
    pub fn connects(&self, uni_a: &Uni, uni_z: &Uni) -> bool {
        match self.endpoints() {
            Ok(endpoints) if endpoints.len() >= 2 => {
                endpoints[0].same_device(&uni_a.endpoint)
                    && endpoints[endpoints.len() - 1].same_device(&uni_z.endpoint)
            }
            Ok(_) => false,
            Err(e) => {
                warn!("Ignoring candidate path: {}", e);
                false
            }
        }
    }
}

impl From<PathfinderPath> for CandidatePath {
    fn from(path: PathfinderPath) -> Self {
        let capacities = path
            .link_capacities
            .into_iter()
            .filter_map(|c| match clean_path(&[&c.endpoint_a, &c.endpoint_b]) {
                Ok(mut e) if e.len() == 2 => {
                    let b = e.pop()?;
                    let a = e.pop()?;
                    Some((a, b, c.capacity))
                }
                _ => {
                    warn!("Ignoring capacity of {} <-> {}", c.endpoint_a, c.endpoint_b);
                    None
                }
            })
            .collect();
        Self { hops: path.hops, capacities }
    }
}

/// # Topology Oracle
pub trait PathOracle: Send + Sync {
    /// Return all candidate paths between the two endpoints, in the order of preference of the
    /// oracle.
    fn candidate_paths(
        &self,
        source: &Endpoint,
        target: &Endpoint,
    ) -> Result<Vec<CandidatePath>, OracleError>;
}

impl PathOracle for Pathfinder {
    fn candidate_paths(
        &self,
        source: &Endpoint,
        target: &Endpoint,
    ) -> Result<Vec<CandidatePath>, OracleError> {
        let paths = self.get_paths(&source.dpid, source.port, &target.dpid, target.port)?;
        debug!("Pathfinder returned {} paths from {} to {}", paths.len(), source, target);
        Ok(paths.into_iter().map(CandidatePath::from).collect())
    }
}

impl<T: PathOracle + ?Sized> PathOracle for Box<T> {
    fn candidate_paths(
        &self,
        source: &Endpoint,
        target: &Endpoint,
    ) -> Result<Vec<CandidatePath>, OracleError> {
        (**self).candidate_paths(source, target)
    }
}

impl<T: PathOracle + ?Sized> PathOracle for Arc<T> {
    fn candidate_paths(
        &self,
        source: &Endpoint,
        target: &Endpoint,
    ) -> Result<Vec<CandidatePath>, OracleError> {
        (**self).candidate_paths(source, target)
    }
}
