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

//! # Path Selector
//!
//! Every candidate path is evaluated with the [capacity ledger](crate::ledger). The usage of a
//! path is the sum of the bandwidth already committed on each of its links. The feasible candidate
//! with the strictly lowest usage is selected. On a tie, the candidate that comes first wins, such
//! that the order of the oracle acts as the tie-break.

use crate::ledger::{availability, CapacityTable};
use crate::model::{Circuit, Endpoint, Link};
use crate::oracle::CandidatePath;

use itertools::Itertools;
use log::*;

/// Path chosen by the [`PathSelector`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position of the chosen candidate in the list of candidates
    pub index: usize,
    /// Links of the path, each carrying the requested bandwidth
    pub links: Vec<Link>,
    /// Sum of the bandwidth already committed on all links of the path
    pub usage: u64,
}

/// # Path Selector
///
/// Evaluates paths against a fixed set of admitted circuits.
#[derive(Debug, Clone, Copy)]
pub struct PathSelector<'a> {
    circuits: &'a [Circuit],
    capacities: &'a CapacityTable,
}

impl<'a> PathSelector<'a> {
    /// Create a new selector for the currently admitted `circuits`.
    pub fn new(circuits: &'a [Circuit], capacities: &'a CapacityTable) -> Self {
        Self { circuits, capacities }
    }

    /// Build the links between consecutive endpoints, and compute the usage of the path. Returns
    /// `None` if any link cannot absorb `bandwidth`.
    pub fn path_usage(&self, endpoints: &[Endpoint], bandwidth: u64) -> Option<(Vec<Link>, u64)> {
        let mut usage: u64 = 0;
        let mut links = Vec::with_capacity(endpoints.len().saturating_sub(1));
        for (a, b) in endpoints.iter().tuple_windows() {
            let link = Link::new(a.clone(), b.clone(), bandwidth);
            let committed =
                availability(&link, self.circuits, self.capacities.capacity_of(&link))?;
            usage = usage.saturating_add(committed);
            links.push(link);
        }
        Some((links, usage))
    }

    /// Select the best path out of `candidates`, or `None` if no candidate can absorb
    /// `bandwidth`. Candidates with malformed hop tokens are skipped.
    pub fn select_best_path(
        &self,
        candidates: &[CandidatePath],
        bandwidth: u64,
    ) -> Option<Selection> {
        let mut best: Option<Selection> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let endpoints = match candidate.endpoints() {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping candidate path {}: {}", index, e);
                    continue;
                }
            };
            let (links, usage) = match self.path_usage(&endpoints, bandwidth) {
                Some(x) => x,
                None => {
                    debug!("Candidate path {} cannot absorb {} bps", index, bandwidth);
                    continue;
                }
            };
            trace!("Candidate path {} has usage {}", index, usage);
            if best.as_ref().map(|b| usage < b.usage).unwrap_or(true) {
                best = Some(Selection { index, links, usage });
            }
        }
        best
    }
}
