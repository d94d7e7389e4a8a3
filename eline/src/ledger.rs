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

//! # Capacity Ledger
//!
//! The ledger does not hold any state. The committed bandwidth of a link is recomputed from the
//! set of all stored circuits every time it is needed.

use crate::model::ordered;
use crate::model::{Circuit, Endpoint, Link};

use std::collections::HashMap;

/// Maximum aggregate bandwidth of a link if the topology does not say otherwise (100 Gb/s).
pub const DEFAULT_CAPACITY_CEILING: u64 = 100_000_000_000;

/// # Capacity Table
///
/// Total capacity of every link. Links without explicit capacity use the ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    ceiling: u64,
    links: HashMap<(Endpoint, Endpoint), u64>,
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_CEILING)
    }
}

impl CapacityTable {
    /// Create a table where every link has the capacity `ceiling`
    pub fn new(ceiling: u64) -> Self {
        Self { ceiling, links: HashMap::new() }
    }

    /// Capacity of links without explicit capacity
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Set the capacity of the link between `a` and `b` (in both directions).
    pub fn insert(&mut self, a: &Endpoint, b: &Endpoint, capacity: u64) {
        self.links.insert(ordered(a, b), capacity);
    }

    /// Capacity of the physical hop used by `link`
    pub fn capacity_of(&self, link: &Link) -> u64 {
        self.links.get(&link.key()).copied().unwrap_or(self.ceiling)
    }
}

impl Extend<(Endpoint, Endpoint, u64)> for CapacityTable {
    fn extend<T: IntoIterator<Item = (Endpoint, Endpoint, u64)>>(&mut self, iter: T) {
        for (a, b, capacity) in iter {
            self.insert(&a, &b, capacity);
        }
    }
}

/// Bandwidth committed on the physical hop of `link` by all `circuits`. Each circuit counts at
/// most once, with the first of its links matching `link`.
pub fn committed(link: &Link, circuits: &[Circuit]) -> u64 {
    circuits
        .iter()
        .filter_map(|c| c.path().iter().find(|l| l.matches(link)))
        .fold(0u64, |acc, l| acc.saturating_add(l.bandwidth))
}

/// Check if the link can carry `link.bandwidth` in addition to what is already committed by
/// `circuits`. Returns the committed bandwidth, or `None` if the total would exceed `capacity`.
pub fn availability(link: &Link, circuits: &[Circuit], capacity: u64) -> Option<u64> {
    let committed = committed(link, circuits);
    if committed.saturating_add(link.bandwidth) > capacity {
        None
    } else {
        Some(committed)
    }
}
