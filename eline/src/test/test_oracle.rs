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

use super::fakes::*;
use crate::model::{Tag, Uni};
use crate::oracle::*;

use controller_api::{LinkCapacity, PathfinderPath};

fn uni(dpid: &str, port: u32) -> Uni {
    Uni::new(endpoint(dpid, port), Some(Tag::ctag(100)))
}

#[test]
fn test_from_pathfinder() {
    let path = PathfinderPath {
        hops: vec![hop(DPID_A, 1), DPID_A.to_string(), hop(DPID_A, 2), hop(DPID_B, 1)],
        link_capacities: vec![
            LinkCapacity { endpoint_a: hop(DPID_A, 2), endpoint_b: hop(DPID_B, 1), capacity: 10 },
            // not an interface, ignored
            LinkCapacity { endpoint_a: DPID_A.into(), endpoint_b: hop(DPID_B, 1), capacity: 20 },
        ],
    };
    let candidate = CandidatePath::from(path);
    assert_eq!(candidate.hops.len(), 4);
    assert_eq!(candidate.capacities, vec![(endpoint(DPID_A, 2), endpoint(DPID_B, 1), 10)]);
    assert_eq!(
        candidate.endpoints().unwrap(),
        vec![endpoint(DPID_A, 1), endpoint(DPID_A, 2), endpoint(DPID_B, 1)]
    );
}

#[test]
fn test_connects() {
    let candidate = CandidatePath::new(vec![hop(DPID_A, 3), hop(DPID_B, 3)]);
    // only the switches of the UNIs matter
    assert!(candidate.connects(&uni(DPID_A, 1), &uni(DPID_B, 1)));
    assert!(!candidate.connects(&uni(DPID_B, 1), &uni(DPID_A, 1)));
    assert!(!candidate.connects(&uni(DPID_A, 1), &uni(DPID_C, 1)));

    let too_short = CandidatePath::new(vec![hop(DPID_A, 3), DPID_B.to_string()]);
    assert!(!too_short.connects(&uni(DPID_A, 1), &uni(DPID_A, 3)));

    let malformed = CandidatePath::new(vec![hop(DPID_A, 3), format!("{}:b", DPID_B)]);
    assert!(!malformed.connects(&uni(DPID_A, 1), &uni(DPID_B, 1)));
}

