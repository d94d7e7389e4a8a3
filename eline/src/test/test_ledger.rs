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
use crate::ledger::*;
use crate::model::{Circuit, Link};

fn admitted(links: Vec<Link>) -> Circuit {
    let a = links[0].endpoint_a.clone();
    let z = links[links.len() - 1].endpoint_b.clone();
    let mut c = circuit(a, z, 100, links[0].bandwidth);
    c.attach_path(links).unwrap();
    c
}

#[test]
fn test_committed() {
    let ab = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 0);
    let bc = Link::new(endpoint(DPID_B, 2), endpoint(DPID_C, 1), 0);

    let circuits = vec![
        admitted(vec![Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 30 * GBPS)]),
        // reverse direction counts as well
        admitted(vec![Link::new(endpoint(DPID_B, 1), endpoint(DPID_A, 1), 20 * GBPS)]),
        admitted(vec![Link::new(endpoint(DPID_B, 2), endpoint(DPID_C, 1), 50 * GBPS)]),
    ];

    assert_eq!(committed(&ab, &[]), 0);
    assert_eq!(committed(&ab, &circuits), 50 * GBPS);
    assert_eq!(committed(&bc, &circuits), 50 * GBPS);
}

#[test]
fn test_committed_once_per_circuit() {
    let ab = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 0);
    // a circuit crossing the same hop twice only counts once
    let c = circuit(endpoint(DPID_A, 1), endpoint(DPID_A, 2), 100, 7);
    let looped = vec![
        Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 7),
        Link::new(endpoint(DPID_B, 1), endpoint(DPID_A, 1), 7),
    ];
    let mut value = serde_json::to_value(&c).unwrap();
    value["path"] = serde_json::to_value(&looped).unwrap();
    let c: Circuit = serde_json::from_value(value).unwrap();
    assert_eq!(committed(&ab, &[c]), 7);
}

#[test]
fn test_availability() {
    let existing =
        vec![admitted(vec![Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 95 * GBPS)])];
    let ceiling = 100 * GBPS;

    let fits = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 5 * GBPS);
    assert_eq!(availability(&fits, &existing, ceiling), Some(95 * GBPS));

    let too_much = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 10 * GBPS);
    assert_eq!(availability(&too_much, &existing, ceiling), None);

    let elsewhere = Link::new(endpoint(DPID_A, 2), endpoint(DPID_B, 2), 100 * GBPS);
    assert_eq!(availability(&elsewhere, &existing, ceiling), Some(0));

    let huge = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), u64::MAX);
    assert_eq!(availability(&huge, &existing, ceiling), None);
}

#[test]
fn test_capacity_table() {
    let mut table = CapacityTable::new(10 * GBPS);
    assert_eq!(table.ceiling(), 10 * GBPS);
    table.insert(&endpoint(DPID_B, 1), &endpoint(DPID_A, 1), GBPS);
    table.extend(vec![(endpoint(DPID_B, 2), endpoint(DPID_C, 1), 40 * GBPS)]);

    let ab = Link::new(endpoint(DPID_A, 1), endpoint(DPID_B, 1), 0);
    let ba = Link::new(endpoint(DPID_B, 1), endpoint(DPID_A, 1), 0);
    let bc = Link::new(endpoint(DPID_C, 1), endpoint(DPID_B, 2), 0);
    let other = Link::new(endpoint(DPID_A, 3), endpoint(DPID_B, 3), 0);
    assert_eq!(table.capacity_of(&ab), GBPS);
    assert_eq!(table.capacity_of(&ba), GBPS);
    assert_eq!(table.capacity_of(&bc), 40 * GBPS);
    assert_eq!(table.capacity_of(&other), 10 * GBPS);

    assert_eq!(CapacityTable::default().capacity_of(&other), DEFAULT_CAPACITY_CEILING);
}
