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
use crate::forwarding::*;
use crate::model::{Circuit, Link};

use maplit::hashset;
use std::sync::Arc;

fn single_switch() -> Circuit {
    let mut c = circuit(endpoint(DPID_A, 1), endpoint(DPID_A, 2), 100, GBPS);
    c.attach_path(vec![Link::new(endpoint(DPID_A, 1), endpoint(DPID_A, 2), GBPS)]).unwrap();
    c
}

#[test]
fn test_rules_single_switch() {
    let c = single_switch();
    assert_eq!(
        flow_rules(&c).unwrap(),
        vec![
            (DPID_A.to_string(), FlowRule { in_port: 1, vlan: 100, out_port: 2 }),
            (DPID_A.to_string(), FlowRule { in_port: 2, vlan: 100, out_port: 1 }),
        ]
    );
}

#[test]
fn test_rules_skip_inter_switch_hops() {
    let mut c = circuit(endpoint(DPID_A, 1), endpoint(DPID_B, 2), 7, GBPS);
    c.attach_path(vec![
        Link::new(endpoint(DPID_A, 1), endpoint(DPID_A, 3), GBPS),
        Link::new(endpoint(DPID_A, 3), endpoint(DPID_B, 3), GBPS),
        Link::new(endpoint(DPID_B, 3), endpoint(DPID_B, 2), GBPS),
    ])
    .unwrap();
    let rules = flow_rules(&c).unwrap();
    assert_eq!(rules.len(), 4);
    assert!(rules.iter().all(|(_, r)| r.vlan == 7));
    assert!(rules.contains(&(DPID_B.to_string(), FlowRule { in_port: 3, vlan: 7, out_port: 2 })));
    assert!(!rules.iter().any(|(_, r)| r.in_port == 3 && r.out_port == 3));
}

#[test]
fn test_rules_without_path() {
    let c = circuit(endpoint(DPID_A, 1), endpoint(DPID_A, 2), 100, GBPS);
    assert_eq!(flow_rules(&c).unwrap(), vec![]);
}

#[test]
fn test_apply_and_remove() {
    let flows = Arc::new(RecordingFlows::new());
    let driver = ForwardingDriver::new(flows.clone());
    let c = single_switch();

    assert_eq!(driver.apply_circuit(&c, FlowMode::Install).unwrap(), 2);
    assert_eq!(
        flows.installed(),
        hashset! {
            (DPID_A.to_string(), FlowRule { in_port: 1, vlan: 100, out_port: 2 }),
            (DPID_A.to_string(), FlowRule { in_port: 2, vlan: 100, out_port: 1 }),
        }
    );

    // installing twice does not change anything
    assert_eq!(driver.apply_circuit(&c, FlowMode::Install).unwrap(), 2);
    assert_eq!(flows.installed().len(), 2);

    assert_eq!(driver.apply_circuit(&c, FlowMode::Remove).unwrap(), 2);
    assert!(flows.installed().is_empty());
    assert_eq!(driver.apply_circuit(&c, FlowMode::Remove).unwrap(), 2);
}

#[test]
fn test_apply_failure() {
    let flows = Arc::new(RecordingFlows::new());
    flows.set_failing(true);
    let driver = ForwardingDriver::new(flows.clone());
    match driver.apply_circuit(&single_switch(), FlowMode::Install) {
        Err(DriverError::Rejected { dpid, .. }) => assert_eq!(dpid, DPID_A),
        r => panic!("Unexpected result: {:?}", r),
    }
    // every rule was attempted
    assert_eq!(flows.requests(), 2);
    assert!(flows.installed().is_empty());
}
