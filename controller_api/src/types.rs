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

//! # Controller API Types

use serde::{Deserialize, Serialize};

/// Response of the pathfinder
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PathfinderResponse {
    /// All paths found between the two interfaces
    #[serde(default)]
    pub paths: Vec<PathfinderPath>,
}

/// Single path returned by the pathfinder
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PathfinderPath {
    /// Hops of the path. Interfaces are written as `{dpid}:{port}`, but the list may also contain
    /// other nodes, like the switch itself.
    #[serde(default)]
    pub hops: Vec<String>,
    /// Capacity of the links on this path, if the topology knows about them.
    #[serde(default)]
    pub link_capacities: Vec<LinkCapacity>,
}

/// Capacity of a single link, between two interfaces
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LinkCapacity {
    /// First interface of the link (hop token)
    pub endpoint_a: String,
    /// Second interface of the link (hop token)
    pub endpoint_b: String,
    /// Total capacity of the link in bits per second
    pub capacity: u64,
}

/// Match fields of a flow
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowMatch {
    /// Inbound port
    pub in_port: u32,
    /// VLAN ID
    pub dl_vlan: u16,
}

/// Kind of a flow action
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Send the packet out of a port
    #[serde(rename = "output")]
    Output,
}

/// Action of a flow
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowAction {
    /// Type of the action
    pub action_type: ActionType,
    /// Port on which the action applies
    pub port: u32,
}

/// Flow to be installed by the flow manager
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FlowInstall {
    /// Match fields
    #[serde(rename = "match")]
    pub flow_match: FlowMatch,
    /// Actions applied on matching packets
    pub actions: Vec<FlowAction>,
}

impl FlowInstall {
    /// Forward all packets from `in_port` with the given VLAN to `out_port`
    pub fn output(in_port: u32, dl_vlan: u16, out_port: u32) -> Self {
        Self {
            flow_match: FlowMatch { in_port, dl_vlan },
            actions: vec![FlowAction { action_type: ActionType::Output, port: out_port }],
        }
    }
}

/// Flow to be deleted by the flow manager
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct FlowDelete {
    /// Output port of the flow
    pub out_port: u32,
    /// Match fields
    #[serde(rename = "match")]
    pub flow_match: FlowMatch,
}

impl FlowDelete {
    /// Delete the flow forwarding packets from `in_port` with the given VLAN to `out_port`
    pub fn output(in_port: u32, dl_vlan: u16, out_port: u32) -> Self {
        Self { out_port, flow_match: FlowMatch { in_port, dl_vlan } }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn install_body() {
        let flow = FlowInstall::output(1, 100, 2);
        assert_eq!(
            serde_json::to_value(&[flow]).unwrap(),
            json!([{
                "match": {"in_port": 1, "dl_vlan": 100},
                "actions": [{"action_type": "output", "port": 2}]
            }])
        );
    }

    #[test]
    fn delete_body() {
        let flow = FlowDelete::output(1, 100, 2);
        assert_eq!(
            serde_json::to_value(&[flow]).unwrap(),
            json!([{"out_port": 2, "match": {"in_port": 1, "dl_vlan": 100}}])
        );
    }

    #[test]
    fn parse_paths() {
        let response: PathfinderResponse = serde_json::from_str(
            r#"{"paths": [
                {"hops": ["00:00:00:00:00:00:00:01:1", "00:00:00:00:00:00:00:01"]},
                {"hops": [], "link_capacities": [
                    {"endpoint_a": "a", "endpoint_b": "b", "capacity": 10}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.paths.len(), 2);
        assert_eq!(response.paths[0].hops[1], "00:00:00:00:00:00:00:01");
        assert!(response.paths[0].link_capacities.is_empty());
        assert_eq!(
            response.paths[1].link_capacities,
            vec![LinkCapacity { endpoint_a: "a".into(), endpoint_b: "b".into(), capacity: 10 }]
        );
    }

    #[test]
    fn parse_missing_paths() {
        let response: PathfinderResponse = serde_json::from_str("{}").unwrap();
        assert!(response.paths.is_empty());
    }
}
