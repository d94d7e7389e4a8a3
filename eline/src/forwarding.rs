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

//! # Forwarding Driver
//!
//! Translates the path of a circuit into forwarding rules. Only hops where both endpoints are on
//! the same switch are programmed. Each such hop gets two rules, one per direction, both matching
//! on the VLAN ID of `uni_a`. Hops between two switches are not programmed.

use crate::model::Circuit;

use controller_api::{FlowDelete, FlowInstall, FlowManager};
use log::*;
use std::sync::Arc;
use thiserror::Error;

/// Error of the forwarding driver
#[derive(Debug, Error)]
pub enum DriverError {
    /// The request to the controller failed
    #[error("Controller API Error: {0}")]
    Api(#[from] controller_api::Error),
    /// The flow service refused the operation
    #[error("Flow operation on {dpid} failed: {message}")]
    Rejected {
        /// Switch on which the operation was performed
        dpid: String,
        /// Reason
        message: String,
    },
    /// The circuit has no VLAN ID to match on
    #[error("Circuit {0} has no VLAN tag on uni_a")]
    MissingTag(String),
}

/// Whether the rules are installed or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowMode {
    /// Install the rules
    Install,
    /// Remove the rules
    Remove,
}

/// Forwarding rule on a single switch: packets entering at `in_port` with VLAN ID `vlan` leave
/// at `out_port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowRule {
    /// Inbound port
    pub in_port: u32,
    /// VLAN ID to match on
    pub vlan: u16,
    /// Outbound port
    pub out_port: u32,
}

/// # Flow Service
///
/// Service which programs the forwarding rules on the switches. Both operations must be
/// idempotent: installing an existing rule, or removing a missing one, succeeds.
pub trait FlowService: Send + Sync {
    /// Install the rule on the switch `dpid`
    fn install(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError>;
    /// Remove the rule from the switch `dpid`
    fn remove(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError>;
}

impl FlowService for FlowManager {
    fn install(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        let flow = FlowInstall::output(rule.in_port, rule.vlan, rule.out_port);
        Ok(self.install_flows(dpid, &[flow])?)
    }

    fn remove(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        let flow = FlowDelete::output(rule.in_port, rule.vlan, rule.out_port);
        Ok(self.delete_flows(dpid, &[flow])?)
    }
}

impl<T: FlowService + ?Sized> FlowService for Box<T> {
    fn install(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        (**self).install(dpid, rule)
    }

    fn remove(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        (**self).remove(dpid, rule)
    }
}

impl<T: FlowService + ?Sized> FlowService for Arc<T> {
    fn install(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        (**self).install(dpid, rule)
    }

    fn remove(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        (**self).remove(dpid, rule)
    }
}

/// All rules of the circuit, as `(dpid, rule)` pairs.
pub fn flow_rules(circuit: &Circuit) -> Result<Vec<(String, FlowRule)>, DriverError> {
    let vlan = circuit.vlan().ok_or_else(|| DriverError::MissingTag(circuit.id().to_string()))?;
    let mut rules = Vec::new();
    for link in circuit.path() {
        if !link.is_intra_device() {
            debug!("Not programming the inter-switch hop {}", link);
            continue;
        }
        let (a, b) = (&link.endpoint_a, &link.endpoint_b);
        rules.push((a.dpid.clone(), FlowRule { in_port: a.port, vlan, out_port: b.port }));
        rules.push((a.dpid.clone(), FlowRule { in_port: b.port, vlan, out_port: a.port }));
    }
    Ok(rules)
}

/// # Forwarding Driver
#[derive(Debug)]
pub struct ForwardingDriver<F> {
    service: F,
}

impl<F: FlowService> ForwardingDriver<F> {
    /// Create a new driver using the given flow service
    pub fn new(service: F) -> Self {
        Self { service }
    }

    /// Install or remove all rules of the circuit. Every rule is attempted, even if an earlier
    /// one failed. Returns the number of rules applied, or the first error.
    pub fn apply_circuit(&self, circuit: &Circuit, mode: FlowMode) -> Result<usize, DriverError> {
        let mut first_error = None;
        let mut applied = 0;
        for (dpid, rule) in flow_rules(circuit)? {
            let result = match mode {
                FlowMode::Install => self.service.install(&dpid, &rule),
                FlowMode::Remove => self.service.remove(&dpid, &rule),
            };
            match result {
                Ok(()) => applied += 1,
                Err(e) => {
                    error!("{:?} of {:?} on {} failed for {}: {}", mode, rule, dpid, circuit, e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(applied),
        }
    }
}
