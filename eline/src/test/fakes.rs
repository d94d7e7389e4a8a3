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

//! Collaborators which replace the controller and the disk in the tests.

use crate::forwarding::{DriverError, FlowRule, FlowService};
use crate::model::{Circuit, CircuitRequest, Endpoint, Tag, Uni};
use crate::oracle::{CandidatePath, OracleError, PathOracle};
use crate::store::{CircuitStore, MemoryStore, StoreError};

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

pub const DPID_A: &str = "00:00:00:00:00:00:00:0a";
pub const DPID_B: &str = "00:00:00:00:00:00:00:0b";
pub const DPID_C: &str = "00:00:00:00:00:00:00:0c";

pub const GBPS: u64 = 1_000_000_000;

pub fn hop(dpid: &str, port: u32) -> String {
    format!("{}:{}", dpid, port)
}

pub fn endpoint(dpid: &str, port: u32) -> Endpoint {
    Endpoint::new(dpid, port)
}

pub fn request(a: Endpoint, z: Endpoint, vlan: u16, bandwidth: u64) -> CircuitRequest {
    CircuitRequest {
        name: String::from("test"),
        uni_a: Uni::new(a, Some(Tag::ctag(vlan))),
        uni_z: Uni::new(z, Some(Tag::ctag(vlan))),
        bandwidth,
    }
}

pub fn request_json(a: &Endpoint, z: &Endpoint, vlan: u16, bandwidth: u64) -> Vec<u8> {
    format!(
        r#"{{"name": "test",
            "uni_a": {{"dpid": "{}", "port": {}, "tag": {{"tag_type": "ctag", "value": {}}}}},
            "uni_z": {{"dpid": "{}", "port": {}, "tag": {{"tag_type": "ctag", "value": {}}}}},
            "bandwidth": {}}}"#,
        a.dpid, a.port, vlan, z.dpid, z.port, vlan, bandwidth
    )
    .into_bytes()
}

pub fn circuit(a: Endpoint, z: Endpoint, vlan: u16, bandwidth: u64) -> Circuit {
    Circuit::from_request(request(a, z, vlan, bandwidth)).unwrap()
}

/// Oracle returning a fixed list of paths
#[derive(Debug, Default)]
pub struct StaticOracle {
    paths: Mutex<Vec<CandidatePath>>,
    down: AtomicBool,
    calls: AtomicUsize,
}

impl StaticOracle {
    pub fn new(paths: Vec<CandidatePath>) -> Self {
        Self { paths: Mutex::new(paths), ..Default::default() }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PathOracle for StaticOracle {
    fn candidate_paths(
        &self,
        _: &Endpoint,
        _: &Endpoint,
    ) -> Result<Vec<CandidatePath>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable(String::from("connection refused")));
        }
        Ok(self.paths.lock().unwrap().clone())
    }
}

/// Stops a flow installation until the test releases it
#[derive(Debug)]
pub struct Gate {
    entered: Barrier,
    release: Barrier,
}

impl Gate {
    /// Block until the installation has reached the gate
    pub fn wait_entered(&self) {
        self.entered.wait();
    }

    /// Let the installation continue
    pub fn release(&self) {
        self.release.wait();
    }

    fn pass(&self) {
        self.entered.wait();
        self.release.wait();
    }
}

/// Flow service keeping track of the rules currently installed on each switch
#[derive(Debug, Default)]
pub struct RecordingFlows {
    rules: Mutex<HashSet<(String, FlowRule)>>,
    failing: AtomicBool,
    requests: AtomicUsize,
    gate: Mutex<Option<Arc<Gate>>>,
}

impl RecordingFlows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The next installed rule waits at the returned gate
    pub fn hold_next_install(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate { entered: Barrier::new(2), release: Barrier::new(2) });
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn installed(&self) -> HashSet<(String, FlowRule)> {
        self.rules.lock().unwrap().clone()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn check(&self, dpid: &str) -> Result<(), DriverError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(DriverError::Rejected { dpid: dpid.to_string(), message: "offline".into() })
        } else {
            Ok(())
        }
    }
}

impl FlowService for RecordingFlows {
    fn install(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.pass();
        }
        self.check(dpid)?;
        self.rules.lock().unwrap().insert((dpid.to_string(), *rule));
        Ok(())
    }

    fn remove(&self, dpid: &str, rule: &FlowRule) -> Result<(), DriverError> {
        self.check(dpid)?;
        self.rules.lock().unwrap().remove(&(dpid.to_string(), *rule));
        Ok(())
    }
}

/// Memory store whose writes can be made to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
    forgetful: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every circuit is deleted right after it was listed, as if a teardown happened in between.
    pub fn set_forgetful(&self, forgetful: bool) {
        self.forgetful.store(forgetful, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Poisoned)
        } else {
            Ok(())
        }
    }
}

impl CircuitStore for FlakyStore {
    fn save(&self, circuit: &Circuit) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save(circuit)
    }

    fn load(&self, id: &str) -> Result<Option<Circuit>, StoreError> {
        self.inner.load(id)
    }

    fn list(&self) -> Result<Vec<Circuit>, StoreError> {
        let circuits = self.inner.list()?;
        if self.forgetful.load(Ordering::SeqCst) {
            for c in circuits.iter() {
                self.inner.delete(c.id())?;
            }
        }
        Ok(circuits)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.delete(id)
    }
}
