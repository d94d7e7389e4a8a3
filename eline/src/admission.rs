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

//! # Circuit Admission
//!
//! The [`CircuitManager`] drives the whole lifecycle of a circuit:
//!
//! 1. **Requested**: The request is parsed and validated. Invalid requests are rejected before any
//!    other service is contacted.
//! 2. **PathRequested**: The topology oracle is asked for all candidate paths between the two UNIs.
//! 3. **PathSelected**: The [`PathSelector`] picks the candidate with the lowest usage, based on
//!    all stored circuits.
//! 4. **Persisted**: The path is attached, and the circuit is stored with status
//!    [`CircuitStatus::PendingFlows`].
//! 5. **FlowsInstalled**: The forwarding rules are installed, and the circuit becomes
//!    [`CircuitStatus::Active`].
//!
//! Steps 3 and 4 happen while holding the admission lock. Hence, two concurrent requests cannot
//! both see the capacity of a link that only one of them can get.
//!
//! Step 5 holds the admission lock as well, and only installs the flows if the stored circuit is
//! still [`CircuitStatus::PendingFlows`]. A teardown first marks the circuit as
//! [`CircuitStatus::PendingRemoval`] under the same lock, and removes the flows only afterwards.
//! Hence, flows are never installed after the teardown of their circuit has started. A circuit
//! that is torn down before its flows are installed yields [`Error::Conflict`].
//!
//! Installing the forwarding rules is not transactional with storing the circuit. If the flow
//! service fails, the circuit remains stored as [`CircuitStatus::PendingFlows`], and
//! [`CircuitManager::reconcile`] retries later. The same holds for the teardown, where the circuit
//! is kept as [`CircuitStatus::PendingRemoval`] until all of its rules are removed. Removing the
//! flows happens without the admission lock.

use crate::forwarding::{FlowMode, FlowService, ForwardingDriver};
use crate::ledger::CapacityTable;
use crate::model::{Circuit, CircuitRequest, CircuitStatus, ValidationError};
use crate::oracle::{CandidatePath, PathOracle};
use crate::selector::PathSelector;
use crate::settings::Settings;
use crate::store::{CircuitStore, FileStore};
use crate::{Error, Result};

use controller_api::{FlowManager, Pathfinder};
use log::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Circuits whose flows are now installed
    pub activated: Vec<String>,
    /// Circuits which are now removed
    pub removed: Vec<String>,
    /// Circuits which still could not be handled, together with the reason
    pub failed: Vec<(String, String)>,
}

impl ReconcileReport {
    /// Returns true if nothing had to be done
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }

    fn record_failure(&mut self, id: String, error: Error) {
        match error {
            // deleted concurrently, nothing left to do
            Error::NotFound(_) | Error::Conflict(_) => {
                debug!("Circuit {} vanished during reconciliation", id)
            }
            e => {
                warn!("Cannot reconcile circuit {}: {}", id, e);
                self.failed.push((id, e.to_string()));
            }
        }
    }
}

/// # Circuit Manager
///
/// Entry point for creating, inspecting and removing circuits. The manager can be shared between
/// threads; all operations take `&self`.
pub struct CircuitManager {
    oracle: Box<dyn PathOracle>,
    driver: ForwardingDriver<Box<dyn FlowService>>,
    store: Box<dyn CircuitStore>,
    capacity_ceiling: u64,
    admission_lock: Mutex<()>,
}

impl CircuitManager {
    /// Create a new manager from its collaborators.
    pub fn new(
        oracle: impl PathOracle + 'static,
        flows: impl FlowService + 'static,
        store: impl CircuitStore + 'static,
        capacity_ceiling: u64,
    ) -> Self {
        Self {
            oracle: Box::new(oracle),
            driver: ForwardingDriver::new(Box::new(flows)),
            store: Box::new(store),
            capacity_ceiling,
            admission_lock: Mutex::new(()),
        }
    }

    /// Create a manager talking to the controller and storing circuits on disk, as configured in
    /// `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let timeout = settings.request_timeout();
        let pathfinder = Pathfinder::new(settings.pathfinder_url.as_str(), timeout)?;
        let flow_manager = FlowManager::new(settings.flow_manager_url.as_str(), timeout)?;
        info!(
            "Using pathfinder at {}, flow manager at {}, storing circuits in {}",
            pathfinder.base_url(),
            flow_manager.base_url(),
            settings.circuits_path.display()
        );
        Ok(Self::new(
            pathfinder,
            flow_manager,
            FileStore::new(&settings.circuits_path),
            settings.capacity_ceiling,
        ))
    }

    /// All stored circuits
    pub fn list(&self) -> Result<Vec<Circuit>> {
        Ok(self.store.list()?)
    }

    /// The circuit with the given ID
    pub fn get(&self, id: &str) -> Result<Circuit> {
        self.store.load(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Parse the JSON request and admit the new circuit. See [`CircuitManager::admit`].
    pub fn create(&self, request: &[u8]) -> Result<Circuit> {
        let circuit = Circuit::from_request(CircuitRequest::from_json(request)?)?;
        self.admit(circuit)
    }

    /// Select a path for the circuit, store it and install its flows. The circuit must not have
    /// a path yet.
    ///
    /// If the flows cannot be installed, [`Error::Forwarding`] is returned, but the circuit stays
    /// stored with status [`CircuitStatus::PendingFlows`]. If the circuit is deleted before its
    /// flows are installed, [`Error::Conflict`] is returned.
    pub fn admit(&self, mut circuit: Circuit) -> Result<Circuit> {
        let (uni_a, uni_z) = (circuit.uni_a().clone(), circuit.uni_z().clone());
        info!("Requesting paths for {}", circuit);
        let candidates = self.oracle.candidate_paths(&uni_a.endpoint, &uni_z.endpoint)?;
        if candidates.is_empty() {
            error!("Pathfinder returned no path for {}", circuit);
            return Err(Error::NoPath);
        }

        let mut capacities = CapacityTable::new(self.capacity_ceiling);
        capacities.extend(candidates.iter().flat_map(|c| c.capacities.iter().cloned()));
        let candidates: Vec<CandidatePath> =
            candidates.into_iter().filter(|c| c.connects(&uni_a, &uni_z)).collect();
        if candidates.is_empty() {
            error!("Pathfinder returned no path connecting {}", circuit);
            return Err(Error::NoPath);
        }

        {
            let _guard = self.lock();
            let circuits = self.store.list()?;
            if circuits.iter().any(|c| c.id() == circuit.id()) {
                return Err(ValidationError::DuplicateId(circuit.id().to_string()).into());
            }
            let selection = PathSelector::new(&circuits, &capacities)
                .select_best_path(&candidates, circuit.bandwidth())
                .ok_or(Error::InsufficientResources)?;
            info!(
                "Selected path {} with usage {} for circuit {}",
                selection.index,
                selection.usage,
                circuit.id()
            );
            circuit.attach_path(selection.links)?;
            circuit.set_status(CircuitStatus::PendingFlows);
            self.store.save(&circuit)?;
        }

        self.install(&mut circuit)?;
        Ok(circuit)
    }

    /// Remove the flows of the circuit, and delete it.
    ///
    /// If the flows cannot be removed, [`Error::Forwarding`] is returned, and the circuit stays
    /// stored with status [`CircuitStatus::PendingRemoval`].
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut circuit = {
            let _guard = self.lock();
            let mut circuit = self.get(id)?;
            circuit.set_status(CircuitStatus::PendingRemoval);
            self.store.save(&circuit)?;
            circuit
        };
        self.remove(&mut circuit)
    }

    /// Retry all incomplete transitions: install the flows of circuits that are
    /// [`CircuitStatus::PendingFlows`], and finish the removal of circuits that are
    /// [`CircuitStatus::PendingRemoval`].
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::default();
        for mut circuit in self.store.list()? {
            let id = circuit.id().to_string();
            match circuit.status() {
                CircuitStatus::Active => {}
                CircuitStatus::PendingFlows => match self.install(&mut circuit) {
                    Ok(()) => report.activated.push(id),
                    Err(e) => report.record_failure(id, e),
                },
                CircuitStatus::PendingRemoval => match self.remove(&mut circuit) {
                    Ok(()) => report.removed.push(id),
                    Err(e) => report.record_failure(id, e),
                },
            }
        }
        if !report.is_empty() {
            info!(
                "Reconciliation: {} activated, {} removed, {} failed",
                report.activated.len(),
                report.removed.len(),
                report.failed.len()
            );
        }
        Ok(report)
    }

    /// Install the flows, and mark the circuit as active. Nothing is installed unless the stored
    /// circuit is still pending. The admission lock is held throughout, such that a teardown cannot
    /// start while the flows are being installed.
    fn install(&self, circuit: &mut Circuit) -> Result<()> {
        let _guard = self.lock();
        match self.store.load(circuit.id())?.map(|c| c.status()) {
            Some(CircuitStatus::PendingFlows) => {}
            Some(CircuitStatus::Active) => {
                debug!("Circuit {} is already active", circuit.id());
                circuit.set_status(CircuitStatus::Active);
                return Ok(());
            }
            status => {
                warn!("Circuit {} was removed before its flows were installed", circuit.id());
                circuit.set_status(status.unwrap_or(CircuitStatus::PendingRemoval));
                return Err(Error::Conflict(circuit.id().to_string()));
            }
        }
        self.driver
            .apply_circuit(circuit, FlowMode::Install)
            .map_err(|e| Error::Forwarding(circuit.id().to_string(), e))?;
        circuit.set_status(CircuitStatus::Active);
        self.store.save(circuit)?;
        info!("Circuit {} is active", circuit.id());
        Ok(())
    }

    /// Remove the flows, and delete the record. The circuit must already be stored as
    /// [`CircuitStatus::PendingRemoval`].
    fn remove(&self, circuit: &mut Circuit) -> Result<()> {
        self.driver
            .apply_circuit(circuit, FlowMode::Remove)
            .map_err(|e| Error::Forwarding(circuit.id().to_string(), e))?;
        let _guard = self.lock();
        if self.store.delete(circuit.id())? {
            info!("Circuit {} is deleted", circuit.id());
        } else {
            // a concurrent teardown was faster, but the flows are removed either way
            debug!("Circuit {} was already deleted", circuit.id());
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.admission_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
