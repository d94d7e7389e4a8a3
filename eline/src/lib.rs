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

#![deny(missing_docs)]

//! # E-Line: Point-to-Point Circuits
//! This library provisions Ethernet point-to-point circuits (E-Lines) on top of an SDN
//! controller. A circuit connects two user-network interfaces (UNIs) and reserves a fixed amount
//! of bandwidth on every hop of its path.
//!
//! ## Structure
//!
//! - **[`Model`](model)**: Endpoints, UNIs, links and circuits, together with the parsing of the
//!   hop tokens returned by the pathfinder.
//!
//! - **[`Ledger`](ledger)**: Computes how much bandwidth is committed on a link, based on all
//!   stored circuits. The ledger holds no state of its own.
//!
//! - **[`Selector`](selector)**: Picks the least loaded feasible path out of the candidates.
//!
//! - **[`Oracle`](oracle)**: Source of candidate paths. The default oracle is the pathfinder of
//!   the controller.
//!
//! - **[`Forwarding`](forwarding)**: Translates the path of a circuit into forwarding rules, and
//!   installs or removes them with the flow manager.
//!
//! - **[`Store`](store)**: Persistence of the circuits, either as JSON files or in memory.
//!
//! - **[`Admission`](admission)**: The [`CircuitManager`], which ties everything together.
//!
//! ## Usage
//!
//! ```
//! use eline::forwarding::{DriverError, FlowRule, FlowService};
//! use eline::model::{CircuitStatus, Endpoint};
//! use eline::oracle::{CandidatePath, OracleError, PathOracle};
//! use eline::store::MemoryStore;
//! use eline::{CircuitManager, Error};
//!
//! struct SingleSwitch;
//!
//! impl PathOracle for SingleSwitch {
//!     fn candidate_paths(
//!         &self,
//!         _: &Endpoint,
//!         _: &Endpoint,
//!     ) -> Result<Vec<CandidatePath>, OracleError> {
//!         Ok(vec![CandidatePath::new(vec![
//!             "00:00:00:00:00:00:00:01:1",
//!             "00:00:00:00:00:00:00:01",
//!             "00:00:00:00:00:00:00:01:2",
//!         ])])
//!     }
//! }
//!
//! struct NoOp;
//!
//! impl FlowService for NoOp {
//!     fn install(&self, _: &str, _: &FlowRule) -> Result<(), DriverError> {
//!         Ok(())
//!     }
//!     fn remove(&self, _: &str, _: &FlowRule) -> Result<(), DriverError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let manager = CircuitManager::new(SingleSwitch, NoOp, MemoryStore::new(), 1000);
//!     let circuit = manager.create(
//!         br#"{
//!             "name": "customer",
//!             "uni_a": {"dpid": "00:00:00:00:00:00:00:01", "port": 1, "tag": {"value": 10}},
//!             "uni_z": {"dpid": "00:00:00:00:00:00:00:01", "port": 2},
//!             "bandwidth": 400
//!         }"#,
//!     )?;
//!     assert_eq!(circuit.status(), CircuitStatus::Active);
//!
//!     manager.delete(circuit.id())?;
//!     assert!(manager.list()?.is_empty());
//!     Ok(())
//! }
//! ```

pub mod admission;
mod error;
pub mod forwarding;
pub mod ledger;
pub mod model;
pub mod oracle;
pub mod selector;
pub mod settings;
pub mod store;
mod test;

pub use admission::{CircuitManager, ReconcileReport};
pub use error::Error;

/// Result type of this crate
pub type Result<T> = core::result::Result<T, Error>;
