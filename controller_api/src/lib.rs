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

//! # SDN Controller API
//!
//! This is a very simple crate to interact with the REST API of the SDN controller. It wraps the
//! two services the circuit provisioning needs: the pathfinder, returning candidate paths between
//! two interfaces, and the flow manager, which installs and deletes forwarding rules on a switch.
//!
//! ```
//! use controller_api::{FlowInstall, FlowManager, Pathfinder};
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let timeout = Duration::from_millis(200);
//!     let base = "http://localhost:8181/api/kytos";
//!     let pathfinder = Pathfinder::new(format!("{}/pathfinder/v1/", base), timeout)?;
//!     let flow_manager = FlowManager::new(format!("{}/flow_manager/", base), timeout)?;
//!
//!     // ask for all paths between the two interfaces
//!     let (a, z) = ("00:00:00:00:00:00:00:01", "00:00:00:00:00:00:00:02");
//!     let paths = match pathfinder.get_paths(a, 1, z, 1) {
//!         Ok(p) => p,
//!         Err(e) => {
//!             eprintln!("Cannot reach the controller: {}", e);
//! # return Ok(());
//!             return Err(e.into());
//!         }
//!     };
//!     println!("{:#?}", paths);
//!
//!     // forward vlan 100 from port 1 to port 2
//!     flow_manager.install_flows(a, &[FlowInstall::output(1, 100, 2)])?;
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod connection;
mod flow_manager;
mod pathfinder;
mod types;
pub use flow_manager::FlowManager;
pub use pathfinder::Pathfinder;
pub use types::*;

use thiserror::Error;

/// # Controller API Error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error during handling of the HTTP request (including timeouts)
    #[allow(clippy::upper_case_acronyms)]
    #[error("HTTP Error: {0}")]
    HTTPError(#[from] isahc::Error),
    /// The request could not be built
    #[error("Invalid request: {0}")]
    RequestError(#[from] isahc::http::Error),
    /// Cannot serialize the request or deserialize the response
    #[error("Cannot handle JSON body: {0}")]
    JsonError(#[from] serde_json::error::Error),
    /// IO Error while reading the response
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// HTTP Response Error
    #[error("HTTP Response Error: {0}. Message:\n{1}")]
    ResponseError(u16, String),
}

impl Error {
    /// Returns true if the request timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::HTTPError(e) => matches!(e.kind(), isahc::error::ErrorKind::Timeout),
            _ => false,
        }
    }
}

/// Controller API Result type
type Result<T> = core::result::Result<T, Error>;
