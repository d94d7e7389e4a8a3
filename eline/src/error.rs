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

//! Module containing all error types

use crate::forwarding::DriverError;
use crate::model::{PathError, ValidationError};
use crate::oracle::OracleError;
use crate::settings::SettingsError;
use crate::store::StoreError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// The circuit request is malformed
    #[error("Invalid circuit request: {0}")]
    Validation(#[from] ValidationError),
    /// The pathfinder cannot be reached, or it failed
    #[error("Pathfinder is unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),
    /// The pathfinder returned no usable path
    #[error("Pathfinder returned no path for this circuit.")]
    NoPath,
    /// No candidate path can absorb the requested bandwidth
    #[error("Not enough resources.")]
    InsufficientResources,
    /// The selected path does not connect the circuit
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),
    /// Error of the circuit store
    #[error("Persistence Error: {0}")]
    Persistence(#[from] StoreError),
    /// The flows of the circuit could not be installed or removed. The circuit record is kept,
    /// such that the next reconciliation can retry.
    #[error("Forwarding Error on circuit {0}: {1}")]
    Forwarding(String, #[source] DriverError),
    /// The circuit was torn down before its flows were installed. No flows are installed.
    #[error("Circuit {0} was removed before its flows were installed")]
    Conflict(String),
    /// There is no circuit with the given ID
    #[error("Circuit not found")]
    NotFound(String),
    /// The settings are invalid
    #[error("Settings Error: {0}")]
    Settings(#[from] SettingsError),
    /// The controller clients could not be created
    #[error("Controller API Error: {0}")]
    Api(#[from] controller_api::Error),
}
