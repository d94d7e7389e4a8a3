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

//! # Topology Model
//!
//! Pure data types describing a circuit and the network resources it uses. None of these types
//! perform any I/O.
//!
//! - [`Endpoint`]: A single interface in the network, identified by the datapath ID of the switch
//!   and the port number.
//! - [`Uni`]: User-network interface, which is an [`Endpoint`] with an optional VLAN [`Tag`].
//! - [`Link`]: A hop used by a circuit, connecting two endpoints, together with the bandwidth the
//!   circuit reserves on that hop.
//! - [`Circuit`]: A provisioned E-Line service, connecting two [`Uni`]s over a path of [`Link`]s.
//!
//! Paths returned by the topology oracle are lists of hop tokens. They are turned into endpoints
//! with [`parse_hop`] and [`clean_path`].
//!
//! # Example Usage
//!
//! ```rust
//! use eline::model::{clean_path, Endpoint, Link};
//!
//! let hops = vec![
//!     "00:00:00:00:00:00:00:01:1",
//!     "00:00:00:00:00:00:00:01",
//!     "00:00:00:00:00:00:00:01:2",
//! ];
//! let endpoints = clean_path(&hops).unwrap();
//! assert_eq!(endpoints.len(), 2);
//!
//! let link = Link::new(endpoints[0].clone(), endpoints[1].clone(), 1000);
//! let reverse = Link::new(endpoints[1].clone(), endpoints[0].clone(), 5);
//! assert!(link.matches(&reverse));
//! assert!(link.is_intra_device());
//! ```

mod circuit;
mod endpoint;
mod hop;
mod link;

pub use circuit::{Circuit, CircuitRequest, CircuitStatus, CircuitView, PathError, ValidationError};
pub use endpoint::{Endpoint, Tag, TagType, Uni};
pub use hop::{clean_path, parse_hop, Hop, HopError, DPID_WIDTH};
pub use link::Link;
pub(crate) use link::ordered;
