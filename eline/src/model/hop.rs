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

use super::Endpoint;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Number of characters of the datapath ID field in a hop token.
pub const DPID_WIDTH: usize = 23;

lazy_static! {
    static ref HOP_RE: Regex = Regex::new(r"^(.{23}):([0-9]+)$").unwrap();
}

/// Classified hop token of a path returned by the topology oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hop {
    /// The token is an interface
    Endpoint(Endpoint),
    /// The token is anything else, like the switch node itself
    Metadata,
}

/// Error while parsing hop tokens
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HopError {
    /// The token is long enough to be an interface, but does not have the form `{dpid}:{port}`
    #[error("Malformed hop token: {0:?}")]
    Malformed(String),
}

/// Parse a single hop token. Tokens of at most [`DPID_WIDTH`] characters are metadata. Longer
/// tokens must be a datapath ID of exactly [`DPID_WIDTH`] characters, followed by `:` and the port
/// number.
pub fn parse_hop(token: &str) -> Result<Hop, HopError> {
    if token.chars().count() <= DPID_WIDTH {
        return Ok(Hop::Metadata);
    }
    let captures = HOP_RE.captures(token).ok_or_else(|| HopError::Malformed(token.to_string()))?;
    match (captures.get(1), captures.get(2).map(|p| p.as_str().parse::<u32>())) {
        (Some(dpid), Some(Ok(port))) => Ok(Hop::Endpoint(Endpoint::new(dpid.as_str(), port))),
        _ => Err(HopError::Malformed(token.to_string())),
    }
}

/// Return the interfaces of a path in order, dropping all metadata tokens.
pub fn clean_path<S: AsRef<str>>(hops: &[S]) -> Result<Vec<Endpoint>, HopError> {
    let mut endpoints = Vec::with_capacity(hops.len());
    for token in hops {
        if let Hop::Endpoint(e) = parse_hop(token.as_ref())? {
            endpoints.push(e);
        }
    }
    Ok(endpoints)
}
