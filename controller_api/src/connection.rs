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

//! # Connection to a single controller service

use crate::{Error, Result};

use isahc::prelude::*;
use isahc::{Body, HttpClient, Request, Response};
use log::*;
use std::fmt;
use std::time::Duration;

/// HTTP connection to one REST service of the controller, rooted at a base URL. Every request is
/// bounded by the timeout given on construction.
pub(crate) struct Connection {
    client: HttpClient,
    base_url: String,
}

impl Connection {
    /// Create a new connection. A missing trailing slash is added to the base URL.
    pub(crate) fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// The base URL, always ending with a slash
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full address for the given key
    pub(crate) fn url(&self, key: impl AsRef<str>) -> String {
        format!("{}{}", self.base_url, key.as_ref())
    }

    pub(crate) fn request_get(&self, key: impl AsRef<str>) -> Result<String> {
        let addr = self.url(key);
        debug!("GET  {}", addr);
        self.handle_response(self.client.get(addr)?)
    }

    pub(crate) fn request_post(&self, key: impl AsRef<str>, data: String) -> Result<String> {
        let addr = self.url(key);
        debug!("POST {} {}", addr, data);
        let request = Request::post(addr).header("Content-Type", "application/json").body(data)?;
        self.handle_response(self.client.send(request)?)
    }

    fn handle_response(&self, mut response: Response<Body>) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::ResponseError(status.as_u16(), response.text()?));
        }
        Ok(response.text()?)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").field("base_url", &self.base_url).finish()
    }
}
