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

//! # HTTP API
//!
//! Thin adapter between the HTTP requests and the [`CircuitManager`]. The manager is blocking, so
//! every request runs on the blocking thread pool of tokio. Errors are turned into a status code
//! and a body of the form `{"error": "..."}`.

use eline::{CircuitManager, Error};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::task;

/// Status code and JSON body of every response
pub type Response = (StatusCode, Json<Value>);

/// Build the router serving all circuit routes
pub fn router(manager: Arc<CircuitManager>) -> Router {
    Router::new()
        .route("/v1/circuits", get(list_circuits))
        .route("/circuits", post(create_circuit))
        .route("/circuits/:id", get(get_circuit).delete(delete_circuit))
        .with_state(manager)
}

/// `GET /v1/circuits`: all stored circuits, keyed by their ID
pub async fn list_circuits(State(manager): State<Arc<CircuitManager>>) -> Response {
    run(manager, |m| {
        let circuits: Map<String, Value> =
            m.list()?.iter().map(|c| (c.id().to_string(), json!(c.view()))).collect();
        Ok((StatusCode::OK, json!({ "circuits": circuits })))
    })
    .await
}

/// `GET /circuits/:id`: a single circuit
pub async fn get_circuit(
    State(manager): State<Arc<CircuitManager>>,
    Path(id): Path<String>,
) -> Response {
    run(manager, move |m| Ok((StatusCode::OK, json!(m.get(&id)?.view())))).await
}

/// `POST /circuits`: admit a new circuit
pub async fn create_circuit(State(manager): State<Arc<CircuitManager>>, body: Bytes) -> Response {
    run(manager, move |m| {
        let circuit = m.create(&body)?;
        info!("Created {}", circuit);
        Ok((StatusCode::CREATED, json!(circuit.view())))
    })
    .await
}

/// `DELETE /circuits/:id`: tear down a circuit
pub async fn delete_circuit(
    State(manager): State<Arc<CircuitManager>>,
    Path(id): Path<String>,
) -> Response {
    run(manager, move |m| {
        m.delete(&id)?;
        Ok((StatusCode::OK, json!({ "success": "Circuit deleted" })))
    })
    .await
}

/// HTTP status of an error
pub fn status_of(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Conflict(_) => StatusCode::CONFLICT,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn run<F>(manager: Arc<CircuitManager>, f: F) -> Response
where
    F: FnOnce(&CircuitManager) -> eline::Result<(StatusCode, Value)> + Send + 'static,
{
    match task::spawn_blocking(move || f(&manager)).await {
        Ok(Ok((status, body))) => (status, Json(body)),
        Ok(Err(e)) => {
            let status = status_of(&e);
            if status.is_server_error() {
                error!("{}", e);
            } else {
                debug!("Rejected request: {}", e);
            }
            (status, Json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            error!("Request handler failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Internal error" })))
        }
    }
}
