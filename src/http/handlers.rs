//! Axum HTTP handlers for the web server

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::mcp::{DispatchOutcome, McpServer};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointSummary>,
}

#[derive(Debug, Serialize)]
pub struct EndpointSummary {
    pub path: String,
    pub name: String,
    pub version: String,
    pub tools: usize,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryResponse> {
    let endpoints = state
        .endpoints
        .iter()
        .map(|endpoint| EndpointSummary {
            path: endpoint.path.clone(),
            name: endpoint.server.info().name.clone(),
            version: endpoint.server.info().version.clone(),
            tools: endpoint.server.registry().len(),
        })
        .collect();

    Json(DiscoveryResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}

pub async fn mcp_endpoint(
    State(server): State<Arc<McpServer>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let response = match server.handle_body(&body).await? {
        DispatchOutcome::Reply(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        DispatchOutcome::UnsupportedMethod(envelope) => {
            (StatusCode::BAD_REQUEST, Json(envelope)).into_response()
        }
        DispatchOutcome::Accepted => StatusCode::ACCEPTED.into_response(),
    };

    Ok(response)
}
