use std::{collections::HashSet, sync::Arc};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tracing::info;

pub mod config;
pub mod demo;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod tools;

use config::{validate_endpoint_path, ConfigError};
use mcp::McpServer;

const HEALTH_PATH: &str = "/health";
const DISCOVERY_PATH: &str = "/.well-known/mcp";

/// An MCP server mounted at a fixed path. Each endpoint owns its own registry.
#[derive(Clone)]
pub struct Endpoint {
    pub path: String,
    pub server: Arc<McpServer>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, server: McpServer) -> Self {
        Self {
            path: path.into(),
            server: Arc::new(server),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<[Endpoint]>,
}

impl AppState {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, ConfigError> {
        validate_endpoint_paths(&endpoints)?;
        Ok(Self {
            endpoints: Arc::from(endpoints),
        })
    }
}

fn validate_endpoint_paths(endpoints: &[Endpoint]) -> Result<(), ConfigError> {
    let mut seen = HashSet::from([HEALTH_PATH, DISCOVERY_PATH]);
    for endpoint in endpoints {
        validate_endpoint_path(&endpoint.path)?;
        if !seen.insert(endpoint.path.as_str()) {
            return Err(ConfigError::DuplicateEndpointPath {
                path: endpoint.path.clone(),
            });
        }
    }
    Ok(())
}

pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route(HEALTH_PATH, get(http::handlers::health))
        .route(DISCOVERY_PATH, get(http::handlers::discovery));

    for endpoint in state.endpoints.iter() {
        info!(
            path = %endpoint.path,
            server = %endpoint.server.info().name,
            tools = endpoint.server.registry().len(),
            "mounting mcp endpoint"
        );
        router = router.route(
            &endpoint.path,
            post(http::handlers::mcp_endpoint).with_state(Arc::clone(&endpoint.server)),
        );
    }

    router
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
