use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::mcp::ServerInfo;

pub const DEFAULT_MCP_PATH: &str = "/mcp";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub mcp_path: String,
    pub server_name: String,
    pub server_version: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
    #[error("endpoint path {path:?} must start with '/' and contain no route parameters")]
    InvalidEndpointPath { path: String },
    #[error("endpoint path {path:?} is mounted more than once or shadows a built-in route")]
    DuplicateEndpointPath { path: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = var("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);
        let mcp_path = var("MCP_PATH").unwrap_or_else(|| DEFAULT_MCP_PATH.to_string());
        validate_endpoint_path(&mcp_path)?;

        let config = Self {
            bind_addr,
            bind_port,
            mcp_path,
            server_name: var("MCP_SERVER_NAME")
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()),
            server_version: var("MCP_SERVER_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }

    pub fn server_info(&self) -> ServerInfo {
        ServerInfo::new(self.server_name.clone(), self.server_version.clone())
    }
}

pub fn validate_endpoint_path(path: &str) -> Result<(), ConfigError> {
    let valid = path.starts_with('/') && !path.contains(['{', '}', '*', ':']);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpointPath {
            path: path.to_string(),
        })
    }
}
