//! Model Context Protocol (MCP) dispatch and JSON-RPC envelopes
//!
//! Provides envelope parsing/formatting and the per-endpoint dispatcher for the three supported
//! methods: `initialize`, `tools/list` and `tools/call`.

pub mod rpc;
pub mod server;

pub use server::{DispatchOutcome, McpServer, ServerInfo, SUPPORTED_PROTOCOL_VERSION};
