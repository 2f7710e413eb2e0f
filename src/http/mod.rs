//! HTTP transport for the Model Context Protocol
//!
//! Maps dispatcher outcomes onto status codes and bodies, and serves the health and discovery
//! documents.

pub mod handlers;
