//! Tool metadata, registration and argument binding
//!
//! Provides the declarative descriptors advertised over MCP, the registry that pairs them
//! with invokable handlers, and the conversions between descriptors and protocol payloads.

pub mod binder;
pub mod descriptor;
pub mod handler;
pub mod registry;
pub mod schema;

pub use binder::{bind_arguments, BindError, BoundArgs};
pub use descriptor::{ParamSpec, ToolDescriptor};
pub use handler::{FnHandler, ToolError, ToolHandler, ToolOutput};
pub use registry::{RegisteredTool, RegistryError, ToolRegistry};
pub use schema::{project_input_schema, project_tool, InputSchema, PropertySchema, ToolSchema};
