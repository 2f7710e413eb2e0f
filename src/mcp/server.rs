//! The MCP dispatcher
//!
//! Routes a parsed JSON-RPC request to `initialize`, `tools/list` or `tools/call` and builds the
//! reply envelope. A server holds no per-request state; one instance is shared by every request
//! hitting its endpoint.

use std::sync::Arc;

use rust_mcp_sdk::schema::{
    CallToolResult, ContentBlock, Implementation, InitializeResult, ProtocolVersion,
    ServerCapabilities, TextContent,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::mcp::rpc::{
    app_error_to_json_rpc, json_rpc_result, parse_envelope, value_as_text, Envelope, RpcRequest,
};
use crate::tools::{
    bind_arguments, project_tool, BoundArgs, ToolHandler, ToolOutput, ToolRegistry, ToolSchema,
};

pub const SUPPORTED_PROTOCOL_VERSION: &str = "2024-11-05";

const REDACTED: &str = "[REDACTED]";
const SENSITIVE_KEY_MARKERS: [&str; 7] = [
    "token",
    "secret",
    "password",
    "credential",
    "authorization",
    "api_key",
    "apikey",
];

/// Identity reported in the `initialize` handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Reply(Value),
    /// Error envelope for a method this server does not implement.
    UnsupportedMethod(Value),
    /// Nothing to answer; the transport acknowledges with an empty body.
    Accepted,
}

#[derive(Serialize)]
struct ListToolsResult {
    tools: Vec<ToolSchema>,
}

pub struct McpServer {
    info: ServerInfo,
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(info: ServerInfo, registry: ToolRegistry) -> Self {
        Self { info, registry }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handles one raw request body. `Err` is only returned for failures that must not be
    /// reported through a JSON-RPC envelope.
    pub async fn handle_body(&self, body: &[u8]) -> Result<DispatchOutcome, AppError> {
        match parse_envelope(body)? {
            Envelope::Request(request) => self.dispatch(request).await,
            Envelope::Notification => Ok(DispatchOutcome::Accepted),
        }
    }

    pub async fn dispatch(&self, request: RpcRequest) -> Result<DispatchOutcome, AppError> {
        let audit_params = redact_audit_params(request.params.as_ref());
        let audit_tool = (request.method == "tools/call")
            .then(|| requested_tool_name(request.params.as_ref()));
        let RpcRequest { id, method, params } = request;

        let outcome = match method.as_str() {
            "initialize" => {
                DispatchOutcome::Reply(json_rpc_result(id, self.initialize_result()?)?)
            }
            "tools/list" => {
                DispatchOutcome::Reply(json_rpc_result(id, self.list_tools_result()?)?)
            }
            "tools/call" => match self.call_tool(params).await {
                Ok(result) => DispatchOutcome::Reply(json_rpc_result(id, result)?),
                Err(err) if err.is_internal() => return Err(err),
                Err(err) => DispatchOutcome::Reply(app_error_to_json_rpc(id, &err)?),
            },
            _ => {
                let err = AppError::UnsupportedMethod {
                    method: method.clone(),
                };
                warn!(method = %method, "unsupported method requested");
                DispatchOutcome::UnsupportedMethod(app_error_to_json_rpc(id, &err)?)
            }
        };

        info!(
            server = %self.info.name,
            method = %method,
            tool = audit_tool.as_deref(),
            params = %audit_params,
            outcome = if is_error_outcome(&outcome) { "failure" } else { "success" },
            "mcp action audited"
        );

        Ok(outcome)
    }

    fn initialize_result(&self) -> Result<Value, AppError> {
        let initialize_result = InitializeResult {
            server_info: Implementation {
                name: self.info.name.clone(),
                version: self.info.version.clone(),
                title: None,
                description: None,
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities::default(),
            protocol_version: ProtocolVersion::V2024_11_05.into(),
            instructions: None,
            meta: None,
        };

        Ok(serde_json::to_value(initialize_result)?)
    }

    fn list_tools_result(&self) -> Result<Value, AppError> {
        let tools = self.registry.list_all().map(project_tool).collect();
        Ok(serde_json::to_value(ListToolsResult { tools })?)
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, AppError> {
        let name = requested_tool_name(params.as_ref());

        let Some(tool) = self.registry.lookup(&name) else {
            warn!(tool = %name, "requested tool not found");
            return Err(AppError::ToolNotFound { name });
        };

        let arguments = call_arguments(params)?;
        let args = bind_arguments(&tool.descriptor, &arguments).inspect_err(|err| {
            warn!(tool = %name, error = %err, "tool call rejected");
        })?;

        let output = invoke_tool(&name, Arc::clone(&tool.handler), args).await?;

        let result = CallToolResult {
            content: vec![ContentBlock::from(TextContent::new(
                output.into_text(),
                None,
                None,
            ))],
            is_error: None,
            meta: None,
            structured_content: None,
        };
        Ok(serde_json::to_value(result)?)
    }
}

/// Tool name as text; a missing name is the empty string and never matches a registered tool.
fn requested_tool_name(params: Option<&Value>) -> String {
    params
        .and_then(|params| params.get("name"))
        .map(value_as_text)
        .unwrap_or_default()
}

fn call_arguments(params: Option<Value>) -> Result<Map<String, Value>, AppError> {
    let arguments = match params {
        Some(Value::Object(mut params)) => params.remove("arguments"),
        _ => None,
    };

    match arguments {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(arguments)) => Ok(arguments),
        Some(_) => Err(AppError::invalid_params("arguments must be an object")),
    }
}

/// Runs the handler on its own task so that a panicking tool is reported like any other
/// tool failure instead of tearing down the connection.
async fn invoke_tool(
    name: &str,
    handler: Arc<dyn ToolHandler>,
    args: BoundArgs,
) -> Result<ToolOutput, AppError> {
    let detail = match tokio::spawn(async move { handler.call(args).await }).await {
        Ok(Ok(output)) => return Ok(output),
        Ok(Err(err)) => err.message,
        Err(join_err) => join_error_detail(join_err),
    };

    error!(tool = %name, error = %detail, "tool execution failed");
    Err(AppError::ToolExecution {
        name: name.to_string(),
        detail,
    })
}

fn join_error_detail(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_else(|| "tool panicked".to_string())
}

fn is_error_outcome(outcome: &DispatchOutcome) -> bool {
    match outcome {
        DispatchOutcome::Reply(envelope) => envelope.get("error").is_some(),
        DispatchOutcome::UnsupportedMethod(_) => true,
        DispatchOutcome::Accepted => false,
    }
}

pub fn redact_audit_params(params: Option<&Value>) -> Value {
    params.map(redact_audit_value).unwrap_or(Value::Null)
}

fn redact_audit_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| {
                    let redacted = if is_sensitive_key(key) {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_audit_value(item)
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_audit_value).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.trim().to_ascii_lowercase();
    normalized == "bearer"
        || SENSITIVE_KEY_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
}
