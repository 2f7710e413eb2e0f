//! JSON-RPC envelope parsing and formatting
//!
//! Error codes are fixed:
//!
//! | name               | code     |
//! |--------------------|----------|
//! | `METHOD_NOT_FOUND` | `-32601` |
//! | `INVALID_PARAMS`   | `-32602` |
//! | `INTERNAL_ERROR`   | `-32603` |

use rust_mcp_sdk::schema::{
    JsonrpcErrorResponse, JsonrpcResultResponse, RequestId, Result as McpResult, RpcError,
};
use serde_json::{json, Value};

use crate::errors::AppError;

pub const JSONRPC_VERSION: &str = "2.0";

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// Echoed back verbatim in the reply.
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Request(RpcRequest),
    /// Unparsable or id-less body; acknowledged without a reply.
    Notification,
}

pub fn parse_envelope(body: &[u8]) -> Result<Envelope, AppError> {
    let Ok(Value::Object(mut payload)) = serde_json::from_slice::<Value>(body) else {
        return Ok(Envelope::Notification);
    };

    let Some(id) = payload.remove("id") else {
        return Ok(Envelope::Notification);
    };

    let Some(method) = payload.remove("method") else {
        return Err(AppError::internal("request has an id but no method"));
    };

    Ok(Envelope::Request(RpcRequest {
        id,
        method: value_as_text(&method),
        params: payload.remove("params"),
    }))
}

/// Text form of a loosely typed field: strings verbatim, scalars as JSON text, containers empty.
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub fn app_error_to_json_rpc(id: Value, err: &AppError) -> Result<Value, AppError> {
    json_rpc_error(id, err.rpc_code(), &err.to_string())
}

pub fn json_rpc_error(id: Value, code: i32, message: &str) -> Result<Value, AppError> {
    let Some(request_id) = value_to_request_id(&id) else {
        return Ok(json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "error": {
                "code": code,
                "message": message
            }
        }));
    };

    let response = JsonrpcErrorResponse::new(
        RpcError {
            code: i64::from(code),
            data: None,
            message: message.to_string(),
        },
        Some(request_id),
    );
    Ok(serde_json::to_value(response)?)
}

pub fn json_rpc_result(id: Value, result: Value) -> Result<Value, AppError> {
    match (value_to_request_id(&id), result) {
        (Some(request_id), Value::Object(extra)) => {
            let response = JsonrpcResultResponse::new(
                request_id,
                McpResult {
                    meta: None,
                    extra: Some(extra),
                },
            );
            Ok(serde_json::to_value(response)?)
        }
        (_, result) => Ok(json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "result": result
        })),
    }
}

pub fn value_to_request_id(value: &Value) -> Option<RequestId> {
    if let Some(string_id) = value.as_str() {
        return Some(RequestId::String(string_id.to_string()));
    }

    value.as_i64().map(RequestId::Integer)
}
