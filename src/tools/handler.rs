//! Invokable tool handles
//!
//! Handlers are bound to descriptors at registration time and receive their arguments
//! already bound in declared parameter order.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::tools::binder::BoundArgs;

/// Failure raised by a tool while executing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ToolError {
    pub message: String,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Value returned by a tool, rendered into a single text content block.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Text(String),
    Json(Value),
    Empty,
}

impl ToolOutput {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Json(value) => value.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }
}

impl From<()> for ToolOutput {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: BoundArgs) -> Result<ToolOutput, ToolError>;
}

/// Adapts a synchronous closure into a [`ToolHandler`].
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(BoundArgs) -> Result<ToolOutput, ToolError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(BoundArgs) -> Result<ToolOutput, ToolError> + Send + Sync,
{
    async fn call(&self, args: BoundArgs) -> Result<ToolOutput, ToolError> {
        (self.func)(args)
    }
}
