use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::mcp::rpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::tools::BindError;

/// Failures surfaced while dispatching a single JSON-RPC request.
///
/// All variants except `Internal` are rendered as JSON-RPC error envelopes. `Internal` is the
/// last-resort failure and only ever reaches the transport as a bare 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{method} unsupported")]
    UnsupportedMethod { method: String },
    #[error("tool {name} not found")]
    ToolNotFound { name: String },
    #[error("missing required parameter: {param}")]
    MissingRequiredParam { param: String },
    #[error("{message}")]
    InvalidParams { message: String },
    #[error("tool {name} raised an exception: {detail}")]
    ToolExecution { name: String, detail: String },
    #[error("internal error")]
    Internal { message: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::UnsupportedMethod { .. } | Self::ToolNotFound { .. } => METHOD_NOT_FOUND,
            Self::MissingRequiredParam { .. } | Self::InvalidParams { .. } => INVALID_PARAMS,
            Self::ToolExecution { .. } | Self::Internal { .. } => INTERNAL_ERROR,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

impl From<BindError> for AppError {
    fn from(err: BindError) -> Self {
        match err {
            BindError::MissingRequiredParam { param } => Self::MissingRequiredParam { param },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("json serialization failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Internal { message } => message,
            other => other.to_string(),
        };
        tracing::error!(error = %message, "request failed with internal error");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;
    use crate::mcp::rpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
    use crate::tools::BindError;

    #[test]
    fn messages_embed_offending_identifier() {
        let unsupported = AppError::UnsupportedMethod {
            method: "resources/list".to_string(),
        };
        assert_eq!(unsupported.to_string(), "resources/list unsupported");
        assert_eq!(unsupported.rpc_code(), METHOD_NOT_FOUND);

        let missing: AppError = BindError::MissingRequiredParam {
            param: "city".to_string(),
        }
        .into();
        assert_eq!(missing.to_string(), "missing required parameter: city");
        assert_eq!(missing.rpc_code(), INVALID_PARAMS);

        let failed = AppError::ToolExecution {
            name: "getWeather".to_string(),
            detail: "upstream timeout".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "tool getWeather raised an exception: upstream timeout"
        );
        assert_eq!(failed.rpc_code(), INTERNAL_ERROR);
    }

    #[test]
    fn internal_error_hides_detail_from_transport() {
        let err = AppError::internal("database password leaked in here");
        assert_eq!(err.to_string(), "internal error");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
