//! Success responses wrapped in the `{status, data?, error?}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON body shared by every response the service sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A successful response: status code plus envelope.
#[derive(Debug)]
pub struct ApiResponse<T> {
    code: StatusCode,
    envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    fn with(code: StatusCode, status: &str, data: Option<T>) -> Self {
        Self {
            code,
            envelope: Envelope {
                status: status.to_string(),
                data,
                error: None,
            },
        }
    }

    /// 200 OK carrying `data`
    pub fn ok(data: T) -> Self {
        Self::with(StatusCode::OK, "success", Some(data))
    }

    /// 201 Created carrying `data`
    pub fn created(data: T) -> Self {
        Self::with(StatusCode::CREATED, "created", Some(data))
    }
}

impl ApiResponse<()> {
    /// 200 OK without a payload
    pub fn success() -> Self {
        Self::with(StatusCode::OK, "success", None)
    }

    /// 201 Created without a payload
    pub fn created_empty() -> Self {
        Self::with(StatusCode::CREATED, "created", None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.envelope)).into_response()
    }
}
