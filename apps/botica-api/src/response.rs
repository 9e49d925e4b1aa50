//! Success envelopes.
//!
//! ```text
//! read      200  { "ok": true, "data": ... }
//! create    201  { "ok": true, "id": 12, "message": "..." }
//! mutation  200  { "ok": true, "message": "..." }
//! ```
//!
//! Failures are rendered by [`ApiError`](crate::error::ApiError).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A successful response body plus its status code.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,

    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload.
    pub fn data(data: T) -> Self {
        ApiResponse {
            status: StatusCode::OK,
            ok: true,
            data: Some(data),
            id: None,
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// 201 with the new resource id.
    pub fn created(id: i64, message: impl Into<String>) -> Self {
        ApiResponse {
            status: StatusCode::CREATED,
            ok: true,
            data: None,
            id: Some(id),
            message: Some(message.into()),
        }
    }

    /// 200 with a confirmation message.
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            status: StatusCode::OK,
            ok: true,
            data: None,
            id: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
