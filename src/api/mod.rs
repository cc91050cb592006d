//! Caller-facing HTTP layer.
//!
//! Plumbing only: extract inputs, delegate to the orchestrator, map each
//! error kind to a status code and an `{error}` JSON body.

pub mod handlers;
pub mod routes;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidRequest => StatusCode::BAD_REQUEST,
            Error::AuthRejected | Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::UpstreamUnavailable(_)
            | Error::MalformedReport(_)
            | Error::FieldCountMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
