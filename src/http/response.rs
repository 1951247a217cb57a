//! Response relay.
//!
//! # Responsibilities
//! - Copy a downstream success (status + body bytes) onto the tier's response
//! - Mirror a downstream non-success status with an empty body
//! - Map transport and local failures to 500 without leaking detail
//! - Answer validation failures with 400 and a short message
//!
//! # Design Decisions
//! - Bodies are relayed byte-for-byte, never re-parsed or re-serialized
//! - Content type is always `application/json` on success

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::forward::{ForwardError, ForwardOutcome};
use crate::paging::ValidationError;

pub fn relay(outcome: ForwardOutcome) -> Response {
    match outcome {
        Ok(downstream) => json_response(downstream.status, downstream.body),
        Err(ForwardError::NonSuccessStatus(status)) => status.into_response(),
        Err(ForwardError::Transport(_) | ForwardError::Local(_)) => internal_error(),
    }
}

pub fn json_response(status: StatusCode, body: impl Into<Bytes>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body.into(),
    )
        .into_response()
}

pub fn bad_request(error: &ValidationError) -> Response {
    (StatusCode::BAD_REQUEST, error.to_string()).into_response()
}

pub fn internal_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
