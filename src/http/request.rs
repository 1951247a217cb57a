//! Request correlation.
//!
//! # Responsibilities
//! - Give every inbound request an `x-request-id` (UUID v4) unless one is present
//! - Echo the id on the response
//! - Expose the id to handlers so it can be propagated downstream
//!
//! # Design Decisions
//! - An id supplied by the calling tier is kept, so one id follows a request
//!   through the whole chain

use axum::http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request id assigned by the request-id layer.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
