//! Outbound call to the next tier.
//!
//! # Responsibilities
//! - Issue exactly one GET per inbound request
//! - Carry the request id downstream
//! - Classify the result as success, non-success status, transport or local failure
//!
//! # Design Decisions
//! - No retries, no circuit breaking, no timeout beyond the transport default
//! - One client per process, built at startup and shared without locking

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Method, Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use url::Url;

use crate::http::request::X_REQUEST_ID;

/// A successful (2xx) downstream response, body fully read.
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Why a forward did not produce a usable response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The downstream tier could not be reached or the exchange broke off.
    #[error("transport error: {0}")]
    Transport(String),

    /// The downstream tier answered with a non-2xx status.
    #[error("downstream returned {0}")]
    NonSuccessStatus(StatusCode),

    /// The request could not be prepared locally.
    #[error("local error: {0}")]
    Local(String),
}

impl ForwardError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ForwardError::Transport(_) => "transport",
            ForwardError::NonSuccessStatus(_) => "status",
            ForwardError::Local(_) => "local",
        }
    }
}

pub type ForwardOutcome = Result<DownstreamResponse, ForwardError>;

/// Shared outbound client.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
}

impl Forwarder {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }

    /// Perform a single GET against `url`.
    pub async fn get(&self, url: &Url, request_id: &str) -> ForwardOutcome {
        let uri: Uri = url
            .as_str()
            .parse()
            .map_err(|e| ForwardError::Local(format!("invalid uri: {}", e)))?;

        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if let Ok(value) = HeaderValue::from_str(request_id) {
            builder = builder.header(X_REQUEST_ID, value);
        }
        let request = builder
            .body(Body::empty())
            .map_err(|e| ForwardError::Local(e.to_string()))?;

        let response: hyper::Response<hyper::body::Incoming> = self
            .client
            .request(request)
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::NonSuccessStatus(status));
        }

        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        Ok(DownstreamResponse {
            status,
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            body,
        })
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}
