//! Tier handlers for the paged endpoints.
//!
//! # Request Flow
//! ```text
//! Validating ──invalid──▶ 400
//!     │
//!     ▼
//! BuildingUrl → Forwarding → Relaying → Done      (business, management)
//!     or
//! Querying store → Rendering → Done               (data)
//! ```
//!
//! Every request passes through exactly once. Nothing is retried and every
//! failure path logs before answering.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::config::TierRole;
use crate::http::forward::{ForwardError, Forwarder};
use crate::http::request::request_id;
use crate::http::response;
use crate::observability::metrics;
use crate::paging::{PaginationQuery, UrlBuilder};
use crate::store::{RecordKind, RecordPage, RecordStore};

/// What answers a validated request on this tier.
pub enum TierBackend {
    /// Relay to the next tier.
    Forwarding {
        forwarder: Forwarder,
        episodes: UrlBuilder,
        profiles: UrlBuilder,
    },
    /// Query the record store directly.
    Data {
        store: Arc<dyn RecordStore>,
        /// Kinds answered with 404 when the page is empty.
        not_found_on_empty: Vec<RecordKind>,
    },
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub role: TierRole,
    pub backend: Arc<TierBackend>,
}

pub async fn episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    handle(&state, RecordKind::Episodes, &headers, query.as_deref()).await
}

pub async fn profiles(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    handle(&state, RecordKind::Profiles, &headers, query.as_deref()).await
}

async fn handle(
    state: &AppState,
    kind: RecordKind,
    headers: &HeaderMap,
    raw_query: Option<&str>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(headers);
    let tier = state.role;

    tracing::info!(request_id = %request_id, %tier, %kind, "Paged request start");

    // 1. Validate
    let params: HashMap<String, String> = form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes())
        .into_owned()
        .collect();
    let query = match PaginationQuery::from_params(&params) {
        Ok(query) => query,
        Err(e) => {
            tracing::warn!(request_id = %request_id, %tier, %kind, error = %e, "Rejected pagination query");
            metrics::record_request(tier, kind, StatusCode::BAD_REQUEST.as_u16(), start_time);
            return response::bad_request(&e);
        }
    };

    // 2. Answer from the next tier or the store
    let response = match state.backend.as_ref() {
        TierBackend::Forwarding { forwarder, episodes, profiles } => {
            let builder = match kind {
                RecordKind::Episodes => episodes,
                RecordKind::Profiles => profiles,
            };
            forward(tier, kind, request_id, forwarder, builder, &query).await
        }
        TierBackend::Data { store, not_found_on_empty } => {
            let not_found_on_empty = not_found_on_empty.contains(&kind);
            serve_from_store(kind, request_id, store.as_ref(), not_found_on_empty, &query).await
        }
    };

    metrics::record_request(tier, kind, response.status().as_u16(), start_time);
    response
}

async fn forward(
    tier: TierRole,
    kind: RecordKind,
    request_id: &str,
    forwarder: &Forwarder,
    builder: &UrlBuilder,
    query: &PaginationQuery,
) -> Response {
    let url = builder.build(query);
    tracing::info!(request_id = %request_id, url = %url, "Requesting URL");

    let outcome = forwarder.get(&url, request_id).await;

    match &outcome {
        Ok(downstream) => {
            tracing::info!(
                request_id = %request_id,
                %kind,
                status = %downstream.status,
                content_type = ?downstream.content_type,
                bytes = downstream.body.len(),
                "Downstream page retrieved"
            );
        }
        Err(e) => {
            match e {
                ForwardError::NonSuccessStatus(status) => {
                    tracing::error!(request_id = %request_id, %kind, url = %url, status = %status, "Failed to retrieve records");
                }
                ForwardError::Transport(detail) | ForwardError::Local(detail) => {
                    tracing::error!(request_id = %request_id, %kind, url = %url, error = %detail, "Exception when calling downstream tier");
                }
            }
            metrics::record_downstream_failure(tier, kind, e.reason());
        }
    }

    response::relay(outcome)
}

async fn serve_from_store(
    kind: RecordKind,
    request_id: &str,
    store: &dyn RecordStore,
    not_found_on_empty: bool,
    query: &PaginationQuery,
) -> Response {
    let rows_to_skip = query.rows_to_skip();

    let page = match store.fetch_page(kind, query, rows_to_skip).await {
        Ok(page) => RecordPage::new(kind, query, rows_to_skip, page),
        Err(e) => {
            tracing::error!(request_id = %request_id, %kind, error = %e, "Failed to fetch records from the store");
            return response::internal_error();
        }
    };

    if page.is_empty() && not_found_on_empty {
        tracing::info!(request_id = %request_id, %kind, "No records found");
        return StatusCode::NOT_FOUND.into_response();
    }

    match page.to_json() {
        Ok(body) => {
            tracing::info!(
                request_id = %request_id,
                %kind,
                returned = page.items.len(),
                total = page.total_results,
                "Records found"
            );
            response::json_response(StatusCode::OK, body)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, %kind, error = %e, "Failed to serialize page");
            response::internal_error()
        }
    }
}
