//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the paged endpoints and `/health`
//! - Wire up middleware (request id, tracing)
//! - Build the tier backend: shared forwarder or record store
//! - Bind server to listener and shut down gracefully

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::handler::{self, AppState, TierBackend};
use crate::http::health::get_health;
use crate::http::forward::Forwarder;
use crate::http::request::MakeRequestUuidV4;
use crate::paging::UrlBuilder;
use crate::store::{MemoryStore, RecordKind, RecordStore, StoreError};

/// Errors raised while assembling a tier.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid downstream url for {kind}: {source}")]
    Downstream {
        kind: RecordKind,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to initialize record store: {0}")]
    Store(#[from] StoreError),
}

/// HTTP server for one tier of the relay chain.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a server for the configured tier.
    ///
    /// The data tier is backed by a [`MemoryStore`], seeded from
    /// `store.seed_path` when set.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let backend = if config.tier.role.forwards() {
            Self::forwarding_backend(&config)?
        } else {
            let store = match &config.store.seed_path {
                Some(path) => MemoryStore::load(Path::new(path))?,
                None => {
                    tracing::warn!("No seed file configured, data tier starts empty");
                    MemoryStore::new()
                }
            };
            Self::data_backend(&config, Arc::new(store))
        };

        Ok(Self::with_backend(config, backend))
    }

    /// Create a data tier backed by an external record store.
    pub fn with_store(config: RelayConfig, store: Arc<dyn RecordStore>) -> Self {
        let backend = Self::data_backend(&config, store);
        Self::with_backend(config, backend)
    }

    fn forwarding_backend(config: &RelayConfig) -> Result<TierBackend, ServerError> {
        let builder = |kind: RecordKind| {
            UrlBuilder::new(config.downstream.url_for(kind))
                .map_err(|source| ServerError::Downstream { kind, source })
        };

        Ok(TierBackend::Forwarding {
            forwarder: Forwarder::new(),
            episodes: builder(RecordKind::Episodes)?,
            profiles: builder(RecordKind::Profiles)?,
        })
    }

    fn data_backend(config: &RelayConfig, store: Arc<dyn RecordStore>) -> TierBackend {
        TierBackend::Data {
            store,
            not_found_on_empty: config.store.not_found_on_empty.clone(),
        }
    }

    fn with_backend(config: RelayConfig, backend: TierBackend) -> Self {
        let state = AppState {
            role: config.tier.role,
            backend: Arc::new(backend),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config: Arc::new(config),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route(config.routes.path_for(RecordKind::Episodes), get(handler::episodes))
            .route(config.routes.path_for(RecordKind::Profiles), get(handler::profiles))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            tier = %self.config.tier.role,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}
