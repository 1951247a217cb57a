//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / keep request ID)
//!     → handler.rs (validate, then forward or query store)
//!     → forward.rs (single GET to the next tier)
//!     → response.rs (relay status + body, or synthesize error)
//!     → Send to client
//! ```

pub mod forward;
pub mod handler;
pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{DownstreamResponse, ForwardError, ForwardOutcome, Forwarder};
pub use handler::{AppState, TierBackend};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
