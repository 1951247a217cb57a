//! Paged record relay.
//!
//! Serves date-range-filtered, paginated episode and profile listings through
//! a business → management → data chain of identical-looking tiers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod paging;
pub mod store;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
