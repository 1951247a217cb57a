//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to every tier handler
//! ```
//!
//! # Design Decisions
//! - Config is constructed once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    DownstreamConfig, ListenerConfig, ObservabilityConfig, RelayConfig, RoutesConfig,
    StoreConfig, TierConfig, TierRole,
};
pub use validation::{validate_config, ConfigIssue};
