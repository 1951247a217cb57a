//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a tier.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::RecordKind;

/// Root configuration for one tier of the relay chain.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Which tier this process serves.
    pub tier: TierConfig,

    /// Next-tier endpoints for forwarding tiers.
    pub downstream: DownstreamConfig,

    /// Inbound endpoint paths.
    pub routes: RoutesConfig,

    /// Record store settings for the data tier.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Position of a process in the business → management → data chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierRole {
    #[default]
    Business,
    Management,
    Data,
}

impl TierRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierRole::Business => "business",
            TierRole::Management => "management",
            TierRole::Data => "data",
        }
    }

    /// Whether this tier relays to another tier rather than a store.
    pub fn forwards(&self) -> bool {
        !matches!(self, TierRole::Data)
    }
}

impl fmt::Display for TierRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(TierRole::Business),
            "management" => Ok(TierRole::Management),
            "data" => Ok(TierRole::Data),
            other => Err(format!(
                "unknown tier '{}' (expected business, management or data)",
                other
            )),
        }
    }
}

/// Tier selection.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TierConfig {
    pub role: TierRole,
}

/// Downstream endpoints, one per record kind.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Full URL of the next tier's episodes endpoint.
    pub episodes_url: String,

    /// Full URL of the next tier's profiles endpoint.
    pub profiles_url: String,
}

impl DownstreamConfig {
    pub fn url_for(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Episodes => &self.episodes_url,
            RecordKind::Profiles => &self.profiles_url,
        }
    }
}

/// Inbound endpoint paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub episodes_path: String,
    pub profiles_path: String,
}

impl RoutesConfig {
    pub fn path_for(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Episodes => &self.episodes_path,
            RecordKind::Profiles => &self.profiles_path,
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            episodes_path: "/api/episodes".to_string(),
            profiles_path: "/api/profiles".to_string(),
        }
    }
}

/// Record store configuration (data tier only).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Optional JSON seed file loaded into the in-memory store at startup.
    pub seed_path: Option<String>,

    /// Record kinds answered with 404 instead of an empty page when no
    /// records match, e.g. `["profiles"]`.
    pub not_found_on_empty: Vec<RecordKind>,
}

impl StoreConfig {
    pub fn not_found_on_empty(&self, kind: RecordKind) -> bool {
        self.not_found_on_empty.contains(&kind)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
