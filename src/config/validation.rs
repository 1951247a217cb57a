//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Forwarding tiers must name an absolute http URL per record kind
//! - Route paths must be rooted and distinct
//! - Listener and metrics addresses must be socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ConfigIssue>>

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;
use crate::store::RecordKind;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending setting.
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        issues.push(ConfigIssue::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.tier.role.forwards() {
        for kind in RecordKind::ALL {
            let field = format!("downstream.{}_url", kind);
            let raw = config.downstream.url_for(kind);
            if raw.is_empty() {
                issues.push(ConfigIssue::new(
                    field,
                    format!("required for the {} tier", config.tier.role),
                ));
                continue;
            }
            match Url::parse(raw) {
                Ok(url) if url.scheme() == "http" && url.has_host() => {}
                Ok(_) => issues.push(ConfigIssue::new(field, "must be an http:// URL")),
                Err(e) => issues.push(ConfigIssue::new(field, e.to_string())),
            }
        }
    }

    for kind in RecordKind::ALL {
        let path = config.routes.path_for(kind);
        if !path.starts_with('/') {
            issues.push(ConfigIssue::new(
                format!("routes.{}_path", kind),
                "must start with '/'",
            ));
        }
    }
    if config.routes.episodes_path == config.routes.profiles_path {
        issues.push(ConfigIssue::new(
            "routes.profiles_path",
            "must differ from routes.episodes_path",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        issues.push(ConfigIssue::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
