// ── Core error types ──
//
// Domain errors from dkmap-core. Consumers never see raw HTTP or SQL
// failures; the `From` impls below translate client-layer errors into
// the categories the CLI reports on.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::WktError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Upstream connectivity ────────────────────────────────────────
    #[error("Cannot reach {service} at {url}: {reason}")]
    ConnectionFailed {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Inventory ────────────────────────────────────────────────────
    #[error("Inventory API error: {message}")]
    Inventory {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Liveness probe failed: {message}")]
    Liveness { message: String },

    // ── Spatial database ─────────────────────────────────────────────
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Invalid geometry for switch '{switch}': {source}")]
    InvalidGeometry {
        switch: String,
        #[source]
        source: WktError,
    },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode feature collection: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Attach a service name to an API error so connection failures say which side failed.
    pub fn from_api(service: &'static str, err: dkmap_api::Error) -> Self {
        match err {
            dkmap_api::Error::InvalidToken => CoreError::AuthenticationFailed {
                message: format!("{service} rejected the API token"),
            },
            dkmap_api::Error::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    service,
                    url: e
                        .url()
                        .map_or_else(|| "<unknown>".into(), ToString::to_string),
                    reason: e.to_string(),
                }
            }
            dkmap_api::Error::Transport(e) => CoreError::Inventory {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            dkmap_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid {service} URL: {e}"),
            },
            dkmap_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                service,
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            dkmap_api::Error::Netbox { status, message } => CoreError::Inventory {
                message,
                status: Some(status),
            },
            dkmap_api::Error::Prometheus {
                error_type,
                message,
            } => CoreError::Liveness {
                message: format!("{error_type}: {message}"),
            },
            dkmap_api::Error::Deserialization { message, body: _ } => CoreError::Inventory {
                message: format!("unexpected response from {service}: {message}"),
                status: None,
            },
        }
    }
}

impl From<dkmap_api::Error> for CoreError {
    fn from(err: dkmap_api::Error) -> Self {
        Self::from_api("NetBox", err)
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(e) => CoreError::ConnectionFailed {
                service: "PostGIS",
                url: String::new(),
                reason: e.to_string(),
            },
            sqlx::Error::Tls(e) => CoreError::ConnectionFailed {
                service: "PostGIS",
                url: String::new(),
                reason: format!("TLS error: {e}"),
            },
            sqlx::Error::Configuration(e) => CoreError::Config {
                message: format!("Invalid database URL: {e}"),
            },
            other => CoreError::Database {
                message: other.to_string(),
            },
        }
    }
}
