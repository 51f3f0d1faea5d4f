//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use dkmap_config::ConfigError;
use dkmap_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    /// sysexits `EX_CONFIG`.
    pub const CONFIG: i32 = 78;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {service}")]
    #[diagnostic(
        code(dkmap::connection_failed),
        help("Check that {service} is reachable from this host.\nURL: {url}")
    )]
    ConnectionFailed {
        service: &'static str,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dkmap::auth_failed),
        help("Check NETBOX_API_TOKEN; the token needs read access to dcim.")
    )]
    AuthFailed { message: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("{service} error: {message}")]
    #[diagnostic(code(dkmap::upstream))]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("Database error: {message}")]
    #[diagnostic(
        code(dkmap::database),
        help("Check DB_URL and that the site_plan table is present.")
    )]
    Database { message: String },

    #[error("Switch '{switch}' has an unreadable location: {reason}")]
    #[diagnostic(code(dkmap::geometry))]
    Geometry { switch: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{name} is not set")]
    #[diagnostic(
        code(dkmap::missing_env),
        help("Export {name} before running dkmap.")
    )]
    MissingEnv { name: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dkmap::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(dkmap::config))]
    Config { message: String },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Cannot write to {}", path.display())]
    #[diagnostic(
        code(dkmap::output),
        help("The output directory must exist and be writable.")
    )]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode the map: {message}")]
    #[diagnostic(code(dkmap::encode))]
    Encode { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::MissingEnv { .. } | Self::Validation { .. } | Self::Config { .. } => {
                exit_code::CONFIG
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed {
                service,
                url,
                reason,
            } => CliError::ConnectionFailed {
                service,
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Inventory { message, status } => CliError::Upstream {
                service: "NetBox",
                message: match status {
                    Some(code) => format!("HTTP {code}: {message}"),
                    None => message,
                },
            },

            CoreError::Liveness { message } => CliError::Upstream {
                service: "Prometheus",
                message,
            },

            CoreError::Database { message } => CliError::Database { message },

            CoreError::InvalidGeometry { switch, source } => CliError::Geometry {
                switch,
                reason: source.to_string(),
            },

            CoreError::Io { path, source } => CliError::Output { path, source },

            CoreError::Serialization(e) => CliError::Encode {
                message: e.to_string(),
            },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingSecret { name } => CliError::MissingEnv { name },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config {
                message: e.to_string(),
            },
        }
    }
}
