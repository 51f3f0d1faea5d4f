//! Configuration for the DK map exporter.
//!
//! Layered loading (defaults, optional TOML file, environment), secret
//! resolution for the NetBox token and database URL, and translation to
//! `dkmap_core::ExportConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use dkmap_core::config::DEFAULT_NETBOX_URL;
use dkmap_core::spatial::DEFAULT_SWITCH_LAYER;
use dkmap_core::{ExportConfig, LivenessConfig, TlsVerification};

/// Environment variable holding the NetBox API token.
pub const TOKEN_ENV: &str = "NETBOX_API_TOKEN";
/// Environment variable holding the PostGIS connection string.
pub const DB_URL_ENV: &str = "DB_URL";

const KEYRING_SERVICE: &str = "dkmap";
const KEYRING_TOKEN_USER: &str = "netbox-token";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{name} is not set")]
    MissingSecret { name: &'static str },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Flat TOML configuration. Every key can also be set as `DKMAP_<KEY>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// NetBox root URL; links in the output point here.
    pub netbox_url: String,

    /// NetBox token (plaintext, prefer the env var or keyring).
    pub netbox_token: Option<String>,

    /// PostGIS connection string (prefer the env var).
    pub db_url: Option<String>,

    /// Site-plan layer with the switch markers.
    pub layer: String,

    pub page_limit: u32,

    /// HTTP timeout in seconds.
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Mark devices alive from Prometheus `up`.
    pub liveness: bool,

    pub prometheus_url: Option<String>,

    /// Seconds after which an `up` sample counts as stale.
    pub liveness_max_age: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            netbox_url: DEFAULT_NETBOX_URL.into(),
            netbox_token: None,
            db_url: None,
            layer: DEFAULT_SWITCH_LAYER.into(),
            page_limit: 100,
            timeout: 30,
            insecure: false,
            ca_cert: None,
            liveness: false,
            prometheus_url: None,
            liveness_max_age: 300,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "emfcamp", "dkmap").map_or_else(
        || PathBuf::from("dkmap.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from defaults, the TOML file (explicit or default path),
/// `DKMAP_*` variables, then the bare `NETBOX_URL` / `PROMETHEUS_URL`.
///
/// A missing file is not an error; an explicitly named one is.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) if !p.is_file() => {
            return Err(ConfigError::Validation {
                field: "config".into(),
                reason: format!("file does not exist: {}", p.display()),
            });
        }
        Some(p) => Toml::file(p),
        None => Toml::file(config_path()),
    };

    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(file)
        .merge(Env::prefixed("DKMAP_"))
        .merge(Env::raw().only(&["NETBOX_URL", "PROMETHEUS_URL"]))
        .extract()?;
    Ok(config)
}

// ── Secret resolution ───────────────────────────────────────────────

/// Resolve the NetBox token: env var, config value, then system keyring.
pub fn resolve_netbox_token(config: &Config) -> Result<SecretString, ConfigError> {
    if let Some(token) = non_empty_env(TOKEN_ENV) {
        return Ok(SecretString::from(token));
    }

    if let Some(ref token) = config.netbox_token {
        return Ok(SecretString::from(token.clone()));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, KEYRING_TOKEN_USER) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    Err(ConfigError::MissingSecret { name: TOKEN_ENV })
}

/// Resolve the database URL: env var, then config value.
pub fn resolve_database_url(config: &Config) -> Result<SecretString, ConfigError> {
    non_empty_env(DB_URL_ENV)
        .or_else(|| config.db_url.clone())
        .map(SecretString::from)
        .ok_or(ConfigError::MissingSecret { name: DB_URL_ENV })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and resolve secrets into the pipeline's config.
    pub fn to_export_config(&self) -> Result<ExportConfig, ConfigError> {
        let netbox_url = parse_url("netbox_url", &self.netbox_url)?;

        if self.page_limit == 0 {
            return Err(ConfigError::Validation {
                field: "page_limit".into(),
                reason: "must be at least 1".into(),
            });
        }

        let database_url = resolve_database_url(self)?;
        let netbox_token = resolve_netbox_token(self)?;

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        let liveness = if self.liveness {
            let raw = self
                .prometheus_url
                .as_deref()
                .ok_or_else(|| ConfigError::Validation {
                    field: "prometheus_url".into(),
                    reason: "required when liveness is enabled".into(),
                })?;
            Some(LivenessConfig {
                prometheus_url: parse_url("prometheus_url", raw)?,
                max_age: Duration::from_secs(self.liveness_max_age),
            })
        } else {
            None
        };

        Ok(ExportConfig {
            netbox_url,
            netbox_token,
            database_url,
            layer: self.layer.clone(),
            page_limit: self.page_limit,
            tls,
            timeout: Duration::from_secs(self.timeout),
            liveness,
        })
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })
}
