// ── Runtime export configuration ──
//
// Describes *where* the export reads from. Carries credentials and
// connection tuning but never touches disk; dkmap-config builds an
// `ExportConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use dkmap_api::transport::{TlsMode, TransportConfig};

use crate::spatial::DEFAULT_SWITCH_LAYER;

/// NetBox instance the map links into.
pub const DEFAULT_NETBOX_URL: &str = "https://netbox.noc.emfcamp.org/";

/// TLS verification strategy for the HTTP clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed lab instances).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        }
    }
}

/// Monitoring endpoint used to mark devices alive.
#[derive(Debug, Clone)]
pub struct LivenessConfig {
    pub prometheus_url: Url,
    /// Samples older than this count as down.
    pub max_age: Duration,
}

/// Everything needed to run one export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// NetBox root URL.
    pub netbox_url: Url,
    pub netbox_token: SecretString,
    /// PostGIS connection string; may embed a password.
    pub database_url: SecretString,
    /// Site-plan layer holding the switch markers.
    pub layer: String,
    /// NetBox page size for list walks.
    pub page_limit: u32,
    pub tls: TlsVerification,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// `None` leaves liveness unknown (every device reads as down).
    pub liveness: Option<LivenessConfig>,
}

impl ExportConfig {
    /// Minimal config with defaults for everything but the two secrets.
    pub fn new(netbox_token: SecretString, database_url: SecretString) -> Self {
        Self {
            netbox_url: default_netbox_url(),
            netbox_token,
            database_url,
            layer: DEFAULT_SWITCH_LAYER.into(),
            page_limit: dkmap_api::netbox::client::DEFAULT_PAGE_LIMIT,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            liveness: None,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}

#[allow(clippy::expect_used)]
fn default_netbox_url() -> Url {
    Url::parse(DEFAULT_NETBOX_URL).expect("default NetBox URL is valid")
}
