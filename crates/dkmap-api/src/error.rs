use thiserror::Error;

/// Top-level error type for the `dkmap-api` crate.
///
/// Covers every failure mode of both upstream surfaces: transport,
/// NetBox REST responses, and Prometheus query responses.
/// `dkmap-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// NetBox rejected the API token (HTTP 401/403).
    #[error("Invalid or unauthorized NetBox API token")]
    InvalidToken,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client-builder error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── NetBox ──────────────────────────────────────────────────────
    /// Non-success response from NetBox, with its `detail` message if present.
    #[error("NetBox API error (HTTP {status}): {message}")]
    Netbox { status: u16, message: String },

    // ── Prometheus ──────────────────────────────────────────────────
    /// Query rejected by Prometheus (`"status": "error"` envelope).
    #[error("Prometheus query failed ({error_type}): {message}")]
    Prometheus { error_type: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
