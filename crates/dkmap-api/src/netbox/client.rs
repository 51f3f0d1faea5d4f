// NetBox HTTP client
//
// Wraps `reqwest::Client` with token auth, URL construction under `/api/`,
// response decoding, and the offset/limit pagination walk. Endpoint methods
// live in `dcim.rs` to keep this module focused on transport mechanics.

use std::future::Future;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::Page;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Page size used when the caller doesn't pick one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

// ── Error response shape from NetBox ─────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the NetBox REST API.
///
/// Authenticates with a static API token and reads JSON from the
/// endpoints under `/api/`. The base URL is the NetBox root, which is
/// also used to build links into the NetBox web UI.
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: Url,
    page_limit: u32,
}

impl NetboxClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Token <token>` as a default header on every request.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|_| Error::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self {
            http,
            base_url,
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Override the page size used by the collecting list helpers.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Reduce the configured URL to the NetBox root, with a trailing slash.
    ///
    /// Both `https://netbox/` and `https://netbox/api` are accepted.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();
        let root = path.strip_suffix("/api").unwrap_or(&path);
        url.set_path(&format!("{root}/"));
        url.set_query(None);

        Ok(url)
    }

    /// The NetBox root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The page size used by the collecting list helpers.
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative API path (e.g. `"dcim/locations/"`) under `/api/`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("api/{path}"))?)
    }

    /// Link to an object in the NetBox web UI: `{root}dcim/{kind}/{id}/`.
    pub fn ui_url(&self, kind: &str, id: i64) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("dcim/{kind}/{id}/"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::InvalidToken;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                detail: Some(detail),
            }) => detail,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Netbox {
            status: status.as_u16(),
            message,
        }
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect all pages into a single `Vec<T>`.
    ///
    /// Stops on a short page, when `count` items have been collected, or
    /// when NetBox reports no `next` page.
    pub async fn paginate_all<T, F, Fut>(&self, limit: u32, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(u64, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page = fetch(offset, limit).await?;
            let received = page.results.len();
            all.extend(page.results);

            let limit_usize = usize::try_from(limit).unwrap_or(usize::MAX);
            if received == 0
                || received < limit_usize
                || u64::try_from(all.len()).unwrap_or(u64::MAX) >= page.count
                || page.next.is_none()
            {
                break;
            }

            offset += u64::try_from(received).unwrap_or(u64::MAX);
        }

        Ok(all)
    }
}
