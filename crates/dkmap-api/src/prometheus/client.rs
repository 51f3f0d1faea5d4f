use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

use super::models::{QueryResponse, Sample};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Async client for the Prometheus HTTP query API.
pub struct PrometheusClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PrometheusClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        let path = base_url.path().trim_end_matches('/').to_owned();
        base_url.set_path(&format!("{path}/"));
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run an instant query and return the vector samples.
    ///
    /// `GET /api/v1/query?query=<expr>`
    pub async fn query(&self, expr: &str) -> Result<Vec<Sample>, Error> {
        let url = self.base_url.join("api/v1/query")?;
        debug!(%url, expr, "prometheus instant query");

        let resp = self.http.get(url).query(&[("query", expr)]).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        // Prometheus reports query errors as 4xx with a JSON body, so try the
        // envelope before falling back to the bare status.
        let envelope: QueryResponse = match serde_json::from_str(&body) {
            Ok(env) => env,
            Err(_) if !status.is_success() => {
                return Err(Error::Prometheus {
                    error_type: format!("http_{}", status.as_u16()),
                    message: status.to_string(),
                });
            }
            Err(e) => {
                return Err(Error::Deserialization {
                    message: e.to_string(),
                    body,
                });
            }
        };

        if envelope.status != "success" {
            return Err(Error::Prometheus {
                error_type: envelope.error_type.unwrap_or_else(|| "unknown".into()),
                message: envelope.error.unwrap_or_default(),
            });
        }

        Ok(envelope.data.map(|d| d.result).unwrap_or_default())
    }

    /// Query `up` and reduce it to a job-name → alive map.
    ///
    /// A job is alive when its sample reads `"1"` and was taken within
    /// `max_age` of `now`. Samples without a `job` label are ignored; when a
    /// job has several instances the last sample returned wins.
    pub async fn up_by_job(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Result<HashMap<String, bool>, Error> {
        let samples = self.query("up").await?;
        Ok(reduce_up_samples(&samples, now, max_age))
    }
}

pub(crate) fn reduce_up_samples(
    samples: &[Sample],
    now: DateTime<Utc>,
    max_age: Duration,
) -> HashMap<String, bool> {
    let cutoff = unix_seconds(now) - max_age.as_secs_f64();

    let mut result = HashMap::new();
    for sample in samples {
        let Some(job) = sample.label("job") else {
            continue;
        };
        let alive = sample.raw_value() == "1" && sample.timestamp() > cutoff;
        result.insert(job.to_owned(), alive);
    }
    result
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn unix_seconds(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}
