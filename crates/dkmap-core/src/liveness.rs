// ── Liveness port ──
//
// Optional monitoring integration. A probe produces one snapshot per run,
// mapping device names to whether monitoring currently sees them up.
// Devices missing from the snapshot are treated as not alive.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use dkmap_api::PrometheusClient;

use crate::error::CoreError;

/// Device name → currently up.
pub type LivenessMap = HashMap<String, bool>;

/// Something that can tell which devices are up right now.
pub trait LivenessProbe {
    fn snapshot(&self) -> impl Future<Output = Result<LivenessMap, CoreError>> + Send;
}

/// Probe used when monitoring is not configured: knows nothing, so every
/// device reads as not alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl LivenessProbe for NoProbe {
    async fn snapshot(&self) -> Result<LivenessMap, CoreError> {
        Ok(LivenessMap::new())
    }
}

/// Reads the Prometheus `up` metric. Scrape jobs are named after the
/// device they monitor, so the job label is the device name.
pub struct PrometheusProbe {
    client: PrometheusClient,
    max_age: Duration,
}

impl PrometheusProbe {
    pub fn new(client: PrometheusClient, max_age: Duration) -> Self {
        Self { client, max_age }
    }
}

impl LivenessProbe for PrometheusProbe {
    async fn snapshot(&self) -> Result<LivenessMap, CoreError> {
        let map = self
            .client
            .up_by_job(Utc::now(), self.max_age)
            .await
            .map_err(|e| CoreError::from_api("Prometheus", e))?;
        debug!(jobs = map.len(), "liveness snapshot");
        Ok(map)
    }
}

/// The probe selected by configuration.
pub enum ConfiguredProbe {
    Disabled(NoProbe),
    Prometheus(PrometheusProbe),
}

impl LivenessProbe for ConfiguredProbe {
    async fn snapshot(&self) -> Result<LivenessMap, CoreError> {
        match self {
            Self::Disabled(p) => p.snapshot().await,
            Self::Prometheus(p) => p.snapshot().await,
        }
    }
}

/// Liveness of one device against a snapshot. Unnamed or unknown devices are not alive.
pub fn device_alive(snapshot: &LivenessMap, device_name: Option<&str>) -> bool {
    device_name
        .and_then(|name| snapshot.get(name).copied())
        .unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_probe_is_empty() {
        assert!(NoProbe.snapshot().await.unwrap().is_empty());
    }

    #[test]
    fn unknown_device_is_not_alive() {
        let mut snap = LivenessMap::new();
        snap.insert("dk-a-sw1".into(), true);
        snap.insert("dk-b-sw1".into(), false);

        assert!(device_alive(&snap, Some("dk-a-sw1")));
        assert!(!device_alive(&snap, Some("dk-b-sw1")));
        assert!(!device_alive(&snap, Some("dk-c-sw1")));
        assert!(!device_alive(&snap, None));
    }
}
