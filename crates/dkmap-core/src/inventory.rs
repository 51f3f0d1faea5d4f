// ── Inventory port ──
//
// The enricher only needs three reads from the asset inventory. Keeping
// them behind a trait lets the pipeline run against an in-memory
// inventory in tests; production uses the NetBox client.

use std::future::Future;

use tracing::debug;

use dkmap_api::NetboxClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{Device, Location, Rack};

/// Read access to locations and the devices/racks registered at them.
pub trait Inventory {
    /// Every known location.
    fn locations(&self) -> impl Future<Output = Result<Vec<Location>, CoreError>> + Send;

    /// Devices registered at `location`, in inventory order.
    fn devices_at(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<Vec<Device>, CoreError>> + Send;

    /// Racks registered at `location`, in inventory order.
    fn racks_at(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<Vec<Rack>, CoreError>> + Send;
}

impl Inventory for NetboxClient {
    async fn locations(&self) -> Result<Vec<Location>, CoreError> {
        let raw = self.all_locations().await?;
        debug!(count = raw.len(), "loaded locations from NetBox");
        Ok(raw
            .into_iter()
            .map(|l| {
                let url = self.location_url(l.id).ok();
                convert::location(l, url)
            })
            .collect())
    }

    async fn devices_at(&self, location: &Location) -> Result<Vec<Device>, CoreError> {
        let raw = self.location_devices(location.id).await?;
        Ok(raw
            .into_iter()
            .map(|d| {
                let url = self.device_url(d.id).ok();
                convert::device(d, url)
            })
            .collect())
    }

    async fn racks_at(&self, location: &Location) -> Result<Vec<Rack>, CoreError> {
        let raw = self.location_racks(location.id).await?;
        Ok(raw
            .into_iter()
            .map(|r| {
                let url = self.rack_url(r.id).ok();
                convert::rack(r, url)
            })
            .collect())
    }
}
