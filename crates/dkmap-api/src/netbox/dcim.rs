// NetBox DCIM endpoints
//
// Locations, devices, and racks. Devices and racks are always read scoped
// to a single location via the `location_id` filter.

use tracing::debug;
use url::Url;

use super::client::NetboxClient;
use super::models::{NetboxDevice, NetboxLocation, NetboxRack, Page};
use crate::error::Error;

fn page_params(offset: u64, limit: u32) -> Vec<(&'static str, String)> {
    vec![("offset", offset.to_string()), ("limit", limit.to_string())]
}

impl NetboxClient {
    // ── Locations ────────────────────────────────────────────────────

    /// `GET /api/dcim/locations/?offset=&limit=`
    pub async fn list_locations(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Page<NetboxLocation>, Error> {
        self.get_with_params("dcim/locations/", &page_params(offset, limit))
            .await
    }

    /// Every location, across all pages.
    pub async fn all_locations(&self) -> Result<Vec<NetboxLocation>, Error> {
        debug!("listing all locations");
        self.paginate_all(self.page_limit(), |offset, limit| {
            self.list_locations(offset, limit)
        })
        .await
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// `GET /api/dcim/devices/?location_id=&offset=&limit=`
    pub async fn list_devices(
        &self,
        location_id: i64,
        offset: u64,
        limit: u32,
    ) -> Result<Page<NetboxDevice>, Error> {
        let mut params = page_params(offset, limit);
        params.push(("location_id", location_id.to_string()));
        self.get_with_params("dcim/devices/", &params).await
    }

    /// Every device registered at a location.
    pub async fn location_devices(&self, location_id: i64) -> Result<Vec<NetboxDevice>, Error> {
        debug!(location_id, "listing devices");
        self.paginate_all(self.page_limit(), |offset, limit| {
            self.list_devices(location_id, offset, limit)
        })
        .await
    }

    // ── Racks ────────────────────────────────────────────────────────

    /// `GET /api/dcim/racks/?location_id=&offset=&limit=`
    pub async fn list_racks(
        &self,
        location_id: i64,
        offset: u64,
        limit: u32,
    ) -> Result<Page<NetboxRack>, Error> {
        let mut params = page_params(offset, limit);
        params.push(("location_id", location_id.to_string()));
        self.get_with_params("dcim/racks/", &params).await
    }

    /// Every rack registered at a location.
    pub async fn location_racks(&self, location_id: i64) -> Result<Vec<NetboxRack>, Error> {
        debug!(location_id, "listing racks");
        self.paginate_all(self.page_limit(), |offset, limit| {
            self.list_racks(location_id, offset, limit)
        })
        .await
    }

    // ── Web UI links ─────────────────────────────────────────────────

    pub fn location_url(&self, id: i64) -> Result<Url, Error> {
        self.ui_url("locations", id)
    }

    pub fn device_url(&self, id: i64) -> Result<Url, Error> {
        self.ui_url("devices", id)
    }

    pub fn rack_url(&self, id: i64) -> Result<Url, Error> {
        self.ui_url("racks", id)
    }
}
