// ── Device and rack domain types ──
//
// These serialize directly into the `devices` / `racks` arrays of a
// feature's properties, so field order and names follow the map's format.

use serde::{Deserialize, Serialize};
use url::Url;

/// Status label NetBox uses for devices in service.
pub const ACTIVE_STATUS: &str = "Active";

/// A device registered at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Devices may be unnamed in NetBox; serialized as `null`.
    pub name: Option<String>,
    /// Device type display label, e.g. `"Juniper EX2200-C"`.
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    /// Status label, e.g. `"Active"`, `"Planned"`.
    pub status: String,
    /// Liveness as reported by monitoring. `None` means the device carries
    /// no liveness attribute at all and is left out of the `alive` roll-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alive: Option<bool>,
}

impl Device {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// A rack registered at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}
