// ── API-to-domain type conversions ──
//
// Bridges raw `dkmap_api::netbox` response types into the domain model.
// Web UI links are built by the client, so each conversion takes the link
// alongside the API record.

use url::Url;

use dkmap_api::netbox::models::{NetboxDevice, NetboxLocation, NetboxRack};

use crate::model::{Device, Location, Rack};

pub fn location(raw: NetboxLocation, url: Option<Url>) -> Location {
    Location {
        id: raw.id,
        name: raw.name,
        url,
    }
}

/// Liveness is left unset here; the enricher fills it from the probe snapshot.
pub fn device(raw: NetboxDevice, url: Option<Url>) -> Device {
    Device {
        name: raw.name.filter(|n| !n.is_empty()),
        device_type: raw.device_type.display,
        url,
        status: raw.status.label,
        alive: None,
    }
}

pub fn rack(raw: NetboxRack, url: Option<Url>) -> Rack {
    Rack {
        id: raw.id,
        name: raw.name,
        url,
    }
}
