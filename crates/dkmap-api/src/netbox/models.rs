// NetBox response types
//
// Models for the `dcim/` objects read by the export. NetBox returns a lot
// more than we need; only the fields the export touches are modelled and
// everything else lands in `extra`.

use serde::{Deserialize, Serialize};

// ── Page envelope ────────────────────────────────────────────────────

/// Standard NetBox list response.
///
/// ```json
/// { "count": 2, "next": "https://…?offset=50", "previous": null, "results": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

// ── Shared nested shapes ─────────────────────────────────────────────

/// Brief nested representation of a related object (`site`, `location`, …).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedRef {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Choice field, e.g. `"status": { "value": "active", "label": "Active" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceField {
    pub value: String,
    pub label: String,
}

// ── Location ─────────────────────────────────────────────────────────

/// `dcim/locations/` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxLocation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<ChoiceField>,
    /// Catch-all for fields we don't model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Nested device type on a device. `display` is the human label,
/// typically `"<manufacturer> <model>"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedDeviceType {
    pub id: i64,
    pub display: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<NestedRef>,
}

/// `dcim/devices/` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxDevice {
    pub id: i64,
    /// Devices may be unnamed in NetBox.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display: String,
    pub device_type: NestedDeviceType,
    pub status: ChoiceField,
    #[serde(default)]
    pub location: Option<NestedRef>,
    #[serde(default)]
    pub rack: Option<NestedRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Rack ─────────────────────────────────────────────────────────────

/// `dcim/racks/` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxRack {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub location: Option<NestedRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
