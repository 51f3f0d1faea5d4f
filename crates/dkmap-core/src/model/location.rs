// ── Location domain type ──

use serde::{Deserialize, Serialize};
use url::Url;

/// Name prefix that marks a distribution kiosk location.
const DK_PREFIX: &str = "DK";

/// Lookup key used to join site-plan switch names against NetBox locations.
///
/// Case-insensitive and hyphen-insensitive: `"DK-North"` and `"dk north"`
/// produce the same key.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('-', " ")
}

/// A named physical location in NetBox (a DK, a rack room, a tent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    /// Link to the location in the NetBox web UI.
    pub url: Option<Url>,
}

impl Location {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
        }
    }

    /// Whether this is a DK location (name starts with `DK`, case-sensitive).
    pub fn is_dk(&self) -> bool {
        self.name.starts_with(DK_PREFIX)
    }

    pub fn lookup_key(&self) -> String {
        normalize_name(&self.name)
    }
}
