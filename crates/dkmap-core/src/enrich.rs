// ── Join and roll-up ──
//
// Matches each site-plan switch point to a NetBox location by normalized
// name, pulls the devices and racks at that location, and derives the
// map properties.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::inventory::Inventory;
use crate::liveness::{LivenessMap, device_alive};
use crate::model::{Feature, GeometryRow, Location, Properties, normalize_name};

/// Normalized location name → location.
#[derive(Debug, Default)]
pub struct LocationIndex {
    by_key: HashMap<String, Location>,
}

impl LocationIndex {
    /// Index locations by lookup key. When two names normalize to the same
    /// key the later location wins.
    pub fn build(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut by_key = HashMap::new();
        for location in locations {
            if let Some(previous) = by_key.insert(location.lookup_key(), location) {
                warn!(
                    shadowed = %previous.name,
                    id = previous.id,
                    "two locations share a lookup key, keeping the later one"
                );
            }
        }
        Self { by_key }
    }

    /// Find the location a switch label refers to.
    pub fn lookup(&self, switch_name: &str) -> Option<&Location> {
        self.by_key.get(&normalize_name(switch_name))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Turns geometry rows into map features.
pub struct Enricher<'a, I> {
    inventory: &'a I,
    index: &'a LocationIndex,
    liveness: &'a LivenessMap,
}

impl<'a, I: Inventory> Enricher<'a, I> {
    pub fn new(inventory: &'a I, index: &'a LocationIndex, liveness: &'a LivenessMap) -> Self {
        Self {
            inventory,
            index,
            liveness,
        }
    }

    /// Build the feature for one switch point.
    ///
    /// Returns `Ok(None)` when the switch name matches no location; inventory
    /// failures for a matched location are returned as errors.
    pub async fn enrich(&self, row: &GeometryRow) -> Result<Option<Feature>, CoreError> {
        let Some(location) = self.index.lookup(&row.switch) else {
            warn!(switch = %row.switch, "location not found");
            return Ok(None);
        };

        let mut devices = self.inventory.devices_at(location).await?;
        let racks = self.inventory.racks_at(location).await?;

        for device in &mut devices {
            device.alive = Some(device_alive(self.liveness, device.name.as_deref()));
        }

        debug!(
            location = %location.name,
            devices = devices.len(),
            racks = racks.len(),
            "enriched switch point"
        );

        let properties = Properties::summarize(location, devices, racks);
        Ok(Some(Feature::point(row.point, properties)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_and_hyphen_insensitive() {
        let index = LocationIndex::build([Location::new(1, "DK-North")]);

        assert_eq!(index.lookup("dk-north").map(|l| l.id), Some(1));
        assert_eq!(index.lookup("DK NORTH").map(|l| l.id), Some(1));
        assert!(index.lookup("DK-South").is_none());
    }

    #[test]
    fn colliding_keys_keep_the_later_location() {
        let index = LocationIndex::build([Location::new(1, "DK-1"), Location::new(2, "dk 1")]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("DK-1").map(|l| l.id), Some(2));
    }
}
