// ── GeoJSON output shapes ──
//
// Only what the map consumes: a FeatureCollection of Point features whose
// properties describe one switch location.

use serde::{Deserialize, Serialize};
use url::Url;

use super::device::{Device, Rack};
use super::geometry::Point;
use super::location::Location;

/// GeoJSON geometry. Only points are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Point },
}

/// Properties attached to each switch feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub name: String,
    /// Location name carries the `DK` prefix.
    pub dk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netbox_url: Option<Url>,
    /// Sorted by device type label.
    pub devices: Vec<Device>,
    pub racks: Vec<Rack>,
    /// At least one device, and every device has status `Active`.
    pub active: bool,
    /// Every device with a liveness attribute reports alive.
    pub alive: bool,
}

impl Properties {
    /// Roll devices and racks at `location` up into the map properties.
    ///
    /// Devices are stably sorted by type label before the flags are derived.
    pub fn summarize(location: &Location, mut devices: Vec<Device>, racks: Vec<Rack>) -> Self {
        devices.sort_by(|a, b| a.device_type.cmp(&b.device_type));

        let active = !devices.is_empty() && devices.iter().all(Device::is_active);
        // Vacuously true when no device carries a liveness attribute.
        let alive = devices.iter().filter_map(|d| d.alive).all(|up| up);

        Self {
            name: location.name.clone(),
            dk: location.is_dk(),
            netbox_url: location.url.clone(),
            devices,
            racks,
            active,
            alive,
        }
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn point(at: Point, properties: Properties) -> Self {
        Self {
            geometry: Geometry::Point { coordinates: at },
            properties,
        }
    }
}

/// Top-level GeoJSON document written to `dk.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn device(kind: &str, status: &str, alive: Option<bool>) -> Device {
        Device {
            name: Some(format!("{kind}-{status}")),
            device_type: kind.into(),
            url: None,
            status: status.into(),
            alive,
        }
    }

    fn summarize(devices: Vec<Device>) -> Properties {
        Properties::summarize(&Location::new(1, "DK-1"), devices, Vec::new())
    }

    #[test]
    fn active_requires_devices() {
        assert!(!summarize(Vec::new()).active);
    }

    #[test]
    fn active_when_all_active() {
        let p = summarize(vec![
            device("Switch", "Active", None),
            device("AP", "Active", None),
        ]);
        assert!(p.active);
    }

    #[test]
    fn one_planned_device_clears_active() {
        let p = summarize(vec![
            device("Switch", "Active", None),
            device("AP", "Planned", None),
        ]);
        assert!(!p.active);
    }

    #[test]
    fn status_match_is_exact() {
        assert!(!summarize(vec![device("Switch", "active", None)]).active);
    }

    #[test]
    fn alive_is_vacuous_without_liveness() {
        assert!(summarize(Vec::new()).alive);
        assert!(summarize(vec![device("Switch", "Active", None)]).alive);
    }

    #[test]
    fn alive_ignores_devices_without_liveness() {
        let p = summarize(vec![
            device("Switch", "Active", Some(true)),
            device("PDU", "Active", None),
        ]);
        assert!(p.alive);
    }

    #[test]
    fn one_dead_device_clears_alive() {
        let p = summarize(vec![
            device("Switch", "Active", Some(true)),
            device("AP", "Active", Some(false)),
        ]);
        assert!(!p.alive);
    }

    #[test]
    fn devices_sorted_by_type_stably() {
        let mut first = device("Switch", "Active", None);
        first.name = Some("first".into());
        let mut second = device("Switch", "Active", None);
        second.name = Some("second".into());

        let p = summarize(vec![first, device("AP", "Active", None), second]);

        let order: Vec<(&str, &str)> = p
            .devices
            .iter()
            .map(|d| (d.device_type.as_str(), d.name.as_deref().unwrap()))
            .collect();
        assert_eq!(
            order,
            [
                ("AP", "AP-Active"),
                ("Switch", "first"),
                ("Switch", "second")
            ]
        );
    }

    #[test]
    fn feature_serializes_as_geojson() {
        let feature = Feature::point(Point::new(1.0, 2.0), summarize(Vec::new()));
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"], serde_json::json!([1.0, 2.0]));
        assert_eq!(value["properties"]["name"], "DK-1");
        assert_eq!(value["properties"]["dk"], true);
    }

    #[test]
    fn collection_envelope() {
        let value = serde_json::to_value(FeatureCollection::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "FeatureCollection", "features": [] })
        );
    }
}
