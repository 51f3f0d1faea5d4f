// ── Site-plan geometry ──
//
// The spatial query hands back points as WKT text already transformed to
// EPSG:4326. Only `POINT` is accepted; anything else is a malformed row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a WKT string could not be read as a point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WktError {
    #[error("expected POINT, found {0:?}")]
    NotAPoint(String),

    #[error("POINT EMPTY has no coordinates")]
    Empty,

    #[error("malformed POINT text: {0:?}")]
    Malformed(String),

    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),

    #[error("expected at least 2 coordinates, found {0}")]
    TooFewCoordinates(usize),
}

/// A longitude/latitude pair. Serializes as the GeoJSON position `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Parse `POINT(x y)`, `POINT Z (x y z)` and friends.
    ///
    /// Extra ordinates (Z, M) are dropped.
    pub fn from_wkt(text: &str) -> Result<Self, WktError> {
        let trimmed = text.trim();
        let upper = trimmed.to_ascii_uppercase();

        let Some(rest) = upper.strip_prefix("POINT") else {
            let tag = trimmed.split(['(', ' ']).next().unwrap_or(trimmed);
            return Err(WktError::NotAPoint(tag.to_owned()));
        };

        // Dimension tags sit between the keyword and the parenthesis.
        let rest = rest.trim_start();
        let rest = ["ZM", "Z", "M"]
            .iter()
            .find_map(|tag| rest.strip_prefix(tag))
            .unwrap_or(rest)
            .trim();

        if rest == "EMPTY" {
            return Err(WktError::Empty);
        }

        let inner = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| WktError::Malformed(trimmed.to_owned()))?;

        let coords = inner
            .split_whitespace()
            .map(|raw| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| WktError::InvalidCoordinate(raw.to_owned()))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        match coords.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            short => Err(WktError::TooFewCoordinates(short.len())),
        }
    }
}

impl FromStr for Point {
    type Err = WktError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wkt(s)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT({} {})", self.lon, self.lat)
    }
}

impl From<[f64; 2]> for Point {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.lon, p.lat]
    }
}

/// One switch marker from the site plan.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRow {
    /// Switch label as drawn on the plan; joins to a NetBox location.
    pub switch: String,
    pub point: Point,
}

impl GeometryRow {
    pub fn new(switch: impl Into<String>, point: Point) -> Self {
        Self {
            switch: switch.into(),
            point,
        }
    }

    /// Build a row from the switch label and WKT text returned by the database.
    pub fn from_wkt(switch: impl Into<String>, wkt: &str) -> Result<Self, WktError> {
        Ok(Self::new(switch, Point::from_wkt(wkt)?))
    }
}
