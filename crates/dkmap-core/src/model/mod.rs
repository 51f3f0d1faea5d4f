// ── Domain model ──
//
// Inventory records as the export sees them, the site-plan geometry rows,
// and the GeoJSON output shapes.

pub mod device;
pub mod feature;
pub mod geometry;
pub mod location;

pub use device::{Device, Rack};
pub use feature::{Feature, FeatureCollection, Geometry, Properties};
pub use geometry::{GeometryRow, Point, WktError};
pub use location::{Location, normalize_name};
