// dkmap-core: Joins site-plan switch points against NetBox and builds the DK map.

pub mod config;
pub mod convert;
pub mod enrich;
pub mod error;
pub mod export;
pub mod inventory;
pub mod liveness;
pub mod model;
pub mod spatial;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ExportConfig, LivenessConfig, TlsVerification};
pub use enrich::{Enricher, LocationIndex};
pub use error::CoreError;
pub use export::{ExportSummary, Exporter, OUTPUT_FILE_NAME, UnmatchedHook, write_collection};
pub use inventory::Inventory;
pub use liveness::{ConfiguredProbe, LivenessMap, LivenessProbe, NoProbe, PrometheusProbe};
pub use spatial::{GeometrySource, PostgisSource};

pub use model::{
    Device, Feature, FeatureCollection, Geometry, GeometryRow, Location, Point, Properties, Rack,
    normalize_name,
};
