// ── Geometry source ──
//
// Reads switch markers from the site-plan layer in PostGIS. The database
// does the reprojection (EPSG:4326) and hands back WKT; we only parse it.

use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use sqlx::{Connection, PgConnection};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::GeometryRow;

/// Site-plan layer holding the NOC switch markers.
pub const DEFAULT_SWITCH_LAYER: &str = "noc ... switch";

/// Switch points on the plan, transformed to lon/lat.
///
/// `$1` is the layer name; matching is case-insensitive.
pub const SWITCH_POINTS_QUERY: &str = "\
SELECT switch, ST_AsText(ST_Transform(wkb_geometry, 4326)) AS location
FROM site_plan
WHERE lower(layer) = lower($1)
AND ST_GeometryType(wkb_geometry) = 'ST_Point'";

/// Source of switch-name/point rows.
pub trait GeometrySource {
    /// All switch points, in query order.
    fn switch_points(&mut self) -> impl Future<Output = Result<Vec<GeometryRow>, CoreError>> + Send;
}

#[derive(Debug, sqlx::FromRow)]
struct SwitchPointRow {
    switch: Option<String>,
    location: Option<String>,
}

/// PostGIS-backed geometry source holding a single connection for the run.
pub struct PostgisSource {
    conn: PgConnection,
    layer: String,
}

impl PostgisSource {
    pub async fn connect(url: &SecretString, layer: impl Into<String>) -> Result<Self, CoreError> {
        let conn = PgConnection::connect(url.expose_secret()).await?;
        info!("connected to spatial database");
        Ok(Self {
            conn,
            layer: layer.into(),
        })
    }

    /// Close the connection cleanly.
    pub async fn close(self) -> Result<(), CoreError> {
        self.conn.close().await?;
        Ok(())
    }
}

impl GeometrySource for PostgisSource {
    async fn switch_points(&mut self) -> Result<Vec<GeometryRow>, CoreError> {
        debug!(layer = %self.layer, "querying switch points");

        let rows: Vec<SwitchPointRow> = sqlx::query_as(SWITCH_POINTS_QUERY)
            .bind(self.layer.as_str())
            .fetch_all(&mut self.conn)
            .await?;

        let points = rows_to_points(rows)?;
        info!(count = points.len(), layer = %self.layer, "read switch points");
        Ok(points)
    }
}

/// Rows with no switch label can't be joined to anything and are dropped;
/// a row with unparseable geometry fails the whole read.
fn rows_to_points(rows: Vec<SwitchPointRow>) -> Result<Vec<GeometryRow>, CoreError> {
    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(switch) = row.switch else {
            warn!(geometry = ?row.location, "switch point without a name, skipping");
            continue;
        };
        let wkt = row.location.unwrap_or_default();
        let point = GeometryRow::from_wkt(switch.clone(), &wkt)
            .map_err(|source| CoreError::InvalidGeometry { switch, source })?;
        points.push(point);
    }
    Ok(points)
}
