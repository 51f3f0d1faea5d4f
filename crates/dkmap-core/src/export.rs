// ── Export pipeline ──
//
// locations → liveness snapshot → switch points → enrich each row in order
// → write one FeatureCollection. Sequential by construction: every await
// completes before the next stage starts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use dkmap_api::{NetboxClient, PrometheusClient};

use crate::config::ExportConfig;
use crate::enrich::{Enricher, LocationIndex};
use crate::error::CoreError;
use crate::inventory::Inventory;
use crate::liveness::{ConfiguredProbe, LivenessProbe, NoProbe, PrometheusProbe};
use crate::model::FeatureCollection;
use crate::spatial::{GeometrySource, PostgisSource};

/// File written inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "dk.json";

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Switch points returned by the geometry source.
    pub rows: usize,
    /// Features written.
    pub features: usize,
    /// Switch names that matched no location, in row order.
    pub unmatched: Vec<String>,
    pub output: PathBuf,
}

/// Called with the switch name of each row that matched no location, as
/// soon as the row is skipped.
pub type UnmatchedHook = Box<dyn FnMut(&str) + Send>;

/// The wired-up pipeline.
pub struct Exporter<I, G, P> {
    inventory: I,
    geometry: G,
    liveness: P,
    on_unmatched: Option<UnmatchedHook>,
}

impl<I, G, P> Exporter<I, G, P>
where
    I: Inventory,
    G: GeometrySource,
    P: LivenessProbe,
{
    pub fn new(inventory: I, geometry: G, liveness: P) -> Self {
        Self {
            inventory,
            geometry,
            liveness,
            on_unmatched: None,
        }
    }

    /// Report skipped rows while the run is in progress. The hook has seen
    /// every skip before a later row can fail the run.
    pub fn on_unmatched(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_unmatched = Some(Box::new(hook));
        self
    }

    /// Give back the collaborators (e.g. to close the database connection).
    pub fn into_parts(self) -> (I, G, P) {
        (self.inventory, self.geometry, self.liveness)
    }

    /// Build the feature collection without writing it.
    ///
    /// Returns the collection, the number of rows read, and the switch
    /// names that matched no location.
    pub async fn build(&mut self) -> Result<(FeatureCollection, usize, Vec<String>), CoreError> {
        let index = LocationIndex::build(self.inventory.locations().await?);
        info!(locations = index.len(), "indexed inventory locations");

        // Monitoring is optional; losing it degrades the map, not the run.
        let liveness = match self.liveness.snapshot().await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "liveness probe failed, treating all devices as down");
                Default::default()
            }
        };

        let rows = self.geometry.switch_points().await?;
        let enricher = Enricher::new(&self.inventory, &index, &liveness);

        let mut features = Vec::with_capacity(rows.len());
        let mut unmatched = Vec::new();
        for row in &rows {
            match enricher.enrich(row).await? {
                Some(feature) => features.push(feature),
                None => {
                    if let Some(hook) = self.on_unmatched.as_mut() {
                        hook(&row.switch);
                    }
                    unmatched.push(row.switch.clone());
                }
            }
        }

        Ok((FeatureCollection::new(features), rows.len(), unmatched))
    }

    /// Run the whole pipeline and write `<output_dir>/dk.json`.
    pub async fn run(&mut self, output_dir: &Path) -> Result<ExportSummary, CoreError> {
        let (collection, rows, unmatched) = self.build().await?;

        let output = output_dir.join(OUTPUT_FILE_NAME);
        write_collection(&output, &collection)?;
        info!(
            path = %output.display(),
            features = collection.len(),
            skipped = unmatched.len(),
            "wrote feature collection"
        );

        Ok(ExportSummary {
            rows,
            features: collection.len(),
            unmatched,
            output,
        })
    }
}

impl Exporter<NetboxClient, PostgisSource, ConfiguredProbe> {
    /// Construct the production collaborators from config.
    ///
    /// The HTTP clients are built without contacting anything; the database
    /// connection is opened here, once, for the whole run.
    pub async fn connect(config: &ExportConfig) -> Result<Self, CoreError> {
        let transport = config.transport();

        let inventory =
            NetboxClient::from_token(config.netbox_url.as_str(), &config.netbox_token, &transport)?
                .with_page_limit(config.page_limit);

        let liveness = match &config.liveness {
            Some(lc) => {
                let client = PrometheusClient::new(lc.prometheus_url.as_str(), &transport)
                    .map_err(|e| CoreError::from_api("Prometheus", e))?;
                info!(url = %lc.prometheus_url, "liveness probe enabled");
                ConfiguredProbe::Prometheus(PrometheusProbe::new(client, lc.max_age))
            }
            None => ConfiguredProbe::Disabled(NoProbe),
        };

        let geometry = PostgisSource::connect(&config.database_url, config.layer.clone()).await?;

        Ok(Self::new(inventory, geometry, liveness))
    }
}

/// Write a collection as compact UTF-8 JSON, replacing any existing file.
pub fn write_collection(path: &Path, collection: &FeatureCollection) -> Result<(), CoreError> {
    let io_err = |source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Feature, Location, Point, Properties};

    #[test]
    fn write_collection_is_compact_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE_NAME);

        let props = Properties::summarize(&Location::new(1, "NOC"), Vec::new(), Vec::new());
        let collection = FeatureCollection::new(vec![Feature::point(Point::new(1.0, 2.0), props)]);
        write_collection(&path, &collection).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with(r#"{"type":"FeatureCollection","features":[{"type":"Feature""#));
    }

    #[test]
    fn write_collection_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(OUTPUT_FILE_NAME);

        let err = write_collection(&path, &FeatureCollection::default()).unwrap_err();
        match err {
            CoreError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got: {other:?}"),
        }
    }
}
