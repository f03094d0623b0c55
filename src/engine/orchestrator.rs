// ==========================================
// gSSURGO Merge - Conversion Orchestrator
// ==========================================
// Top-level sequencing for one run: discover inputs, compute merge order,
// scan spatial inputs, build the store, merge features, import tabular
// data, finish with the catalog report. Strictly sequential; the first
// error of any kind ends the run and leaves the partial store in place
// for inspection.
// ==========================================

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConversionOptions;
use crate::domain::survey::{discover_units, SurveyUnit};
use crate::domain::types::FeatureRole;
use crate::error::{ConvertError, ConvertResult};
use crate::importer::source::TabularMode;
use crate::importer::tabular::{import_metadata_tables, TabularImporter};
use crate::repository::GeoStore;
use crate::schema::builder::StoreBuilder;
use crate::schema::catalog::{LiveCatalog, SchemaCatalog};
use crate::schema::template::SchemaTemplate;
use crate::spatial::merger::{FeatureMerger, FeatureSource, MergePlan};
use crate::spatial::{shp, sort};

/// Outcome of a successful conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Unique run identifier.
    pub run_id: String,
    /// The consolidated store that was produced.
    pub output_store: PathBuf,
    /// Surveys actually merged, as "AREASYMBOL (export date)".
    pub surveys: Vec<String>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
    /// Wall-clock duration in seconds.
    pub elapsed_seconds: f64,
}

impl ConversionResult {
    pub fn to_json(&self) -> ConvertResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConvertError::Internal(format!("result serialization failed: {e}")))
    }
}

/// Drives a full conversion run.
pub struct ConversionOrchestrator {
    options: ConversionOptions,
}

impl ConversionOrchestrator {
    pub fn new(options: ConversionOptions) -> ConvertResult<ConversionOrchestrator> {
        options.validate()?;
        Ok(ConversionOrchestrator { options })
    }

    /// Run the conversion. Either every survey unit lands completely in the
    /// store, or the run fails with the first error.
    pub fn run(&self) -> ConvertResult<ConversionResult> {
        let started = Instant::now();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4().to_string();
        info!("starting conversion run {}", run_id);

        // Discover inputs and fix the merge order before anything is built.
        let units = discover_units(&self.options.input_folder, self.options.surveys.as_deref())?;
        let order = match &self.options.boundary_layer {
            Some(layer) => sort::symbols_from_boundary_layer(layer, &units)?,
            None => sort::sorted_area_symbols(&units)?,
        };
        let ordered_units: Vec<SurveyUnit> = order
            .iter()
            .filter_map(|symbol| units.iter().find(|u| &u.area_symbol == symbol).cloned())
            .collect();
        if ordered_units.is_empty() {
            return Err(ConvertError::Internal(
                "merge order selected no survey units".to_string(),
            ));
        }

        let mode = self.options.mode();
        let plan = self.scan_spatial_inputs(&ordered_units, mode)?;

        // Build the store, then merge all feature roles before any tabular
        // import begins.
        let output_path = sanitized_output_path(&self.options.output_path);
        let template = SchemaTemplate::for_region(self.options.region);
        let store = StoreBuilder::new(template).create(&output_path, &self.options.alias_suffix)?;

        FeatureMerger::new(&store).merge(&plan)?;

        // Metadata first: the live schema catalog is read out of it.
        import_metadata_tables(&store, &ordered_units[0], mode)?;
        let catalog = LiveCatalog::load(&store)?;
        if catalog.import_tables()?.is_empty() {
            return Err(ConvertError::Internal(
                "no tables registered in the output store".to_string(),
            ));
        }
        let mut importer = TabularImporter::new(&store, &catalog);
        for unit in &ordered_units {
            importer.import_unit(unit, mode)?;
        }
        importer.finalize()?;

        info!(
            "all spatial and tabular data imported ({} rows, {} duplicate lookup rows skipped)",
            importer.session().rows_inserted,
            importer.session().duplicates_skipped
        );

        let surveys = survey_report(&store)?;
        info!(
            "successfully created a store containing the following surveys: {}",
            surveys.join(", ")
        );

        Ok(ConversionResult {
            run_id,
            output_store: output_path,
            surveys,
            started_at,
            completed_at: Utc::now(),
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }

    /// Walk every unit's spatial folder, building the per-role merge lists
    /// and expected feature counts. The soil polygon layer is required and
    /// must hold features; the other roles are optional and empty layers
    /// are skipped.
    fn scan_spatial_inputs(
        &self,
        units: &[SurveyUnit],
        mode: TabularMode,
    ) -> ConvertResult<MergePlan> {
        info!("creating merge list for {} survey areas", units.len());
        let mut plan = MergePlan::new();

        for unit in units {
            let polygon_path =
                unit.polygon_shapefile()
                    .ok_or_else(|| ConvertError::CorruptGeometry {
                        area_symbol: unit.area_symbol.clone(),
                        message: format!(
                            "missing soil polygon shapefile in {}",
                            unit.spatial_folder().display()
                        ),
                    })?;
            let (_, polygon_count) = shp::polygon_layer_info(&polygon_path, &unit.area_symbol)?;
            plan.add_source(
                FeatureRole::MapunitPolygon,
                FeatureSource {
                    area_symbol: unit.area_symbol.clone(),
                    path: polygon_path,
                },
                polygon_count,
            );

            for role in [
                FeatureRole::MapunitLine,
                FeatureRole::MapunitPoint,
                FeatureRole::SpecialFeatureLine,
                FeatureRole::SpecialFeaturePoint,
                FeatureRole::SurveyBoundary,
            ] {
                let path = unit.shapefile_path(role);
                if !path.is_file() {
                    continue;
                }
                let count = shp::shape_count(&path)?;
                if count == 0 {
                    warn!(
                        "skipping empty {} layer for {}",
                        role.label(),
                        unit.area_symbol
                    );
                    continue;
                }
                plan.add_source(
                    role,
                    FeatureSource {
                        area_symbol: unit.area_symbol.clone(),
                        path,
                    },
                    count,
                );
            }

            // In database mode the template database must exist up front;
            // finding out after hours of feature merging would waste the run.
            if mode == TabularMode::TemplateDatabase {
                let db_path = unit.template_db_path();
                if !db_path.is_file() {
                    return Err(ConvertError::MissingSource {
                        table: "tabular".to_string(),
                        path: db_path,
                    });
                }
            }
        }

        Ok(plan)
    }
}

/// The store file name must not carry dashes; downstream raster tooling
/// rejects them.
fn sanitized_output_path(path: &std::path::Path) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) if name.contains('-') => path.with_file_name(name.replace('-', "_")),
        _ => path.to_path_buf(),
    }
}

/// Query the merged survey catalog into the report list.
fn survey_report(store: &GeoStore) -> ConvertResult<Vec<String>> {
    let entries = store.catalog_entries(None)?;
    Ok(entries
        .into_iter()
        .map(|(symbol, saverest)| match saverest {
            Some(date) => {
                let day = date.split_whitespace().next().unwrap_or(&date).to_string();
                format!("{symbol} ({day})")
            }
            None => symbol,
        })
        .collect())
}
