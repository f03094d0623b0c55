// ==========================================
// gSSURGO Merge - Feature Merger
// ==========================================
// Concatenates per-unit feature collections into the store's six feature
// tables. Attribute mapping is by field name, never positional, so source
// shapefiles with extra or renamed columns still append cleanly. After
// each role the target count must equal the accumulated source count
// exactly.
// ==========================================

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::info;
use wkt::ToWkt;

use crate::domain::types::FeatureRole;
use crate::domain::value::CellValue;
use crate::error::{ConvertError, ConvertResult};
use crate::repository::GeoStore;
use crate::schema::tables;
use crate::spatial::shp;

/// One shapefile to append into a feature table.
#[derive(Debug, Clone)]
pub struct FeatureSource {
    pub area_symbol: String,
    pub path: PathBuf,
}

/// Per-role source lists with the expected feature counts, accumulated
/// during the input scan.
#[derive(Debug, Default)]
pub struct MergePlan {
    sources: HashMap<FeatureRole, Vec<FeatureSource>>,
    expected: HashMap<FeatureRole, i64>,
}

impl MergePlan {
    pub fn new() -> MergePlan {
        MergePlan::default()
    }

    /// Register a source shapefile and its feature count for a role.
    /// A path already on the role's list is ignored.
    pub fn add_source(&mut self, role: FeatureRole, source: FeatureSource, count: usize) {
        let list = self.sources.entry(role).or_default();
        if list.iter().any(|s| s.path == source.path) {
            return;
        }
        list.push(source);
        *self.expected.entry(role).or_insert(0) += count as i64;
    }

    pub fn sources(&self, role: FeatureRole) -> &[FeatureSource] {
        self.sources.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn expected(&self, role: FeatureRole) -> i64 {
        self.expected.get(&role).copied().unwrap_or(0)
    }
}

/// Appends per-unit feature collections into the store.
pub struct FeatureMerger<'a> {
    store: &'a GeoStore,
}

impl<'a> FeatureMerger<'a> {
    pub fn new(store: &'a GeoStore) -> FeatureMerger<'a> {
        FeatureMerger { store }
    }

    /// Merge every role with a non-empty source list, verify count
    /// conservation, and build the spatial and attribute indexes.
    pub fn merge(&self, plan: &MergePlan) -> ConvertResult<()> {
        info!("importing spatial data");

        for role in FeatureRole::ALL {
            let sources = plan.sources(role);
            if sources.is_empty() {
                continue;
            }

            let table = role.table_name();
            info!(
                "appending {} {} shapefiles into featureclass {}",
                sources.len(),
                role.label(),
                table
            );

            for source in sources {
                self.append_source(role, source)?;
            }

            let actual = self.store.count_rows(table)?;
            let expected = plan.expected(role);
            if actual != expected {
                return Err(ConvertError::FeatureCountMismatch {
                    role: table,
                    expected,
                    actual,
                });
            }

            self.store.create_spatial_index(table)?;
            if let Some(index_name) = areasymbol_index_name(role) {
                self.store.create_index(table, "areasymbol", index_name)?;
            }
        }

        Ok(())
    }

    fn append_source(&self, role: FeatureRole, source: &FeatureSource) -> ConvertResult<()> {
        let table = role.table_name();
        let attr_columns = tables::feature_attribute_columns(role);

        let mut fields: Vec<String> = vec![
            "shape".to_string(),
            "xmin".to_string(),
            "ymin".to_string(),
            "xmax".to_string(),
            "ymax".to_string(),
        ];
        fields.extend(attr_columns.iter().map(|c| c.name.to_string()));

        let features = shp::read_features(&source.path, role.geometry_kind())?;

        for feature in features {
            let mut values: Vec<CellValue> =
                vec![CellValue::Text(feature.geometry.wkt_string())];
            match feature.bbox() {
                Some((xmin, ymin, xmax, ymax)) => {
                    values.push(CellValue::Real(xmin));
                    values.push(CellValue::Real(ymin));
                    values.push(CellValue::Real(xmax));
                    values.push(CellValue::Real(ymax));
                }
                None => values.extend(std::iter::repeat(CellValue::Null).take(4)),
            }
            // Field-name mapping: target columns the source lacks get null,
            // extra source columns are dropped.
            for col in attr_columns {
                values.push(feature.property(col.name).cloned().unwrap_or(CellValue::Null));
            }
            self.store.insert_row(table, &fields, &values)?;
        }

        Ok(())
    }
}

fn areasymbol_index_name(role: FeatureRole) -> Option<&'static str> {
    match role {
        FeatureRole::MapunitPolygon => Some("Indx_MupolyAreasymbol"),
        FeatureRole::MapunitLine => Some("Indx_MulineAreasymbol"),
        FeatureRole::MapunitPoint => Some("Indx_MupointAreasymbol"),
        FeatureRole::SpecialFeatureLine => Some("Indx_SFLineAreasymbol"),
        FeatureRole::SpecialFeaturePoint => Some("Indx_SFPointAreasymbol"),
        // The survey boundary layer only carries geometry; it gets the
        // spatial index alone.
        FeatureRole::SurveyBoundary => None,
    }
}
