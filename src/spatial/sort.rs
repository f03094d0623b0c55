// ==========================================
// gSSURGO Merge - Spatial Merge Order
// ==========================================
// Computes the deterministic draw/merge order for survey units from their
// polygon extents: ascending by rounded min-X, then a second independent
// stable pass descending by rounded max-Y, approximating a left-to-right,
// top-to-bottom sweep.
// ==========================================

use std::path::Path;

use tracing::info;

use crate::domain::survey::SurveyUnit;
use crate::domain::types::GeometryKind;
use crate::error::{ConvertError, ConvertResult};
use crate::spatial::shp;

/// One unit's sort key: upper-left extent corner rounded to one decimal of
/// the native coordinate system.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtentKey {
    pub area_symbol: String,
    pub x: f64,
    pub y: f64,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Order extent keys into the merge order. Stable on exact ties, so equal
/// keys keep their original relative order.
pub fn order_by_extent(mut keys: Vec<ExtentKey>) -> Vec<String> {
    keys.sort_by(|a, b| a.x.total_cmp(&b.x));
    keys.sort_by(|a, b| b.y.total_cmp(&a.y));
    keys.into_iter().map(|k| k.area_symbol).collect()
}

/// Compute the spatially sorted area-symbol order for a set of survey
/// units, reading each unit's soil polygon extent.
pub fn sorted_area_symbols(units: &[SurveyUnit]) -> ConvertResult<Vec<String>> {
    info!(
        "creating spatially sorted list for {} selected surveys",
        units.len()
    );

    let mut keys = Vec::with_capacity(units.len());

    for unit in units {
        let path = unit
            .polygon_shapefile()
            .ok_or_else(|| ConvertError::CorruptGeometry {
                area_symbol: unit.area_symbol.clone(),
                message: format!(
                    "missing soil polygon shapefile in {}",
                    unit.spatial_folder().display()
                ),
            })?;
        let (extent, _count) = shp::polygon_layer_info(&path, &unit.area_symbol)?;
        keys.push(ExtentKey {
            area_symbol: unit.area_symbol.clone(),
            x: round1(extent.min_x),
            y: round1(extent.max_y),
        });
    }

    // A shorter key list would mean a survey silently dropped from the
    // merge; that is a fatal consistency problem, not a warning.
    if keys.len() < units.len() {
        return Err(ConvertError::Internal(
            "problem with survey extent sort key".to_string(),
        ));
    }

    Ok(order_by_extent(keys))
}

/// Alternate ordering taken from a survey-boundary layer: polygons are
/// sorted upper-right first and their area symbols filtered to the
/// requested units.
pub fn symbols_from_boundary_layer(
    boundary_layer: &Path,
    units: &[SurveyUnit],
) -> ConvertResult<Vec<String>> {
    let known: Vec<String> = units.iter().map(|u| u.area_symbol.clone()).collect();
    let features = shp::read_features(boundary_layer, GeometryKind::Polygon)?;

    let mut keyed: Vec<(f64, f64, String)> = Vec::new();
    for feature in &features {
        let Some(crate::domain::value::CellValue::Text(symbol)) = feature.property("areasymbol")
        else {
            continue;
        };
        let Some((_, _, xmax, ymax)) = feature.bbox() else {
            continue;
        };
        keyed.push((ymax, xmax, symbol.to_uppercase()));
    }

    // Upper-right spatial sort: descending Y, then descending X.
    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut ordered = Vec::new();
    for (_, _, symbol) in keyed {
        if known.contains(&symbol) && !ordered.contains(&symbol) {
            ordered.push(symbol);
        }
    }

    if ordered.is_empty() {
        return Err(ConvertError::Internal(
            "failed to produce spatial sort on survey areas".to_string(),
        ));
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(symbol: &str, x: f64, y: f64) -> ExtentKey {
        ExtentKey {
            area_symbol: symbol.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn test_order_is_top_to_bottom_then_left_to_right() {
        let order = order_by_extent(vec![
            key("SE", 10.0, 1.0),
            key("NE", 10.0, 9.0),
            key("NW", 0.0, 9.0),
            key("SW", 0.0, 1.0),
        ]);
        assert_eq!(order, vec!["NW", "NE", "SW", "SE"]);
    }

    #[test]
    fn test_order_is_a_permutation() {
        let keys: Vec<ExtentKey> = (0..25)
            .map(|i| key(&format!("A{i:02}"), (i % 5) as f64, (i / 5) as f64))
            .collect();
        let order = order_by_extent(keys);
        assert_eq!(order.len(), 25);
        let mut sorted = order.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 25);
    }

    #[test]
    fn test_exact_ties_keep_input_order() {
        let order = order_by_extent(vec![
            key("FIRST", 3.0, 3.0),
            key("SECOND", 3.0, 3.0),
            key("THIRD", 3.0, 3.0),
        ]);
        assert_eq!(order, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_rounding_collapses_close_coordinates() {
        assert_eq!(round1(10.04), 10.0);
        assert_eq!(round1(10.06), 10.1);
        assert_eq!(round1(-0.04), -0.0);
    }
}
