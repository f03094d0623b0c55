// ==========================================
// gSSURGO Merge - Shapefile Access
// ==========================================
// Reads survey unit shapefiles into geometry + attribute features. The
// store side never sees shapefile types; everything is converted to geo
// geometries and plain cell values here.
// ==========================================

use std::collections::HashMap;
use std::path::Path;

use geo::BoundingRect;
use shapefile::dbase::FieldValue;

use crate::domain::types::GeometryKind;
use crate::domain::value::CellValue;
use crate::error::{ConvertError, ConvertResult};

/// Upper-left corner of a layer's extent, the merge-order sort key input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerExtent {
    pub min_x: f64,
    pub max_y: f64,
}

/// One feature read from a shapefile: geometry plus attribute values keyed
/// by lowercased field name.
#[derive(Debug, Clone)]
pub struct SpatialFeature {
    pub geometry: geo::Geometry<f64>,
    pub properties: HashMap<String, CellValue>,
}

impl SpatialFeature {
    pub fn property(&self, name: &str) -> Option<&CellValue> {
        self.properties.get(&name.to_lowercase())
    }

    /// Bounding box as (xmin, ymin, xmax, ymax), if the geometry is
    /// non-empty.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let rect = self.geometry.bounding_rect()?;
        Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}

/// Extent and feature count of a soil polygon layer.
///
/// Fails with `CorruptGeometry` when the file cannot be read, holds no
/// features, or reports a non-finite extent.
pub fn polygon_layer_info(path: &Path, area_symbol: &str) -> ConvertResult<(LayerExtent, usize)> {
    let corrupt = |message: String| ConvertError::CorruptGeometry {
        area_symbol: area_symbol.to_uppercase(),
        message,
    };

    let mut reader = shapefile::ShapeReader::from_path(path)
        .map_err(|e| corrupt(format!("{}: {}", path.display(), e)))?;

    let extent = {
        let header = reader.header();
        LayerExtent {
            min_x: header.bbox.min.x,
            max_y: header.bbox.max.y,
        }
    };

    let mut count = 0usize;
    for shape in reader.iter_shapes() {
        shape.map_err(|e| corrupt(format!("{}: {}", path.display(), e)))?;
        count += 1;
    }

    if count == 0 {
        return Err(corrupt(format!("no features found in {}", path.display())));
    }
    if !extent.min_x.is_finite() || !extent.max_y.is_finite() {
        return Err(corrupt(format!(
            "extent could not be computed for {}",
            path.display()
        )));
    }

    Ok((extent, count))
}

/// Feature count of any layer shapefile.
pub fn shape_count(path: &Path) -> ConvertResult<usize> {
    let mut reader = shapefile::ShapeReader::from_path(path)?;
    let mut count = 0usize;
    for shape in reader.iter_shapes() {
        shape?;
        count += 1;
    }
    Ok(count)
}

/// Read a layer's features with their attribute records.
pub fn read_features(path: &Path, kind: GeometryKind) -> ConvertResult<Vec<SpatialFeature>> {
    match kind {
        GeometryKind::Polygon => {
            let pairs = shapefile::read_as::<_, shapefile::Polygon, shapefile::dbase::Record>(path)?;
            pairs
                .into_iter()
                .map(|(shape, record)| {
                    let geometry: geo::MultiPolygon<f64> = shape
                        .try_into()
                        .map_err(|_| geometry_error(path, "polygon"))?;
                    Ok(feature(geo::Geometry::MultiPolygon(geometry), record))
                })
                .collect()
        }
        GeometryKind::Line => {
            let pairs =
                shapefile::read_as::<_, shapefile::Polyline, shapefile::dbase::Record>(path)?;
            pairs
                .into_iter()
                .map(|(shape, record)| {
                    let geometry: geo::MultiLineString<f64> = shape
                        .try_into()
                        .map_err(|_| geometry_error(path, "polyline"))?;
                    Ok(feature(geo::Geometry::MultiLineString(geometry), record))
                })
                .collect()
        }
        GeometryKind::Point => {
            let pairs = shapefile::read_as::<_, shapefile::Point, shapefile::dbase::Record>(path)?;
            Ok(pairs
                .into_iter()
                .map(|(shape, record)| {
                    let point: geo::Point<f64> = shape.into();
                    feature(geo::Geometry::Point(point), record)
                })
                .collect())
        }
    }
}

fn geometry_error(path: &Path, kind: &str) -> ConvertError {
    ConvertError::Internal(format!(
        "unrepresentable {kind} geometry in {}",
        path.display()
    ))
}

fn feature(geometry: geo::Geometry<f64>, record: shapefile::dbase::Record) -> SpatialFeature {
    let mut properties = HashMap::new();
    for (name, value) in record {
        properties.insert(name.to_lowercase(), field_value_to_cell(value));
    }
    SpatialFeature {
        geometry,
        properties,
    }
}

fn field_value_to_cell(value: FieldValue) -> CellValue {
    match value {
        FieldValue::Character(Some(s)) => {
            let trimmed = s.trim().to_string();
            if trimmed.is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(trimmed)
            }
        }
        FieldValue::Character(None) => CellValue::Null,
        FieldValue::Numeric(Some(n)) => CellValue::Real(n),
        FieldValue::Numeric(None) => CellValue::Null,
        FieldValue::Float(Some(f)) => CellValue::Real(f as f64),
        FieldValue::Float(None) => CellValue::Null,
        FieldValue::Integer(i) => CellValue::Int(i as i64),
        FieldValue::Double(d) => CellValue::Real(d),
        FieldValue::Currency(c) => CellValue::Real(c),
        FieldValue::Logical(Some(b)) => CellValue::Text(if b { "T" } else { "F" }.to_string()),
        FieldValue::Logical(None) => CellValue::Null,
        FieldValue::Date(Some(d)) => {
            CellValue::Text(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
        }
        FieldValue::Date(None) => CellValue::Null,
        FieldValue::Memo(s) => CellValue::Text(s),
        _ => CellValue::Null,
    }
}
