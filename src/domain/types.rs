// ==========================================
// gSSURGO Merge - Core Domain Types
// ==========================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// SSURGO schema version supported by this tool and its store templates.
pub const SSURGO_VERSION: i32 = 2;

/// Minimum table count expected in a freshly created store.
pub const MIN_STORE_TABLES: usize = 50;

/// Geographic region a store is built for. Selects the schema template and
/// the datum transformation applied when appending spatial data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Lower48,
    Hawaii,
    AmericanSamoa,
    Alaska,
    PuertoRicoUsvi,
    PacificIslands,
    World,
    /// No region specified; geographic WGS 1984, no transform.
    Unspecified,
}

impl Region {
    /// Parse the region names used on the tool-parameter surface.
    pub fn parse(name: &str) -> Region {
        match name.trim() {
            "Lower 48 States" => Region::Lower48,
            "Hawaii" => Region::Hawaii,
            "American Samoa" => Region::AmericanSamoa,
            "Alaska" => Region::Alaska,
            "Puerto Rico and U.S. Virgin Islands" => Region::PuertoRicoUsvi,
            "Pacific Islands Area" => Region::PacificIslands,
            "World" => Region::World,
            _ => Region::Unspecified,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Lower48 => "Lower 48 States",
            Region::Hawaii => "Hawaii",
            Region::AmericanSamoa => "American Samoa",
            Region::Alaska => "Alaska",
            Region::PuertoRicoUsvi => "Puerto Rico and U.S. Virgin Islands",
            Region::PacificIslands => "Pacific Islands Area",
            Region::World => "World",
            Region::Unspecified => "Unspecified",
        };
        f.write_str(name)
    }
}

/// The six feature-table roles of the consolidated store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureRole {
    MapunitPolygon,
    MapunitLine,
    MapunitPoint,
    SpecialFeatureLine,
    SpecialFeaturePoint,
    SurveyBoundary,
}

impl FeatureRole {
    pub const ALL: [FeatureRole; 6] = [
        FeatureRole::MapunitPolygon,
        FeatureRole::MapunitLine,
        FeatureRole::MapunitPoint,
        FeatureRole::SpecialFeatureLine,
        FeatureRole::SpecialFeaturePoint,
        FeatureRole::SurveyBoundary,
    ];

    /// Physical feature table name in the store.
    pub fn table_name(self) -> &'static str {
        match self {
            FeatureRole::MapunitPolygon => "mupolygon",
            FeatureRole::MapunitLine => "muline",
            FeatureRole::MapunitPoint => "mupoint",
            FeatureRole::SpecialFeatureLine => "featline",
            FeatureRole::SpecialFeaturePoint => "featpoint",
            FeatureRole::SurveyBoundary => "sapolygon",
        }
    }

    /// Display label used when aliasing feature layers.
    pub fn label(self) -> &'static str {
        match self {
            FeatureRole::MapunitPolygon => "Map Unit Polygons",
            FeatureRole::MapunitLine => "Map Unit Lines",
            FeatureRole::MapunitPoint => "Map Unit Points",
            FeatureRole::SpecialFeatureLine => "Special Feature Lines",
            FeatureRole::SpecialFeaturePoint => "Special Feature Points",
            FeatureRole::SurveyBoundary => "Survey Boundaries",
        }
    }

    /// Shapefile name prefix inside a survey unit's spatial folder.
    /// The full name is `<prefix>_<areasymbol>.shp`.
    pub fn file_prefix(self) -> &'static str {
        match self {
            FeatureRole::MapunitPolygon => "soilmu_a",
            FeatureRole::MapunitLine => "soilmu_l",
            FeatureRole::MapunitPoint => "soilmu_p",
            FeatureRole::SpecialFeatureLine => "soilsf_l",
            FeatureRole::SpecialFeaturePoint => "soilsf_p",
            FeatureRole::SurveyBoundary => "soilsa_a",
        }
    }

    /// Geometry class stored in this role's table.
    pub fn geometry_kind(self) -> GeometryKind {
        match self {
            FeatureRole::MapunitPolygon | FeatureRole::SurveyBoundary => GeometryKind::Polygon,
            FeatureRole::MapunitLine | FeatureRole::SpecialFeatureLine => GeometryKind::Line,
            FeatureRole::MapunitPoint | FeatureRole::SpecialFeaturePoint => GeometryKind::Point,
        }
    }
}

/// Geometry class of a feature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    Line,
    Point,
}
