// ==========================================
// gSSURGO Merge - Survey Unit Discovery
// ==========================================
// Input layout follows the NRCS geospatial standard:
//   soil_<areasymbol>/spatial/soilmu_a_<areasymbol>.shp ...
//   soil_<areasymbol>/tabular/*.txt | soil_d_<areasymbol>.sqlite
// ==========================================

use std::path::{Path, PathBuf};

use crate::domain::types::FeatureRole;
use crate::error::{ConvertError, ConvertResult};

/// One input soil-survey dataset for one geographic area.
///
/// Discovered from the input folder listing, consumed exactly once per
/// conversion run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyUnit {
    /// Unique short code, uppercase (e.g. `NE109`).
    pub area_symbol: String,
    /// The unit's `soil_<areasymbol>` folder.
    pub folder: PathBuf,
}

impl SurveyUnit {
    /// Build a unit from a `soil_<areasymbol>` folder. The area symbol is
    /// everything after the last underscore in the folder name.
    pub fn from_folder(folder: &Path) -> Option<SurveyUnit> {
        let name = folder.file_name()?.to_str()?;
        let idx = name.rfind('_')?;
        let symbol = &name[idx + 1..];
        if symbol.is_empty() {
            return None;
        }
        Some(SurveyUnit {
            area_symbol: symbol.to_uppercase(),
            folder: folder.to_path_buf(),
        })
    }

    pub fn spatial_folder(&self) -> PathBuf {
        self.folder.join("spatial")
    }

    pub fn tabular_folder(&self) -> PathBuf {
        self.folder.join("tabular")
    }

    /// Lowercase area symbol as used in file names.
    pub fn file_symbol(&self) -> String {
        self.area_symbol.to_lowercase()
    }

    /// Shapefile path for a feature role.
    pub fn shapefile_path(&self, role: FeatureRole) -> PathBuf {
        self.spatial_folder()
            .join(format!("{}_{}.shp", role.file_prefix(), self.file_symbol()))
    }

    /// STATSGO-style fallback name for the soil polygon layer.
    pub fn statsgo_polygon_path(&self) -> PathBuf {
        self.spatial_folder()
            .join(format!("gsmsoilmu_a_{}.shp", self.file_symbol()))
    }

    /// The soil polygon layer, preferring the SSURGO name and falling back
    /// to the STATSGO name. `None` when neither file exists.
    pub fn polygon_shapefile(&self) -> Option<PathBuf> {
        let ssurgo = self.shapefile_path(FeatureRole::MapunitPolygon);
        if ssurgo.is_file() {
            return Some(ssurgo);
        }
        let statsgo = self.statsgo_polygon_path();
        if statsgo.is_file() {
            return Some(statsgo);
        }
        None
    }

    /// Populated template database (`soil_d_<areasymbol>.sqlite`).
    pub fn template_db_path(&self) -> PathBuf {
        self.tabular_folder()
            .join(format!("soil_d_{}.sqlite", self.file_symbol()))
    }

    /// Version marker file for text-file tabular data.
    pub fn version_file_path(&self) -> PathBuf {
        self.tabular_folder().join("version.txt")
    }

    /// Optional feature description file (`spatial/soilsf_t_<areasymbol>.txt`).
    pub fn featdesc_path(&self) -> PathBuf {
        self.spatial_folder()
            .join(format!("soilsf_t_{}.txt", self.file_symbol()))
    }
}

/// Discover survey units under the input folder.
///
/// When `selected` is given, only those folder names are taken (missing ones
/// are an error); otherwise every `soil_*` directory is used. At least one
/// unit is required.
pub fn discover_units(
    input_folder: &Path,
    selected: Option<&[String]>,
) -> ConvertResult<Vec<SurveyUnit>> {
    let mut units = Vec::new();

    match selected {
        Some(names) => {
            for name in names {
                let folder = input_folder.join(name);
                if !folder.is_dir() {
                    return Err(ConvertError::Internal(format!(
                        "selected survey dataset not found: {}",
                        folder.display()
                    )));
                }
                if let Some(unit) = SurveyUnit::from_folder(&folder) {
                    units.push(unit);
                }
            }
        }
        None => {
            let mut folders: Vec<PathBuf> = std::fs::read_dir(input_folder)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.is_dir()
                        && p.file_name()
                            .and_then(|n| n.to_str())
                            .map(|n| n.starts_with("soil_"))
                            .unwrap_or(false)
                })
                .collect();
            folders.sort();

            for folder in folders {
                if let Some(unit) = SurveyUnit::from_folder(&folder) {
                    units.push(unit);
                }
            }
        }
    }

    if units.is_empty() {
        return Err(ConvertError::Internal(
            "at least one soil survey area input is required".to_string(),
        ));
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_symbol_from_folder_name() {
        let unit = SurveyUnit::from_folder(Path::new("/data/soil_ne109")).unwrap();
        assert_eq!(unit.area_symbol, "NE109");
        assert_eq!(unit.file_symbol(), "ne109");
    }

    #[test]
    fn test_shapefile_naming() {
        let unit = SurveyUnit::from_folder(Path::new("/data/soil_mh936")).unwrap();
        let shp = unit.shapefile_path(FeatureRole::MapunitPolygon);
        assert!(shp.ends_with("spatial/soilmu_a_mh936.shp"));
        let sa = unit.shapefile_path(FeatureRole::SurveyBoundary);
        assert!(sa.ends_with("spatial/soilsa_a_mh936.shp"));
    }

    #[test]
    fn test_folder_without_symbol_rejected() {
        assert!(SurveyUnit::from_folder(Path::new("/data/soil_")).is_none());
        assert!(SurveyUnit::from_folder(Path::new("/data/nounderscore")).is_none());
    }
}
