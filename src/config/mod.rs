// ==========================================
// gSSURGO Merge - Conversion Options
// ==========================================

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::types::Region;
use crate::error::{ConvertError, ConvertResult};
use crate::importer::source::TabularMode;

/// Parameters of one conversion run, as passed on the tool surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Folder holding the `soil_<areasymbol>` survey datasets.
    pub input_folder: PathBuf,
    /// Selected survey dataset folder names; `None` takes every `soil_*`
    /// folder under the input folder.
    pub surveys: Option<Vec<String>>,
    /// Optional survey-boundary layer that pre-determines the merge order.
    pub boundary_layer: Option<PathBuf>,
    /// Output store path.
    pub output_path: PathBuf,
    /// Geographic region, selecting the schema template.
    pub region: Region,
    /// Suffix for feature-layer display aliases; empty disables aliasing.
    #[serde(default)]
    pub alias_suffix: String,
    /// Read tabular data from text files rather than template databases.
    #[serde(default = "default_true")]
    pub use_text_files: bool,
}

fn default_true() -> bool {
    true
}

impl ConversionOptions {
    pub fn mode(&self) -> TabularMode {
        if self.use_text_files {
            TabularMode::TextFiles
        } else {
            TabularMode::TemplateDatabase
        }
    }

    pub fn validate(&self) -> ConvertResult<()> {
        if !self.input_folder.is_dir() {
            return Err(ConvertError::Internal(format!(
                "input folder does not exist: {}",
                self.input_folder.display()
            )));
        }
        if let Some(surveys) = &self.surveys {
            if surveys.is_empty() {
                return Err(ConvertError::Internal(
                    "at least one soil survey area input is required".to_string(),
                ));
            }
        }
        if let Some(layer) = &self.boundary_layer {
            if !layer.is_file() {
                return Err(ConvertError::Internal(format!(
                    "survey boundary layer not found: {}",
                    layer.display()
                )));
            }
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConvertError::Internal(
                "output store path is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default workspace folder in the user's profile, used when no output
/// path is given on the command line.
pub fn default_workspace_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gSSURGO")
        .join("Workspace")
}
