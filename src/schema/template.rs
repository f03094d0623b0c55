// ==========================================
// gSSURGO Merge - Region Schema Templates
// ==========================================
// One structural template per region x projection x datum-transform
// combination. The table layout is identical across templates; what varies
// is the output coordinate system and the geographic transformation applied
// when appending spatial data.
// ==========================================

use crate::domain::types::Region;

/// Datum transformation applied when appending spatial data. WSS downloads
/// are GCS WGS 1984; NAD 1983 outputs need the ITRF00 transform.
pub const ITRF00_TRANSFORM: &str = "WGS_1984_(ITRF00)_To_NAD_1983";

/// Structural template identifier, one per distinct output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    ConusAlbersNad83,
    HawaiiAlbersWgs84,
    AlaskaAlbersWgs84,
    PacBasinAlbersWgs84,
    GeographicWgs84,
    GcsWgs84,
}

impl TemplateId {
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::ConusAlbersNad83 => "gSSURGO_CONUS_AlbersNAD1983",
            TemplateId::HawaiiAlbersWgs84 => "gSSURGO_Hawaii_AlbersWGS1984",
            TemplateId::AlaskaAlbersWgs84 => "gSSURGO_Alaska_AlbersWGS1984",
            TemplateId::PacBasinAlbersWgs84 => "gSSURGO_PACBasin_AlbersWGS1984",
            TemplateId::GeographicWgs84 => "gSSURGO_Geographic_WGS1984",
            TemplateId::GcsWgs84 => "gSSURGO_GCS_WGS1984",
        }
    }
}

/// A resolved schema template: structure id plus the datum transform for
/// the region it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaTemplate {
    pub id: TemplateId,
    pub datum_transform: Option<&'static str>,
}

impl SchemaTemplate {
    /// Select the template for a geographic region.
    pub fn for_region(region: Region) -> SchemaTemplate {
        match region {
            Region::Lower48 | Region::PuertoRicoUsvi => SchemaTemplate {
                id: TemplateId::ConusAlbersNad83,
                datum_transform: Some(ITRF00_TRANSFORM),
            },
            Region::Hawaii | Region::AmericanSamoa => SchemaTemplate {
                id: TemplateId::HawaiiAlbersWgs84,
                datum_transform: None,
            },
            Region::Alaska => SchemaTemplate {
                id: TemplateId::AlaskaAlbersWgs84,
                datum_transform: None,
            },
            Region::PacificIslands => SchemaTemplate {
                id: TemplateId::PacBasinAlbersWgs84,
                datum_transform: None,
            },
            Region::World => SchemaTemplate {
                id: TemplateId::GeographicWgs84,
                datum_transform: None,
            },
            Region::Unspecified => SchemaTemplate {
                id: TemplateId::GcsWgs84,
                datum_transform: None,
            },
        }
    }
}
