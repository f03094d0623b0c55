// ==========================================
// gSSURGO Merge - Spatial Data Layer
// ==========================================

pub mod merger;
pub mod shp;
pub mod sort;

pub use merger::{FeatureMerger, FeatureSource, MergePlan};
pub use shp::{polygon_layer_info, read_features, shape_count, LayerExtent, SpatialFeature};
pub use sort::{order_by_extent, sorted_area_symbols, symbols_from_boundary_layer, ExtentKey};
