// ==========================================
// gSSURGO Merge - Engine Layer
// ==========================================

pub mod orchestrator;

pub use orchestrator::{ConversionOrchestrator, ConversionResult};
