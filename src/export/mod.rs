//! Export module for the civil registry
//!
//! Full dumps of every person and record:
//! - JSON: machine-readable, optionally pretty-printed
//! - YAML: human-readable

pub mod json;
pub mod yaml;

pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
