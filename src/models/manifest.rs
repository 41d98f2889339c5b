//! Manifest file model.

use crate::models::options::FixerOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub options: FixerOptions,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

/// One installed module and its raw declarations.
///
/// `directories` and `files` are kept as raw TOML so a wrongly shaped value
/// reaches the collector instead of failing the whole manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<toml::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<toml::Value>,
}
