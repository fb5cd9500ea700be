// Raw Source Map
//
// Raw source map data structure.

use crate::util::{relative_path, to_forward_slashes};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Raw source map (version 3). Fields this crate does not know about are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawSourceMap {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Point `sources` at exactly the original source, relative to the directory
/// the map now lives in, and name the emitted artifact in `file`.
pub fn relocate_source_map(
    text: &str,
    output_dir: &Path,
    source: &Path,
    artifact_name: &str,
) -> serde_json::Result<String> {
    let mut map = RawSourceMap::parse(text)?;
    map.sources = vec![to_forward_slashes(&relative_path(output_dir, source))];
    if let Some(contents) = map.sources_content.as_mut() {
        contents.truncate(1);
    }
    map.file = Some(artifact_name.to_string());
    map.to_json()
}
