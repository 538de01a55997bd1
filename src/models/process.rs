//! Process record schema.
//!
//! A `ProcessConfig` describes one ctags job. Wire keys are camelCase to
//! match the `tjs.ctagsProcess` settings entries. The recognized field set is
//! whatever the default record serializes to; each field's kind is taken from
//! the default's value.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One indexing job definition, complete after normalization.
pub struct ProcessConfig {
    /// Output tag file, relative to the workspace root.
    pub tag_file_path: String,
    /// Directory to scan, relative to the workspace root. Empty scans the root.
    pub search_path: String,
    pub search_recursive: bool,
    pub run_on_save: bool,
    /// Suffixes mapped to the dialect via `--langmap`.
    pub file_extensions: Vec<String>,
    /// Passed through to ctags verbatim.
    pub extra_option: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            tag_file_path: ".tags".to_string(),
            search_path: String::new(),
            search_recursive: true,
            run_on_save: false,
            file_extensions: vec![".tjs".to_string()],
            extra_option: String::new(),
        }
    }
}

/// Runtime kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Text,
    TextList,
}

impl FieldKind {
    /// Classify a loose value. Returns `None` for anything that is not one of
    /// the three recognized kinds (numbers, objects, null, mixed arrays).
    pub fn of(value: &Json) -> Option<FieldKind> {
        match value {
            Json::Bool(_) => Some(FieldKind::Bool),
            Json::String(_) => Some(FieldKind::Text),
            Json::Array(items) if items.iter().all(Json::is_string) => Some(FieldKind::TextList),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Bool => "boolean",
            FieldKind::Text => "string",
            FieldKind::TextList => "string[]",
        };
        f.write_str(s)
    }
}

impl ProcessConfig {
    /// The default record as a loose JSON object, keyed by wire name.
    pub fn default_record() -> serde_json::Map<String, Json> {
        match serde_json::to_value(ProcessConfig::default()) {
            Ok(Json::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// Recognized fields with their kinds, in declaration order.
    pub fn schema() -> Vec<(String, FieldKind)> {
        Self::default_record()
            .into_iter()
            .filter_map(|(key, value)| FieldKind::of(&value).map(|kind| (key, kind)))
            .collect()
    }

    /// `fileExtensions` joined for `--langmap`.
    pub fn langmap(&self) -> String {
        self.file_extensions.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Ordered set of normalized records. Diagnostics address entries by index.
pub struct ConfigSet(Vec<ProcessConfig>);

impl ConfigSet {
    pub fn new(entries: Vec<ProcessConfig>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProcessConfig> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessConfig> {
        self.0.iter()
    }
}

/// Used when no `ctagsProcess` list is configured at all.
impl Default for ConfigSet {
    fn default() -> Self {
        Self(vec![ProcessConfig::default()])
    }
}

impl<'a> IntoIterator for &'a ConfigSet {
    type Item = &'a ProcessConfig;
    type IntoIter = std::slice::Iter<'a, ProcessConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
