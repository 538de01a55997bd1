//! Normalization of raw `tjs.ctagsProcess` settings into a `ConfigSet`.
//!
//! Each raw entry is merged against the default record field by field:
//! - absent fields take the default value;
//! - fields whose kind differs from the default's are reported and reset;
//! - everything else is kept.
//!
//! Entries are never dropped or reordered. Only the default record's keys are
//! recognized; other keys are ignored.

use crate::error::Diagnostic;
use crate::models::{ConfigSet, FieldKind, ProcessConfig};
use crate::report::Reporter;
use serde_json::{Map, Value as Json};

/// Normalize raw settings. `None` means no list was configured at all.
pub fn normalize(raw: Option<&Json>, reporter: &dyn Reporter) -> ConfigSet {
    let Some(raw) = raw else {
        tracing::debug!("[loader] no ctagsProcess configured; using default entry");
        return ConfigSet::default();
    };
    let Json::Array(entries) = raw else {
        reporter.report(Diagnostic::MalformedConfigList);
        return ConfigSet::default();
    };

    let defaults = ProcessConfig::default_record();
    let schema = ProcessConfig::schema();
    let normalized = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(index, entry, &defaults, &schema, reporter))
        .collect();
    ConfigSet::new(normalized)
}

fn normalize_entry(
    index: usize,
    entry: &Json,
    defaults: &Map<String, Json>,
    schema: &[(String, FieldKind)],
    reporter: &dyn Reporter,
) -> ProcessConfig {
    let Json::Object(fields) = entry else {
        reporter.report(Diagnostic::MalformedEntry { index });
        return ProcessConfig::default();
    };

    let mut merged = Map::new();
    for (key, kind) in schema {
        let value = match fields.get(key) {
            None => defaults[key].clone(),
            Some(v) if FieldKind::of(v) == Some(*kind) => v.clone(),
            Some(_) => {
                reporter.report(Diagnostic::ConfigTypeMismatch {
                    index,
                    field: key.clone(),
                });
                defaults[key].clone()
            }
        };
        merged.insert(key.clone(), value);
    }
    for key in fields.keys().filter(|k| !defaults.contains_key(*k)) {
        tracing::debug!("[loader] ignoring unknown key tjs.ctagsProcess[{index}].{key}");
    }

    // Every field now has the default's kind, so this cannot fail.
    serde_json::from_value(Json::Object(merged)).unwrap_or_default()
}
