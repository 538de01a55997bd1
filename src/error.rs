//! User-facing diagnostics.
//!
//! Every problem surfaces as one `Diagnostic`; none of them stops the
//! process. Messages keep the `tjs.ctagsProcess[i].field` addressing users
//! see in their settings.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Settings namespace and key the process list lives under.
pub const SETTINGS_KEY: &str = "tjs.ctagsProcess";

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Field present with the wrong kind; it was reset to the default.
    #[error("tjs.ctagsProcess[{index}].{field} has wrong value.")]
    ConfigTypeMismatch { index: usize, field: String },

    #[error("tjs.ctagsProcess has wrong value.")]
    MalformedConfigList,

    /// Entry is not a record; it was replaced by the default.
    #[error("tjs.ctagsProcess[{index}] has wrong value.")]
    MalformedEntry { index: usize },

    #[error("No project currently opened")]
    MissingWorkspace,

    #[error("tjs.ctagsProcess[{index}].{field} is empty.")]
    EmptyRequiredField { index: usize, field: String },

    /// Spawn error or unsuccessful exit of one entry's ctags run.
    #[error("ctags: {detail}")]
    ProcessFailure { index: usize, detail: String },

    #[error("Failed to read settings {}: {reason}", .path.display())]
    SettingsUnreadable { path: PathBuf, reason: String },
}

impl Diagnostic {
    /// Entry index the diagnostic refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Diagnostic::ConfigTypeMismatch { index, .. }
            | Diagnostic::MalformedEntry { index }
            | Diagnostic::EmptyRequiredField { index, .. }
            | Diagnostic::ProcessFailure { index, .. } => Some(*index),
            _ => None,
        }
    }
}
