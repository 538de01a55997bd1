//! Long-lived entry point for hosts.
//!
//! Holds the current `ConfigSet` and maps host events onto runner calls:
//! a manual update, a save of a document with a language id, and a
//! settings change. Reloads replace the set wholesale.

use crate::command::LANGUAGE;
use crate::loader;
use crate::models::{ConfigSet, Trigger};
use crate::report::Reporter;
use crate::runner::{self, Launcher};
use serde_json::Value as Json;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct CtagsProvider {
    configs: Arc<ConfigSet>,
    launcher: Box<dyn Launcher>,
    reporter: Arc<dyn Reporter>,
}

impl CtagsProvider {
    /// Build a provider and load `raw` immediately.
    pub fn new(raw: Option<&Json>, launcher: Box<dyn Launcher>, reporter: Arc<dyn Reporter>) -> Self {
        let configs = Arc::new(loader::normalize(raw, reporter.as_ref()));
        Self {
            configs,
            launcher,
            reporter,
        }
    }

    pub fn configs(&self) -> Arc<ConfigSet> {
        Arc::clone(&self.configs)
    }

    /// Settings changed: normalize again and swap in the new set.
    pub fn reload(&mut self, raw: Option<&Json>) {
        self.configs = Arc::new(loader::normalize(raw, self.reporter.as_ref()));
        tracing::debug!("[provider] reloaded {} ctags process entries", self.configs.len());
    }

    pub fn update_ctags(&self, trigger: Trigger, workspace_root: Option<&Path>) -> Vec<JoinHandle<()>> {
        runner::run(
            &self.configs,
            trigger,
            workspace_root,
            self.launcher.as_ref(),
            Arc::clone(&self.reporter),
        )
    }

    /// A document was saved. Only documents of the tjs language run.
    pub fn on_save(&self, language_id: &str, workspace_root: Option<&Path>) -> Vec<JoinHandle<()>> {
        if language_id != LANGUAGE {
            tracing::debug!("[provider] ignoring save of {language_id} document");
            return Vec::new();
        }
        self.update_ctags(Trigger::OnSave, workspace_root)
    }
}

/// Language id for a saved file: `tjs` for `.tjs` files, `plaintext`
/// otherwise.
pub fn language_id_for(path: &Path) -> String {
    let is_tjs = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LANGUAGE));
    if is_tjs { LANGUAGE } else { "plaintext" }.to_string()
}
