//! Settings discovery and effective configuration resolution.
//!
//! tjs-ctags reads `tjs-ctags.toml|yaml|yml` from the workspace root (or the
//! closest ancestor), falling back to `.vscode/settings.json`. The process
//! list is kept loose (`serde_json::Value`) and normalized by the loader.
//!
//! Defaults:
//! - `tjs.ctagsProcess`: absent (one default entry)
//! - `logging.level`: `warn`
//! - `output`: `human`
//!
//! Overrides precedence: CLI > settings file > defaults.

use crate::error::{Diagnostic, SETTINGS_KEY};
use serde::Deserialize;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILES: [&str; 3] = ["tjs-ctags.toml", "tjs-ctags.yaml", "tjs-ctags.yml"];
const VSCODE_SETTINGS: &str = ".vscode/settings.json";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
/// Logging section under `[logging]`.
pub struct LoggingCfg {
    pub level: String,
}

impl Default for LoggingCfg {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone)]
/// Settings read from disk, before normalization.
pub struct Settings {
    /// File the settings came from.
    pub source: Option<PathBuf>,
    /// Raw `tjs.ctagsProcess` value; `None` when not configured.
    pub ctags_process: Option<Json>,
    pub logging: LoggingCfg,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    /// `None` when no project could be located.
    pub workspace_root: Option<PathBuf>,
    pub settings: Settings,
    pub output: String,
}

fn has_marker(dir: &Path) -> bool {
    SETTINGS_FILES.iter().any(|f| dir.join(f).exists())
        || dir.join(VSCODE_SETTINGS).exists()
        || dir.join(".git").exists()
}

/// Walk upward from `start` to detect the workspace root.
///
/// Stops at the first directory holding a settings file or a `.git`
/// directory. Returns `None` when no ancestor qualifies.
pub fn detect_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| has_marker(dir))
        .map(Path::to_path_buf)
}

/// Find `tjs.ctagsProcess` in a parsed settings document. Accepts both the
/// nested form and the flat dotted key used by editor settings files.
fn extract_process_list(doc: &Json) -> Option<Json> {
    doc.get(SETTINGS_KEY)
        .or_else(|| doc.pointer("/tjs/ctagsProcess"))
        .cloned()
}

fn parse_settings(path: &Path, text: &str) -> Result<Json, String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "toml" => toml::from_str::<Json>(text).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str::<Json>(text).map_err(|e| e.to_string()),
        _ => serde_json::from_str::<Json>(text).map_err(|e| e.to_string()),
    }
}

/// Locate the settings file under `root`, preferring `tjs-ctags.*`.
pub fn settings_path(root: &Path) -> Option<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|f| root.join(f))
        .chain(std::iter::once(root.join(VSCODE_SETTINGS)))
        .find(|p| p.is_file())
}

/// Load settings from `root`.
///
/// `Ok(None)` when no settings file exists. A file that cannot be read or
/// parsed yields `SettingsUnreadable`; callers treat that as absent settings.
pub fn load_settings(root: &Path) -> Result<Option<Settings>, Diagnostic> {
    let Some(path) = settings_path(root) else {
        return Ok(None);
    };
    let unreadable = |reason: String| Diagnostic::SettingsUnreadable {
        path: path.clone(),
        reason,
    };
    let text = fs::read_to_string(&path).map_err(|e| unreadable(e.to_string()))?;
    let doc = parse_settings(&path, &text).map_err(unreadable)?;
    let logging = doc
        .get("logging")
        .cloned()
        .map(serde_json::from_value::<LoggingCfg>)
        .transpose()
        .map_err(|e| unreadable(e.to_string()))?
        .unwrap_or_default();
    let output = doc.get("output").and_then(Json::as_str).map(str::to_string);
    tracing::debug!("[config] loaded settings from {}", path.display());
    Ok(Some(Settings {
        ctags_process: extract_process_list(&doc),
        logging,
        output,
        source: Some(path),
    }))
}

/// Resolve `Effective` by merging CLI flags, discovered settings, and defaults.
///
/// Settings problems are returned alongside so the caller can report them
/// once a reporter exists.
pub fn resolve_effective(
    cli_workspace_root: Option<&str>,
    cli_output: Option<&str>,
) -> (Effective, Option<Diagnostic>) {
    let workspace_root = match cli_workspace_root {
        Some(dir) => Some(PathBuf::from(dir)),
        None => std::env::current_dir()
            .ok()
            .and_then(|cwd| detect_workspace_root(&cwd)),
    };
    let (settings, problem) = match workspace_root.as_deref().map(load_settings) {
        Some(Ok(Some(s))) => (s, None),
        Some(Err(d)) => (Settings::default(), Some(d)),
        _ => (Settings::default(), None),
    };
    let output = cli_output
        .map(str::to_string)
        .or_else(|| settings.output.clone())
        .unwrap_or_else(|| "human".to_string());
    (
        Effective {
            workspace_root,
            settings,
            output,
        },
        problem,
    )
}
