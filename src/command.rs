//! ctags command line construction.
//!
//! The dialect is declared with `--langdef=tjs` and mapped onto the entry's
//! file extensions. Tags are extracted with line-anchored regex rules, one
//! per declaration form. Paths are composed as `<root><sep><relative>` and
//! double-quoted for the platform shell.

use crate::models::ProcessConfig;
use std::path::{Path, MAIN_SEPARATOR};

/// Indexer binary invoked through the shell.
pub const CTAGS_BIN: &str = "ctags";

/// Language name declared to ctags. Also the editor language id that enables
/// on-save runs.
pub const LANGUAGE: &str = "tjs";

/// Tag extraction rules: (pattern, kind letter, kind name).
pub const REGEX_RULES: [(&str, char, &str); 7] = [
    (r"^[ \t]*class[ \t]+([a-zA-Z0-9_]+)", 'c', "class"),
    (r"^[ \t]*function[ \t]+([a-zA-Z0-9_]+)", 'f', "function"),
    (r"^[ \t]*property[ \t]+([a-zA-Z0-9_]+)", 'p', "property"),
    (r"^[ \t]*var[ \t]+([a-zA-Z0-9_]+)", 'v', "value"),
    (r"^[ \t]*const[ \t]+([a-zA-Z0-9_]+)", 'v', "value"),
    (r"^[ \t]*([a-zA-Z0-9_]+)[ \t]*:[ \t]*function", 'f', "function"),
    (r"([a-zA-Z0-9_]+)[ \t]*=[ \t]*function", 'f', "function"),
];

/// Compose `<root><sep><rel>`, trimming trailing separators from the root.
pub fn join_root(root: &Path, rel: &str) -> String {
    let root = root.to_string_lossy();
    let trimmed = root.trim_end_matches(['/', '\\']);
    format!("{}{}{}", trimmed, MAIN_SEPARATOR, rel)
}

fn regex_arg(pattern: &str, letter: char, kind: &str) -> String {
    format!("--regex-{LANGUAGE}=\"/{pattern}/\\1/{letter},{kind}/\"")
}

/// Build the full shell command line for one entry.
///
/// Callers are expected to have rejected entries with an empty
/// `tagFilePath` or `fileExtensions` already.
pub fn build_command(cfg: &ProcessConfig, root: &Path) -> String {
    let mut parts: Vec<String> = vec![
        CTAGS_BIN.to_string(),
        format!("--langdef={LANGUAGE}"),
        format!("--langmap={LANGUAGE}:{}", cfg.langmap()),
    ];
    parts.extend(
        REGEX_RULES
            .iter()
            .map(|(pattern, letter, kind)| regex_arg(pattern, *letter, kind)),
    );
    if !cfg.extra_option.trim().is_empty() {
        parts.push(cfg.extra_option.clone());
    }
    parts.push("-f".to_string());
    parts.push(format!("\"{}\"", join_root(root, &cfg.tag_file_path)));
    if cfg.search_recursive {
        parts.push("-R".to_string());
    }
    parts.push(format!("\"{}*\"", join_root(root, &cfg.search_path)));
    parts.join(" ")
}
