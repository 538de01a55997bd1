//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tjs-ctags",
    version,
    about = "Generate ctags tag files for TJS projects",
    long_about = "tjs-ctags — builds and runs one ctags invocation per tjs.ctagsProcess entry.\n\nConfiguration precedence: CLI > tjs-ctags.toml|yaml / .vscode/settings.json > defaults.",
    after_help = "Examples:\n  tjs-ctags update\n  tjs-ctags save src/main.tjs\n  tjs-ctags print --on-save --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tjs-ctags version.")]
    Version,
    /// Run every configured ctags process
    #[command(
        about = "Regenerate tag files",
        long_about = "Run ctags for every tjs.ctagsProcess entry, regardless of runOnSave.",
        after_help = "Examples:\n  tjs-ctags update\n  tjs-ctags update --workspace-root ../game --output json"
    )]
    Update {
        #[arg(long, help = "Workspace root (default: detected from current dir)")]
        workspace_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Handle a saved file
    #[command(
        about = "Run on-save processes for a saved file",
        long_about = "Run ctags for entries with runOnSave = true, but only when the saved file is a tjs document.",
        after_help = "Examples:\n  tjs-ctags save src/main.tjs\n  tjs-ctags save notes.txt --language-id tjs"
    )]
    Save {
        #[arg(help = "Path of the saved file")]
        file: String,
        #[arg(long, help = "Language id of the saved document (default: from file extension)")]
        language_id: Option<String>,
        #[arg(long, help = "Workspace root (default: detected from current dir)")]
        workspace_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Show the commands that would run
    #[command(
        about = "Print ctags commands without running them",
        long_about = "Normalize settings and print each entry's command, or why it would be skipped."
    )]
    Print {
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Evaluate as a save trigger instead of a manual run")]
        on_save: bool,
        #[arg(long, help = "Workspace root (default: detected from current dir)")]
        workspace_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
