//! tjs-ctags core library.
//!
//! This crate turns loosely-typed `tjs.ctagsProcess` settings into ctags
//! command lines and runs them, one independent process per entry.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Settings discovery and effective configuration resolution.
//! - `loader`: Normalization of raw process entries against the defaults.
//! - `command`: ctags command line construction.
//! - `runner`: Per-entry eligibility checks and fire-and-forget launches.
//! - `provider`: Long-lived holder mapping host events to runs.
//! - `models`: Process record schema and triggers.
//! - `error`: User-facing diagnostics.
//! - `report`: Diagnostic sinks.
//! - `output`: Human/JSON printers.
//! - `logging`: `tracing` subscriber setup.
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod output;
pub mod provider;
pub mod report;
pub mod runner;
