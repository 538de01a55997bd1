//! Shared data models: process records, field schema, and triggers.

pub mod process;

pub use process::{ConfigSet, FieldKind, ProcessConfig};

/// What caused a run: an explicit user request or a save of a dialect file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Manual,
    OnSave,
}
