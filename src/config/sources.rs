//! File sources for configuration.

pub mod global_file;
pub mod workspace_file;
