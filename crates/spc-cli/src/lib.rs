//! CLI library components for the SPC tool.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod values;
