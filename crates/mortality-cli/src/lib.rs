//! CLI library components for the mortality harmonizer.

pub mod commands;
pub mod logging;
pub mod report;
