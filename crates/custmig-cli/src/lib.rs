//! CLI components for the customer migration.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
