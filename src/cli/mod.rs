//! CLI module for plantree.
//!
//! This module provides the command-line interface for visualizing
//! plan documents.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat, PlanArgs};
pub use output::OutputFormatter;
