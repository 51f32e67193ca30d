//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// plantree - Terraform/OpenTofu plan visualizer.
#[derive(Parser, Debug)]
#[command(name = "plantree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "PLANTREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show resource and output changes grouped by category.
    Summary(PlanArgs),

    /// Show resource changes as an address tree.
    Tree(PlanArgs),

    /// Show the summary followed by the address tree.
    Show(PlanArgs),

    /// Write a default configuration file.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments shared by the plan-reading commands.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Plan JSON from `terraform show -json`, or `-` for stdin.
    #[arg(default_value = "-")]
    pub plan: PathBuf,

    /// Keep pure no-op changes instead of filtering them out.
    #[arg(long)]
    pub keep_no_op: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl PlanArgs {
    /// Returns true if the plan should be read from standard input.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.plan.as_os_str() == "-"
    }
}
