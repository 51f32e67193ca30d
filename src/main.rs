//! plantree CLI entrypoint.
//!
//! This is the main entrypoint for the plantree command-line tool.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use plantree::cli::{Cli, Commands, OutputFormat, OutputFormatter, PlanArgs};
use plantree::config::{ConfigParser, ConfigValidator, ViewConfig, find_config_file};
use plantree::error::{PlanTreeError, Result};
use plantree::plan::{Plan, PlanParser};
use plantree::report::{PlanReport, ReportOptions};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr so rendered output on stdout stays pipeable.
fn init_logging(verbose: bool) {
    let directive = log_directive(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the log filter: `debug` when verbose, then `RUST_LOG`, then `info`.
fn log_directive(verbose: bool, from_env: Option<String>) -> String {
    if verbose {
        return String::from("debug");
    }
    from_env
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| String::from("info"))
}

/// Dispatches the selected command.
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { ref path, force } => cmd_init(path, force),
        Commands::Summary(ref args) => cmd_render(&cli, args, View::Summary),
        Commands::Tree(ref args) => cmd_render(&cli, args, View::Tree),
        Commands::Show(ref args) => cmd_render(&cli, args, View::Show),
    }
}

/// Which part of the report to render.
#[derive(Debug, Clone, Copy)]
enum View {
    Summary,
    Tree,
    Show,
}

/// Write a default configuration file.
fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join("plantree.yaml");

    if !force && config_path.exists() {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    let content = serde_yaml::to_string(&ViewConfig::default())
        .map_err(|e| PlanTreeError::internal(format!("Failed to serialize configuration: {e}")))?;
    std::fs::write(&config_path, content)?;
    eprintln!("Created: {}", config_path.display());

    Ok(())
}

/// Load a plan and render it.
fn cmd_render(cli: &Cli, args: &PlanArgs, view: View) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let color = config.display.color && !cli.no_color && cli.output == OutputFormat::Text;
    colored::control::set_override(color);

    let plan = load_plan(args)?;
    let options =
        ReportOptions::from_config(&config).with_filter_no_op(config.filter.no_op && !args.keep_no_op);
    let report = PlanReport::build(plan, &options)?;

    let formatter = OutputFormatter::new(cli.output)
        .with_color(color)
        .with_suffix(config.display.show_suffix);

    let output = match view {
        View::Summary => formatter.format_summary(&report),
        View::Tree => formatter.format_tree(&report.tree)?,
        View::Show => formatter.format_show(&report)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads configuration from the given path, a discovered file, or defaults.
fn load_config(config_path: Option<&PathBuf>) -> Result<ViewConfig> {
    let config_file = config_path.cloned().or_else(|| find_config_file("."));

    let parser = ConfigParser::new().with_base_path(
        config_file
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(".")),
    );
    parser.load_dotenv()?;

    let config = parser.load_with_env(config_file.as_deref())?;
    ConfigValidator::new().validate(&config)?;
    debug!("Effective configuration: {config:?}");

    Ok(config)
}

/// Reads the plan from a file or standard input.
fn load_plan(args: &PlanArgs) -> Result<Plan> {
    let parser = PlanParser::new();
    if args.reads_stdin() {
        info!("Reading plan from standard input");
        parser.load_reader(std::io::stdin().lock())
    } else {
        parser.load_file(&args.plan)
    }
}
