//! Configuration parser for loading plantree settings.
//!
//! This module handles loading configuration from YAML files and environment
//! variables, with proper precedence and error handling.

use crate::error::{ConfigError, PlanTreeError, Result};
use crate::tree::ChildLookup;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::ViewConfig;

/// Configuration parser for loading view configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ViewConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(PlanTreeError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanTreeError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ViewConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(ViewConfig::default());
        }

        let config: ViewConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            PlanTreeError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        Ok(config)
    }

    /// Loads configuration, or the defaults when `path` is `None`, then
    /// applies environment variable overrides.
    ///
    /// Environment variables use the format `PLANTREE_<SECTION>_<KEY>`
    /// (e.g., `PLANTREE_TREE_LOOKUP`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an override
    /// has an invalid value.
    pub fn load_with_env(&self, path: Option<&Path>) -> Result<ViewConfig> {
        let mut config = match path {
            Some(path) => self.load_file(path)?,
            None => {
                debug!("No configuration file, using defaults");
                ViewConfig::default()
            }
        };

        apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        Ok(config)
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                PlanTreeError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Applies overrides read through `lookup` to the configuration.
///
/// # Errors
///
/// Returns an error if a variable is set to an unrecognized value.
pub fn apply_env_overrides<F>(config: &mut ViewConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("PLANTREE_COLOR") {
        debug!("Overriding display.color from environment");
        config.display.color = parse_bool("PLANTREE_COLOR", &value)?;
    }

    if let Some(value) = lookup("PLANTREE_SHOW_OUTPUTS") {
        debug!("Overriding display.show_outputs from environment");
        config.display.show_outputs = parse_bool("PLANTREE_SHOW_OUTPUTS", &value)?;
    }

    if let Some(value) = lookup("PLANTREE_FILTER_NO_OP") {
        debug!("Overriding filter.no_op from environment");
        config.filter.no_op = parse_bool("PLANTREE_FILTER_NO_OP", &value)?;
    }

    if let Some(value) = lookup("PLANTREE_TREE_LOOKUP") {
        debug!("Overriding tree.lookup from environment");
        config.tree.lookup = match value.trim().to_ascii_lowercase().as_str() {
            "linear" => ChildLookup::Linear,
            "hashed" => ChildLookup::Hashed,
            _ => return Err(invalid_env("PLANTREE_TREE_LOOKUP", &value)),
        };
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_env(name, value)),
    }
}

fn invalid_env(name: &str, value: &str) -> PlanTreeError {
    PlanTreeError::Config(ConfigError::ParseError {
        message: format!("Invalid value '{value}' for {name}"),
        location: Some(String::from("environment")),
    })
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["plantree.yaml", "plantree.yml", ".plantree.yaml"];

/// Finds the configuration file in `start_dir` or its parents, falling back
/// to the user configuration directory.
///
/// Returns `None` when no file exists anywhere; callers use the defaults.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("plantree").join("config.yaml");
    if user_config.exists() {
        info!("Found user configuration file: {}", user_config.display());
        return Some(user_config);
    }

    debug!("No configuration file found");
    None
}
