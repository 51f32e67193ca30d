//! Configuration module for plantree.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `plantree.yaml`
//! - Environment variable overrides
//! - Validation of configuration values

mod parser;
mod spec;
mod validator;

pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, apply_env_overrides, find_config_file};
pub use spec::{DisplayConfig, FilterConfig, TreeConfig, ViewConfig};
pub use validator::ConfigValidator;
