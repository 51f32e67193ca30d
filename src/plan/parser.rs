//! Plan document parser.
//!
//! Reads the JSON produced by `terraform show -json` / `tofu show -json`
//! into typed [`Plan`] records. Any failure here aborts before the
//! classifier or the tree builder runs.

use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PlanError, PlanTreeError, Result};

use super::types::Plan;

/// Parser for JSON plan documents.
#[derive(Debug, Default)]
pub struct PlanParser;

impl PlanParser {
    /// Creates a new plan parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Plan> {
        let path = path.as_ref();
        info!("Loading plan from: {}", path.display());

        if !path.exists() {
            return Err(PlanTreeError::Plan(PlanError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanTreeError::Plan(PlanError::parse(
                format!("Failed to read file: {e}"),
                Some(path.display().to_string()),
            ))
        })?;

        self.parse_json(&content, Some(path))
    }

    /// Loads a plan from any reader, typically standard input.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the content is not a plan.
    pub fn load_reader(&self, mut reader: impl Read) -> Result<Plan> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_json(&content, None)
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or has the wrong shape.
    pub fn parse_json(&self, content: &str, source: Option<&Path>) -> Result<Plan> {
        debug!("Parsing JSON plan");

        let plan: Plan = serde_json::from_str(content).map_err(|e| {
            PlanTreeError::Plan(PlanError::parse(
                format!("JSON parse error: {e}"),
                source.map(|p| p.display().to_string()),
            ))
        })?;

        debug!(
            "Parsed plan (format {}) with {} resource changes and {} output changes",
            plan.format_version.as_deref().unwrap_or("unknown"),
            plan.resource_changes.len(),
            plan.output_changes.len()
        );
        Ok(plan)
    }
}
