//! Configuration validation.

use crate::error::{ConfigError, PlanTreeError, Result};
use crate::tree::DEFAULT_ROOT_LABEL;
use tracing::debug;

use super::spec::ViewConfig;

/// Validator for view configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a view configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&self, config: &ViewConfig) -> Result<()> {
        let label = &config.tree.root_label;

        if label.trim().is_empty() {
            return Err(PlanTreeError::Config(ConfigError::validation(
                "Root label cannot be empty",
                "tree.root_label",
            )));
        }

        // A lone "." is the default root; any other dot reads as an address separator.
        if label != DEFAULT_ROOT_LABEL && label.contains('.') {
            return Err(PlanTreeError::Config(ConfigError::validation(
                format!("Root label '{label}' cannot contain '.'"),
                "tree.root_label",
            )));
        }

        debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_label(label: &str) -> ViewConfig {
        let mut config = ViewConfig::default();
        config.tree.root_label = label.to_string();
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::new().validate(&ViewConfig::default()).is_ok());
    }

    #[test]
    fn test_custom_label_is_valid() {
        assert!(ConfigValidator::new().validate(&with_label("plan")).is_ok());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let result = ConfigValidator::new().validate(&with_label("  "));
        assert!(matches!(
            result,
            Err(PlanTreeError::Config(ConfigError::ValidationError { .. }))
        ));
    }

    #[test]
    fn test_dotted_label_is_rejected() {
        for label in ["my.plan", "..", ".root", "root."] {
            assert!(matches!(
                ConfigValidator::new().validate(&with_label(label)),
                Err(PlanTreeError::Config(ConfigError::ValidationError { .. }))
            ));
        }
    }

    #[test]
    fn test_single_dot_label_is_valid() {
        assert!(ConfigValidator::new().validate(&with_label(".")).is_ok());
    }
}
