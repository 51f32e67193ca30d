//! Error types for the plantree plan visualizer.
//!
//! This module provides the error hierarchy for every stage of the pipeline:
//! configuration, plan loading, change classification and address-tree
//! assembly.

use std::path::PathBuf;
use thiserror::Error;

use crate::plan::Action;

/// The main error type for plantree.
#[derive(Debug, Error)]
pub enum PlanTreeError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan document loading errors.
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Change classification errors.
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Address tree construction errors.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Plan document errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file was not found.
    #[error("Plan file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The plan document could not be parsed.
    #[error("Failed to parse plan: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },
}

/// Change classification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The action sequence is not one of the recognized shapes.
    #[error("Unsupported change for {subject}: [{}]", format_actions(.actions))]
    UnsupportedChangeShape {
        /// Address of the resource or name of the output.
        subject: String,
        /// The unrecognized action sequence.
        actions: Vec<Action>,
    },
}

/// Address tree construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A resource change carried an empty address.
    #[error("Resource change has an empty address")]
    EmptyAddress,

    /// An address contained an empty segment.
    #[error("Address '{address}' has an empty segment at position {position}")]
    EmptySegment {
        /// The offending address.
        address: String,
        /// Zero-based index of the empty segment.
        position: usize,
    },

    /// An address had more segments than a tree may nest.
    #[error("Address '{address}' has {depth} segments, more than the limit of {limit}")]
    TooDeep {
        /// The offending address.
        address: String,
        /// Number of segments in the address.
        depth: usize,
        /// Maximum number of segments allowed.
        limit: usize,
    },
}

/// Result type alias for plantree operations.
pub type Result<T> = std::result::Result<T, PlanTreeError>;

impl PlanTreeError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl PlanError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }
}

impl ClassifyError {
    /// Creates an unsupported-shape error for the given subject.
    #[must_use]
    pub fn unsupported(subject: impl Into<String>, actions: &[Action]) -> Self {
        Self::UnsupportedChangeShape {
            subject: subject.into(),
            actions: actions.to_vec(),
        }
    }
}

fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_shape_message() {
        let err = ClassifyError::unsupported("data.aws_ami.ubuntu", &[Action::Read]);
        assert_eq!(
            err.to_string(),
            "Unsupported change for data.aws_ami.ubuntu: [read]"
        );
    }

    #[test]
    fn test_empty_actions_message() {
        let err = ClassifyError::unsupported("output.x", &[]);
        assert_eq!(err.to_string(), "Unsupported change for output.x: []");
    }

    #[test]
    fn test_too_deep_message() {
        let err = TreeError::TooDeep {
            address: String::from("a.a.a"),
            depth: 3,
            limit: 2,
        };
        assert_eq!(
            err.to_string(),
            "Address 'a.a.a' has 3 segments, more than the limit of 2"
        );
    }

    #[test]
    fn test_wraps_into_top_level() {
        let err: PlanTreeError = TreeError::EmptyAddress.into();
        assert!(matches!(err, PlanTreeError::Tree(TreeError::EmptyAddress)));
        assert_eq!(
            err.to_string(),
            "Tree error: Resource change has an empty address"
        );
    }
}
