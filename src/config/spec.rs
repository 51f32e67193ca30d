//! Configuration specification types for plantree.
//!
//! This module defines the structs that map to the `plantree.yaml` file.
//! Every section is optional; a missing file means all defaults.

use serde::{Deserialize, Serialize};

use crate::tree::{ChildLookup, DEFAULT_ROOT_LABEL};

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewConfig {
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Filtering applied before grouping and tree building.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Address tree settings.
    #[serde(default)]
    pub tree: TreeConfig,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Emit ANSI colors.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Include output changes in the summary.
    #[serde(default = "default_true")]
    pub show_outputs: bool,
    /// Append the change suffix, e.g. `(+)`, to tree leaves.
    #[serde(default = "default_true")]
    pub show_suffix: bool,
}

/// Filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    /// Drop pure no-op resource changes.
    #[serde(default = "default_true")]
    pub no_op: bool,
}

/// Address tree settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeConfig {
    /// Label of the synthetic root node.
    #[serde(default = "default_root_label")]
    pub root_label: String,
    /// Child lookup strategy.
    #[serde(default)]
    pub lookup: ChildLookup,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_outputs: true,
            show_suffix: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { no_op: true }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            lookup: ChildLookup::default(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_root_label() -> String {
    String::from(DEFAULT_ROOT_LABEL)
}
