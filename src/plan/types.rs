//! Plan record types.
//!
//! These are the already-parsed change records handed to the classifier and
//! the address tree builder. They mirror the subset of the `show -json` plan
//! format that plantree inspects; every other field is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::filter_no_op_resources;

/// A primitive change verb from a plan's `actions` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Nothing changes.
    NoOp,
    /// Resource will be created.
    Create,
    /// Data source will be read.
    Read,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed.
    Delete,
    /// Resource will be removed from state without being destroyed.
    Forget,
}

/// Marker for a change that adopts an existing object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Importing {
    /// Identifier of the object being imported.
    #[serde(default)]
    pub id: String,
}

/// One planned change to one resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawResourceChange")]
pub struct ResourceChange {
    /// Dot-separated resource address.
    pub address: String,
    /// Ordered action sequence.
    pub actions: Vec<Action>,
    /// Import marker, if the change adopts an existing object.
    pub importing: Option<Importing>,
}

/// One planned change to one output value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputChange {
    /// Ordered action sequence.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A parsed plan document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Plan {
    /// Plan format version, when present.
    #[serde(default)]
    pub format_version: Option<String>,
    /// Resource changes in document order.
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
    /// Output changes keyed by output name.
    #[serde(default)]
    pub output_changes: BTreeMap<String, OutputChange>,
}

/// Wire shape of a resource change: actions and importing live under `change`.
#[derive(Deserialize)]
struct RawResourceChange {
    address: String,
    #[serde(default)]
    change: RawChange,
}

#[derive(Default, Deserialize)]
struct RawChange {
    #[serde(default)]
    actions: Vec<Action>,
    #[serde(default)]
    importing: Option<Importing>,
}

impl From<RawResourceChange> for ResourceChange {
    fn from(raw: RawResourceChange) -> Self {
        Self {
            address: raw.address,
            actions: raw.change.actions,
            importing: raw.change.importing,
        }
    }
}

impl ResourceChange {
    /// Creates a resource change with the given actions and no import marker.
    #[must_use]
    pub fn new(address: impl Into<String>, actions: &[Action]) -> Self {
        Self {
            address: address.into(),
            actions: actions.to_vec(),
            importing: None,
        }
    }

    /// Sets the import marker.
    #[must_use]
    pub fn with_importing(mut self, id: impl Into<String>) -> Self {
        self.importing = Some(Importing { id: id.into() });
        self
    }

    /// Returns true if this change adopts an existing object.
    ///
    /// An import marker with an empty id does not count.
    #[must_use]
    pub fn is_real_import(&self) -> bool {
        self.importing.as_ref().is_some_and(|i| !i.id.is_empty())
    }

    /// Returns true if the action sequence is exactly `[no-op]`.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        self.actions == [Action::NoOp]
    }
}

impl OutputChange {
    /// Creates an output change with the given actions.
    #[must_use]
    pub fn new(actions: &[Action]) -> Self {
        Self {
            actions: actions.to_vec(),
        }
    }
}

impl Plan {
    /// Removes pure no-op resource changes, returning how many were removed.
    pub fn filter_no_op_resources(&mut self) -> usize {
        filter_no_op_resources(&mut self.resource_changes)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoOp => "no-op",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Forget => "forget",
        };
        write!(f, "{s}")
    }
}
