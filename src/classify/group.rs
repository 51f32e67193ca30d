//! Change grouper.
//!
//! Partitions resource and output changes into per-category buckets,
//! preserving input order within each bucket.

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::ClassifyError;
use crate::plan::{OutputChange, ResourceChange};

use super::classifier::{Category, classify_output, classify_resource};

/// Changes bucketed by category.
///
/// A category nobody was classified into is simply absent; [`ChangeGroups::get`]
/// returns an empty slice for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeGroups<T> {
    buckets: BTreeMap<Category, Vec<T>>,
}

/// Per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Number of imports.
    pub to_import: usize,
    /// Number of additions.
    pub to_add: usize,
    /// Number of deletions.
    pub to_delete: usize,
    /// Number of in-place updates.
    pub to_update: usize,
    /// Number of replacements.
    pub to_recreate: usize,
}

impl<T> ChangeGroups<T> {
    /// Creates an empty set of groups.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    fn push(&mut self, category: Category, item: T) {
        self.buckets.entry(category).or_default().push(item);
    }

    /// Returns the items in a category, in input order.
    #[must_use]
    pub fn get(&self, category: Category) -> &[T] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of items in a category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Returns the total number of grouped items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if nothing was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Iterates over non-empty buckets in category display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[T])> {
        self.buckets
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(category, items)| (*category, items.as_slice()))
    }

    /// Returns per-category counts.
    #[must_use]
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            to_import: self.count(Category::Import),
            to_add: self.count(Category::Add),
            to_delete: self.count(Category::Delete),
            to_update: self.count(Category::Update),
            to_recreate: self.count(Category::Recreate),
        }
    }
}

impl<T> Default for ChangeGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanSummary {
    /// Returns true if there are any changes.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    /// Returns the total number of changes.
    #[must_use]
    pub const fn total_changes(&self) -> usize {
        self.to_import + self.to_add + self.to_delete + self.to_update + self.to_recreate
    }
}

/// Groups resource changes by category.
///
/// No-op changes are dropped.
///
/// # Errors
///
/// Returns the first [`ClassifyError`] encountered; no partial groups are
/// returned.
pub fn group_resource_changes(
    changes: &[ResourceChange],
) -> Result<ChangeGroups<ResourceChange>, ClassifyError> {
    let mut groups = ChangeGroups::new();

    for change in changes {
        let classification = classify_resource(change)?;
        if classification.category == Category::NoOp {
            continue;
        }
        groups.push(classification.category, change.clone());
    }

    debug!(
        "Grouped {} of {} resource changes",
        groups.len(),
        changes.len()
    );
    Ok(groups)
}

/// Groups output changes by category, bucketing output names.
///
/// No-op changes are dropped.
///
/// # Errors
///
/// Returns the first [`ClassifyError`] encountered; no partial groups are
/// returned.
pub fn group_output_changes(
    outputs: &BTreeMap<String, OutputChange>,
) -> Result<ChangeGroups<String>, ClassifyError> {
    let mut groups = ChangeGroups::new();

    for (name, change) in outputs {
        let classification = classify_output(name, change)?;
        if classification.category == Category::NoOp {
            continue;
        }
        groups.push(classification.category, name.clone());
    }

    debug!("Grouped {} of {} output changes", groups.len(), outputs.len());
    Ok(groups)
}
