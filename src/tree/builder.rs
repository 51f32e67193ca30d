//! Address tree builder.
//!
//! Folds a flat list of dot-separated resource addresses into a tree by
//! merging shared prefixes. `module.vpc.aws_instance.foo` and
//! `module.vpc.aws_instance.bar` share the `module` > `vpc` > `aws_instance`
//! path and differ only in their last node.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TreeError;
use crate::plan::ResourceChange;

use super::node::{AddressNode, AddressTree, DEFAULT_ROOT_LABEL};

/// Maximum number of segments in one address.
///
/// Tree traversal recurses once per level, so deeper addresses are rejected
/// before insertion.
pub const MAX_ADDRESS_DEPTH: usize = 1024;

/// How a node finds an existing child by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildLookup {
    /// Scan siblings in order.
    #[default]
    Linear,
    /// Keep a name index next to the ordered children.
    Hashed,
}

/// Builder for [`AddressTree`].
#[derive(Debug, Clone)]
pub struct AddressTreeBuilder {
    lookup: ChildLookup,
    root_label: String,
}

impl AddressTreeBuilder {
    /// Creates a builder with linear lookup and the default root label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lookup: ChildLookup::default(),
            root_label: String::from(DEFAULT_ROOT_LABEL),
        }
    }

    /// Sets the child lookup strategy.
    #[must_use]
    pub fn with_lookup(mut self, lookup: ChildLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Sets the label of the synthetic root.
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Builds a tree from resource changes, in input order.
    ///
    /// All addresses are checked before anything is inserted, so either the
    /// whole tree is returned or none of it is.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyAddress`] or [`TreeError::EmptySegment`] if
    /// any address cannot be split into non-empty segments, and
    /// [`TreeError::TooDeep`] if it has more than [`MAX_ADDRESS_DEPTH`]
    /// segments.
    pub fn build(&self, changes: &[ResourceChange]) -> Result<AddressTree, TreeError> {
        let paths = changes
            .iter()
            .map(|c| split_address(&c.address))
            .collect::<Result<Vec<_>, _>>()?;

        let mut root = AddressNode::new(self.root_label.as_str(), self.lookup == ChildLookup::Hashed);
        for (change, segments) in changes.iter().zip(paths) {
            insert(&mut root, &segments, change);
        }

        let tree = AddressTree::new(root);
        debug!(
            "Built address tree with {} root nodes for {} changes",
            tree.roots().len(),
            changes.len()
        );
        Ok(tree)
    }
}

impl Default for AddressTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a tree with the default settings.
///
/// # Errors
///
/// See [`AddressTreeBuilder::build`].
pub fn build_address_tree(changes: &[ResourceChange]) -> Result<AddressTree, TreeError> {
    AddressTreeBuilder::new().build(changes)
}

fn split_address(address: &str) -> Result<Vec<&str>, TreeError> {
    if address.is_empty() {
        return Err(TreeError::EmptyAddress);
    }

    let segments: Vec<&str> = address.split('.').collect();
    if segments.len() > MAX_ADDRESS_DEPTH {
        return Err(TreeError::TooDeep {
            address: address.to_string(),
            depth: segments.len(),
            limit: MAX_ADDRESS_DEPTH,
        });
    }
    if let Some(position) = segments.iter().position(|s| s.is_empty()) {
        return Err(TreeError::EmptySegment {
            address: address.to_string(),
            position,
        });
    }
    Ok(segments)
}

fn insert(root: &mut AddressNode, segments: &[&str], change: &ResourceChange) {
    let mut node = root;
    for segment in segments {
        node = node.child_or_insert(segment);
    }

    if let Some(previous) = node.attach(change.clone()) {
        warn!(
            "Duplicate address {}: replacing earlier change",
            previous.address
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Action;

    fn create(address: &str) -> ResourceChange {
        ResourceChange::new(address, &[Action::Create])
    }

    fn names(nodes: &[AddressNode]) -> Vec<&str> {
        nodes.iter().map(AddressNode::name).collect()
    }

    #[test]
    fn test_shared_prefixes_are_merged() {
        let changes = vec![
            create("module.vpc.aws_instance.foo"),
            create("module.vpc.aws_instance.bar"),
            create("aws_instance.baz"),
        ];

        let tree = build_address_tree(&changes).unwrap();
        assert_eq!(names(tree.roots()), vec!["module", "aws_instance"]);

        let module = &tree.roots()[0];
        assert!(module.is_placeholder());
        assert_eq!(names(module.children()), vec!["vpc"]);

        let vpc = module.child(0).unwrap();
        assert_eq!(names(vpc.children()), vec!["aws_instance"]);

        let instances = vpc.child(0).unwrap();
        assert_eq!(names(instances.children()), vec!["foo", "bar"]);
        assert_eq!(instances.children()[0].change(), Some(&changes[0]));
        assert_eq!(instances.children()[1].change(), Some(&changes[1]));

        let top_level = &tree.roots()[1];
        assert_eq!(names(top_level.children()), vec!["baz"]);
        assert_eq!(top_level.children()[0].change(), Some(&changes[2]));

        assert_eq!(tree.change_count(), 3);
    }

    #[test]
    fn test_placeholder_receives_later_change() {
        let changes = vec![create("module.db.aws_db_instance.main"), create("module.db")];

        let tree = build_address_tree(&changes).unwrap();
        let db = tree.find("module.db").unwrap();
        assert_eq!(db.change(), Some(&changes[1]));
        assert_eq!(names(db.children()), vec!["aws_db_instance"]);
        assert!(tree.find("module").unwrap().is_placeholder());
    }

    #[test]
    fn test_single_segment_address() {
        let tree = build_address_tree(&[create("standalone")]).unwrap();
        assert_eq!(names(tree.roots()), vec!["standalone"]);
        assert!(tree.roots()[0].is_leaf());
        assert!(tree.roots()[0].change().is_some());
    }

    #[test]
    fn test_empty_input_builds_empty_tree() {
        let tree = build_address_tree(&[]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.root().name(), ".");
    }

    #[test]
    fn test_empty_segment_fails_whole_build() {
        let changes = vec![create("aws_instance.ok"), create("module..broken")];

        let err = build_address_tree(&changes).unwrap_err();
        assert_eq!(
            err,
            TreeError::EmptySegment {
                address: String::from("module..broken"),
                position: 1,
            }
        );
    }

    #[test]
    fn test_trailing_dot_and_empty_address() {
        assert!(matches!(
            build_address_tree(&[create("aws_instance.")]),
            Err(TreeError::EmptySegment { position: 1, .. })
        ));
        assert_eq!(
            build_address_tree(&[create("")]).unwrap_err(),
            TreeError::EmptyAddress
        );
    }

    #[test]
    fn test_deep_address_is_rejected() {
        let deep = vec!["a"; 200_000].join(".");
        let changes = vec![create("aws_instance.ok"), create(&deep)];

        match build_address_tree(&changes).unwrap_err() {
            TreeError::TooDeep { address, depth, limit } => {
                assert_eq!(address, deep);
                assert_eq!(depth, 200_000);
                assert_eq!(limit, MAX_ADDRESS_DEPTH);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_address_at_depth_limit_builds() {
        let address = vec!["a"; MAX_ADDRESS_DEPTH].join(".");
        let tree = build_address_tree(&[create(&address)]).unwrap();

        assert_eq!(tree.change_count(), 1);
        let leaf = tree.find(&address).unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.change().map(|c| c.address.as_str()), Some(address.as_str()));
        assert!(matches!(
            build_address_tree(&[create(&format!("{address}.a"))]),
            Err(TreeError::TooDeep { depth, .. }) if depth == MAX_ADDRESS_DEPTH + 1
        ));
    }

    #[test]
    fn test_duplicate_address_keeps_last_change() {
        let first = create("aws_instance.web");
        let second = ResourceChange::new("aws_instance.web", &[Action::Update]);

        let tree = build_address_tree(&[first, second.clone()]).unwrap();
        assert_eq!(tree.change_count(), 1);
        assert_eq!(tree.find("aws_instance.web").unwrap().change(), Some(&second));
    }

    #[test]
    fn test_hashed_lookup_matches_linear() {
        let changes = vec![
            create("module.a.x.one"),
            create("module.b.x.two"),
            create("module.a.y.three"),
            create("data.z.four"),
            create("module.a.x.five"),
        ];

        let linear = AddressTreeBuilder::new().build(&changes).unwrap();
        let hashed = AddressTreeBuilder::new()
            .with_lookup(ChildLookup::Hashed)
            .build(&changes)
            .unwrap();

        assert_eq!(linear, hashed);
        let a_x = hashed.find("module.a.x").unwrap();
        assert_eq!(names(a_x.children()), vec!["one", "five"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let changes = vec![create("a.b.c"), create("a.d"), create("e")];
        let builder = AddressTreeBuilder::new();
        assert_eq!(builder.build(&changes).unwrap(), builder.build(&changes).unwrap());
    }

    #[test]
    fn test_custom_root_label() {
        let tree = AddressTreeBuilder::new()
            .with_root_label("plan")
            .build(&[create("a.b")])
            .unwrap();
        assert_eq!(tree.root().name(), "plan");
        assert_eq!(tree.into_roots().len(), 1);
    }
}
