//! Address tree nodes.

use std::collections::HashMap;

use crate::plan::ResourceChange;

/// Label of the synthetic root node.
pub const DEFAULT_ROOT_LABEL: &str = ".";

/// One segment of a resource address.
///
/// Children are unique by name and kept in first-insertion order. A node
/// carries a change only if some address ends at it.
#[derive(Debug, Clone)]
pub struct AddressNode {
    name: String,
    change: Option<ResourceChange>,
    children: Vec<Self>,
    /// Name to position in `children`, present for hashed lookup only.
    index: Option<HashMap<String, usize>>,
}

/// A built address tree with its synthetic root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTree {
    root: AddressNode,
}

impl AddressNode {
    pub(crate) fn new(name: impl Into<String>, indexed: bool) -> Self {
        Self {
            name: name.into(),
            change: None,
            children: Vec::new(),
            index: indexed.then(HashMap::new),
        }
    }

    /// Returns the segment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attached change, if an address ends here.
    #[must_use]
    pub const fn change(&self) -> Option<&ResourceChange> {
        self.change.as_ref()
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Returns the child with the given name.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&Self> {
        self.position_of(name).and_then(|p| self.children.get(p))
    }

    /// Returns true if this node is only a prefix of other addresses.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.change.is_none()
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(name).copied(),
            None => self.children.iter().position(|c| c.name == name),
        }
    }

    /// Returns the child named `name`, appending it first if missing.
    pub(crate) fn child_or_insert(&mut self, name: &str) -> &mut Self {
        let position = if let Some(position) = self.position_of(name) {
            position
        } else {
            let position = self.children.len();
            let indexed = self.index.is_some();
            self.children.push(Self::new(name, indexed));
            if let Some(index) = &mut self.index {
                index.insert(name.to_string(), position);
            }
            position
        };
        &mut self.children[position]
    }

    /// Attaches a change, returning the one it replaced.
    pub(crate) fn attach(&mut self, change: ResourceChange) -> Option<ResourceChange> {
        self.change.replace(change)
    }

    fn count_changes(&self) -> usize {
        usize::from(self.change.is_some())
            + self.children.iter().map(Self::count_changes).sum::<usize>()
    }
}

/// Structural equality: name, attached change and ordered children.
/// The lookup index is not part of a node's identity.
impl PartialEq for AddressNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.change == other.change && self.children == other.children
    }
}

impl Eq for AddressNode {}

impl AddressTree {
    pub(crate) const fn new(root: AddressNode) -> Self {
        Self { root }
    }

    /// Returns the synthetic root node.
    #[must_use]
    pub const fn root(&self) -> &AddressNode {
        &self.root
    }

    /// Returns the root-level nodes in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[AddressNode] {
        self.root.children()
    }

    /// Consumes the tree, returning the root-level nodes.
    #[must_use]
    pub fn into_roots(self) -> Vec<AddressNode> {
        self.root.children
    }

    /// Returns the number of nodes carrying a change.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.root.count_changes()
    }

    /// Returns true if the tree has no nodes besides the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Looks up the node at a dot-separated path.
    #[must_use]
    pub fn find(&self, address: &str) -> Option<&AddressNode> {
        address
            .split('.')
            .try_fold(&self.root, |node, segment| node.find_child(segment))
    }
}
