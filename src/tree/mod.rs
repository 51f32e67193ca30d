//! Address tree module.
//!
//! This module reconstructs the namespace hidden in dot-separated resource
//! addresses as an explicit tree for rendering.

mod builder;
mod node;

pub use builder::{AddressTreeBuilder, ChildLookup, MAX_ADDRESS_DEPTH, build_address_tree};
pub use node::{AddressNode, AddressTree, DEFAULT_ROOT_LABEL};
