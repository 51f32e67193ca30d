//! Classification module.
//!
//! This module turns change records into display categories:
//! - Classifying a single change into category, color and suffix
//! - Grouping resource and output changes into category buckets
//! - Filtering pure no-op changes out of a plan

mod classifier;
mod filter;
mod group;

pub use classifier::{Category, ChangeColor, Classification, classify_output, classify_resource};
pub use filter::filter_no_op_resources;
pub use group::{ChangeGroups, PlanSummary, group_output_changes, group_resource_changes};
