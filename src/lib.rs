// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # plantree
//!
//! Visualizes Terraform/OpenTofu change plans.
//!
//! ## Overview
//!
//! plantree reads the JSON produced by `terraform show -json plan.out` and:
//!
//! - Classifies every resource and output change (import, add, delete,
//!   update, recreate) with a display color and suffix
//! - Groups changes into per-category buckets for a summary
//! - Rebuilds the namespace hidden in dot-separated resource addresses
//!   (`module.vpc.aws_instance.web`) as an explicit tree
//!
//! ## Pipeline
//!
//! 1. **Parse**: [`plan::PlanParser`] turns JSON into typed records
//! 2. **Filter**: pure no-op changes are dropped (real imports are kept)
//! 3. **Group**: [`classify::group_resource_changes`] buckets by category
//! 4. **Tree**: [`tree::AddressTreeBuilder`] merges shared address prefixes
//!
//! Steps 3 and 4 are independent projections of the filtered changes.
//!
//! ## Modules
//!
//! - [`plan`]: Change records and the JSON plan parser
//! - [`classify`]: Classifier, grouper and no-op filter
//! - [`tree`]: Address tree builder
//! - [`report`]: Runs the pipeline for one plan
//! - [`config`]: Configuration parsing and validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```text
//! $ terraform show -json plan.out | plantree tree
//! .
//! ├── module
//! │   └── vpc
//! │       └── aws_instance
//! │           ├── foo (+)
//! │           └── bar (+)
//! └── aws_instance
//!     └── baz (+)
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod report;
pub mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{
    Category, ChangeColor, ChangeGroups, Classification, classify_output, classify_resource,
    filter_no_op_resources, group_output_changes, group_resource_changes,
};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, ViewConfig};
pub use error::{PlanTreeError, Result};
pub use plan::{Action, OutputChange, Plan, PlanParser, ResourceChange};
pub use report::{PlanReport, ReportOptions};
pub use tree::{AddressNode, AddressTree, AddressTreeBuilder, ChildLookup};
