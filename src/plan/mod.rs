//! Plan module.
//!
//! This module holds the typed change records and the parser that
//! produces them from a JSON plan document.

mod parser;
mod types;

pub use parser::PlanParser;
pub use types::{Action, Importing, OutputChange, Plan, ResourceChange};
