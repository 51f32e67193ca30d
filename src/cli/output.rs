//! Output formatting for CLI commands.
//!
//! This module renders a [`PlanReport`] as colored text or JSON. The tree
//! renderer only walks node names, attached changes and ordered children.

use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::classify::{Category, ChangeColor, ChangeGroups, classify_resource};
use crate::error::Result;
use crate::plan::ResourceChange;
use crate::report::PlanReport;
use crate::tree::{AddressNode, AddressTree};

use super::commands::OutputFormat;

/// Categories shown in the summary table.
const REPORTED: [Category; 5] = [
    Category::Import,
    Category::Add,
    Category::Delete,
    Category::Update,
    Category::Recreate,
];

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Emit ANSI colors.
    color: bool,
    /// Append change suffixes to tree leaves.
    show_suffix: bool,
}

/// Category row for table display.
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Resources")]
    resources: usize,
    #[tabled(rename = "Outputs")]
    outputs: String,
}

impl OutputFormatter {
    /// Creates a new output formatter with colors and suffixes enabled.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: true,
            show_suffix: true,
        }
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enables or disables change suffixes in the tree.
    #[must_use]
    pub const fn with_suffix(mut self, show_suffix: bool) -> Self {
        self.show_suffix = show_suffix;
        self
    }

    /// Formats the grouped changes.
    #[must_use]
    pub fn format_summary(&self, report: &PlanReport) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&SummaryJson::from(report)).unwrap_or_default()
            }
            OutputFormat::Text => self.format_summary_text(report),
        }
    }

    /// Formats the address tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an attached change cannot be classified.
    pub fn format_tree(&self, tree: &AddressTree) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let nodes = NodeJson::from_nodes(tree.roots())?;
                Ok(serde_json::to_string_pretty(&nodes).unwrap_or_default())
            }
            OutputFormat::Text => self.format_tree_text(tree),
        }
    }

    /// Formats the summary followed by the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an attached change cannot be classified.
    pub fn format_show(&self, report: &PlanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let show = ShowJson {
                    summary: SummaryJson::from(report),
                    tree: NodeJson::from_nodes(report.tree.roots())?,
                };
                Ok(serde_json::to_string_pretty(&show).unwrap_or_default())
            }
            OutputFormat::Text => {
                let mut output = self.format_summary_text(report);
                output.push('\n');
                output.push_str(&self.format_tree_text(&report.tree)?);
                Ok(output)
            }
        }
    }

    /// Formats the summary as text.
    fn format_summary_text(&self, report: &PlanReport) -> String {
        if !report.has_changes() {
            return format!(
                "{} No changes. Infrastructure matches the configuration.\n",
                self.paint("✓", ChangeColor::Green)
            );
        }

        let mut output = String::from("\nPlan Summary\n\n");

        let rows: Vec<SummaryRow> = REPORTED
            .iter()
            .map(|&category| SummaryRow {
                category: category.label().to_string(),
                resources: report.resources.count(category),
                outputs: report
                    .outputs
                    .as_ref()
                    .map_or_else(|| String::from("-"), |o| o.count(category).to_string()),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        for (category, changes) in report.resources.iter() {
            let _ = write!(output, "\n{} ({}):\n", self.heading(category), changes.len());
            for change in changes {
                let label = format!("{} {}", change.address, Self::suffix_of(change));
                let _ = writeln!(output, "   {}", self.paint(label.trim_end(), category.color()));
            }
        }

        if let Some(outputs) = report.outputs.as_ref().filter(|o| !o.is_empty()) {
            output.push_str("\nOutputs:\n");
            for (category, names) in outputs.iter() {
                let _ = writeln!(
                    output,
                    "   {}: {}",
                    self.paint(category.label(), category.color()),
                    names.join(", ")
                );
            }
        }

        if report.filtered > 0 {
            let _ = write!(output, "\n{} no-op changes hidden.\n", report.filtered);
        }

        output
    }

    /// Formats the tree as box-drawn text.
    fn format_tree_text(&self, tree: &AddressTree) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "{}", tree.root().name());
        self.write_children(&mut output, tree.roots(), "")?;
        Ok(output)
    }

    fn write_children(&self, output: &mut String, nodes: &[AddressNode], prefix: &str) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            let last = i + 1 == nodes.len();
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            let _ = writeln!(output, "{prefix}{branch}{}", self.node_label(node)?);
            self.write_children(output, node.children(), &format!("{prefix}{indent}"))?;
        }
        Ok(())
    }

    /// Returns a node's display label, colored and suffixed when a change ends here.
    fn node_label(&self, node: &AddressNode) -> Result<String> {
        let Some(change) = node.change() else {
            return Ok(node.name().to_string());
        };

        let classification = classify_resource(change)?;
        let label = if self.show_suffix && !classification.suffix.is_empty() {
            format!("{} {}", node.name(), classification.suffix)
        } else {
            node.name().to_string()
        };
        Ok(self.paint(&label, classification.color))
    }

    fn suffix_of(change: &ResourceChange) -> &'static str {
        classify_resource(change).map_or("", |c| c.suffix)
    }

    fn heading(&self, category: Category) -> String {
        let title = match category {
            Category::Import => "Import",
            Category::Add => "Add",
            Category::Delete => "Delete",
            Category::Update => "Update",
            Category::Recreate => "Recreate",
            Category::NoOp => "No-op",
        };
        self.paint(title, category.color())
    }

    /// Applies a change color, unless colors are disabled.
    fn paint(&self, text: &str, color: ChangeColor) -> String {
        if !self.color {
            return text.to_string();
        }
        match color {
            ChangeColor::Cyan => text.cyan().to_string(),
            ChangeColor::Green => text.green().to_string(),
            ChangeColor::Red => text.red().to_string(),
            ChangeColor::Yellow => text.yellow().to_string(),
            ChangeColor::Magenta => text.magenta().to_string(),
            ChangeColor::Plain => text.to_string(),
        }
    }
}

// JSON serialization helpers

#[derive(Serialize)]
struct SummaryJson {
    resources: BTreeMap<Category, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<BTreeMap<Category, Vec<String>>>,
    total_changes: usize,
    filtered_no_op: usize,
}

#[derive(Serialize)]
struct ShowJson {
    #[serde(flatten)]
    summary: SummaryJson,
    tree: Vec<NodeJson>,
}

#[derive(Serialize)]
struct NodeJson {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    children: Vec<NodeJson>,
}

impl NodeJson {
    fn from_nodes(nodes: &[AddressNode]) -> Result<Vec<Self>> {
        nodes.iter().map(Self::from_node).collect()
    }

    fn from_node(node: &AddressNode) -> Result<Self> {
        let category = node
            .change()
            .map(classify_resource)
            .transpose()?
            .map(|c| c.category);

        Ok(Self {
            name: node.name().to_string(),
            address: node.change().map(|c| c.address.clone()),
            category,
            children: Self::from_nodes(node.children())?,
        })
    }
}

fn bucket_json<T, F>(groups: &ChangeGroups<T>, label: F) -> BTreeMap<Category, Vec<String>>
where
    F: Fn(&T) -> String,
{
    groups
        .iter()
        .map(|(category, items)| (category, items.iter().map(&label).collect()))
        .collect()
}

impl From<&PlanReport> for SummaryJson {
    fn from(report: &PlanReport) -> Self {
        Self {
            resources: bucket_json(&report.resources, |c: &ResourceChange| c.address.clone()),
            outputs: report
                .outputs
                .as_ref()
                .map(|o| bucket_json(o, String::clone)),
            total_changes: report.resources.summary().total_changes(),
            filtered_no_op: report.filtered,
        }
    }
}
