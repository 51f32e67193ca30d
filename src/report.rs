//! Plan report assembly.
//!
//! Runs the no-op filter, then produces the two independent projections of
//! the filtered change list: category buckets and the address tree.

use tracing::info;

use crate::classify::{ChangeGroups, group_output_changes, group_resource_changes};
use crate::config::ViewConfig;
use crate::error::Result;
use crate::plan::{Plan, ResourceChange};
use crate::tree::{AddressTree, AddressTreeBuilder};

/// Everything the renderer needs for one plan.
#[derive(Debug, Clone)]
pub struct PlanReport {
    /// Resource changes by category.
    pub resources: ChangeGroups<ResourceChange>,
    /// Output names by category, when outputs are shown.
    pub outputs: Option<ChangeGroups<String>>,
    /// Address tree of the resource changes.
    pub tree: AddressTree,
    /// Number of no-op changes removed before grouping.
    pub filtered: usize,
}

/// Options controlling report assembly.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Drop pure no-op resource changes first.
    pub filter_no_op: bool,
    /// Group output changes too.
    pub include_outputs: bool,
    /// Tree builder settings.
    pub tree: AddressTreeBuilder,
}

impl ReportOptions {
    /// Derives report options from the view configuration.
    #[must_use]
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            filter_no_op: config.filter.no_op,
            include_outputs: config.display.show_outputs,
            tree: AddressTreeBuilder::new()
                .with_lookup(config.tree.lookup)
                .with_root_label(config.tree.root_label.as_str()),
        }
    }

    /// Overrides the no-op filter setting.
    #[must_use]
    pub fn with_filter_no_op(mut self, filter_no_op: bool) -> Self {
        self.filter_no_op = filter_no_op;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

impl PlanReport {
    /// Builds a report, consuming the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any change has an unsupported action shape or an
    /// address that cannot be split into segments.
    pub fn build(mut plan: Plan, options: &ReportOptions) -> Result<Self> {
        let filtered = if options.filter_no_op {
            plan.filter_no_op_resources()
        } else {
            0
        };

        let resources = group_resource_changes(&plan.resource_changes)?;
        let outputs = if options.include_outputs {
            Some(group_output_changes(&plan.output_changes)?)
        } else {
            None
        };
        let tree = options.tree.build(&plan.resource_changes)?;

        info!(
            "Plan: {} resource changes, {} output changes, {} no-ops filtered",
            resources.len(),
            outputs.as_ref().map_or(0, ChangeGroups::len),
            filtered
        );

        Ok(Self {
            resources,
            outputs,
            tree,
            filtered,
        })
    }

    /// Returns true if the plan changes any resource or output.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.resources.is_empty() || self.outputs.as_ref().is_some_and(|o| !o.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::error::{ClassifyError, PlanTreeError};
    use crate::plan::{Action, OutputChange};

    fn sample_plan() -> Plan {
        let mut plan = Plan {
            resource_changes: vec![
                ResourceChange::new("module.vpc.aws_subnet.a", &[Action::Create]),
                ResourceChange::new("module.vpc.aws_subnet.b", &[Action::NoOp]),
                ResourceChange::new("aws_instance.web", &[Action::Delete, Action::Create]),
                ResourceChange::new("aws_s3_bucket.logs", &[Action::NoOp]).with_importing("logs"),
            ],
            ..Plan::default()
        };
        plan.output_changes
            .insert(String::from("bucket"), OutputChange::new(&[Action::Update]));
        plan
    }

    #[test]
    fn test_build_filters_before_both_projections() {
        let report = PlanReport::build(sample_plan(), &ReportOptions::default()).unwrap();

        assert_eq!(report.filtered, 1);
        assert_eq!(report.resources.count(Category::Add), 1);
        assert_eq!(report.resources.count(Category::Recreate), 1);
        assert_eq!(report.resources.count(Category::Import), 1);
        assert_eq!(report.tree.change_count(), 3);
        assert!(report.tree.find("module.vpc.aws_subnet.b").is_none());
        assert_eq!(
            report.outputs.as_ref().unwrap().get(Category::Update),
            ["bucket"]
        );
        assert!(report.has_changes());
    }

    #[test]
    fn test_keep_no_op_keeps_tree_nodes() {
        let options = ReportOptions::default().with_filter_no_op(false);
        let report = PlanReport::build(sample_plan(), &options).unwrap();

        assert_eq!(report.filtered, 0);
        assert_eq!(report.resources.len(), 3);
        assert!(report.tree.find("module.vpc.aws_subnet.b").is_some());
    }

    #[test]
    fn test_outputs_can_be_skipped() {
        let mut config = ViewConfig::default();
        config.display.show_outputs = false;

        let report = PlanReport::build(sample_plan(), &ReportOptions::from_config(&config)).unwrap();
        assert!(report.outputs.is_none());
    }

    #[test]
    fn test_unsupported_shape_fails_report() {
        let mut plan = sample_plan();
        plan.resource_changes
            .push(ResourceChange::new("data.aws_ami.ubuntu", &[Action::Read]));

        let result = PlanReport::build(plan, &ReportOptions::default());
        assert!(matches!(
            result,
            Err(PlanTreeError::Classify(ClassifyError::UnsupportedChangeShape { .. }))
        ));
    }

    #[test]
    fn test_empty_plan_has_no_changes() {
        let report = PlanReport::build(Plan::default(), &ReportOptions::default()).unwrap();
        assert!(!report.has_changes());
        assert!(report.tree.is_empty());
    }
}
