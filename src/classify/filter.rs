//! No-op filter.

use tracing::debug;

use crate::plan::ResourceChange;

/// Removes pure no-op changes in place, returning how many were removed.
///
/// A change is dropped when its actions are exactly `[no-op]` and it is not a
/// real import. Survivors keep their relative order.
pub fn filter_no_op_resources(changes: &mut Vec<ResourceChange>) -> usize {
    let before = changes.len();
    changes.retain(|c| !c.is_no_op() || c.is_real_import());
    let removed = before - changes.len();

    if removed > 0 {
        debug!("Filtered {removed} no-op resource changes");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Action, Plan};

    #[test]
    fn test_filter_no_op_resources() {
        let mut plan = Plan {
            resource_changes: vec![
                ResourceChange::new("no-op1", &[Action::NoOp]),
                ResourceChange::new("no-op3", &[Action::NoOp]),
                ResourceChange::new("no-op2", &[Action::NoOp]).with_importing(""),
                ResourceChange::new("create", &[Action::Create]),
            ],
            ..Plan::default()
        };

        let removed = plan.filter_no_op_resources();

        assert_eq!(removed, 3);
        assert_eq!(
            plan.resource_changes,
            vec![ResourceChange::new("create", &[Action::Create])]
        );
    }

    #[test]
    fn test_real_import_survives() {
        let mut changes = vec![
            ResourceChange::new("a", &[Action::NoOp]),
            ResourceChange::new("b", &[Action::NoOp]).with_importing("i-123"),
            ResourceChange::new("c", &[Action::Update]),
            ResourceChange::new("d", &[Action::NoOp]),
        ];

        let removed = filter_no_op_resources(&mut changes);

        assert_eq!(removed, 2);
        let addresses: Vec<&str> = changes.iter().map(|c| c.address.as_str()).collect();
        assert_eq!(addresses, vec!["b", "c"]);
    }

    #[test]
    fn test_unsupported_shapes_are_kept() {
        let mut changes = vec![ResourceChange::new("data.x", &[Action::Read])];
        assert_eq!(filter_no_op_resources(&mut changes), 0);
        assert_eq!(changes.len(), 1);
    }
}
