//! Change classifier.
//!
//! Maps one resource or output change to a [`Category`] together with the
//! color and suffix used to display it.

use serde::Serialize;

use crate::error::ClassifyError;
use crate::plan::{Action, OutputChange, ResourceChange};

/// Semantic category of a change.
///
/// Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Existing object adopted into state.
    Import,
    /// Resource will be created.
    Add,
    /// Resource will be destroyed.
    Delete,
    /// Resource will be updated in place.
    Update,
    /// Resource will be destroyed and created again.
    Recreate,
    /// Nothing changes.
    NoOp,
}

/// Display color hint for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeColor {
    /// Imports.
    Cyan,
    /// Additions.
    Green,
    /// Deletions.
    Red,
    /// In-place updates.
    Yellow,
    /// Replacements.
    Magenta,
    /// No color.
    Plain,
}

/// Result of classifying a single change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Semantic category.
    pub category: Category,
    /// Display color.
    pub color: ChangeColor,
    /// Short suffix shown after the address, e.g. `(+)`.
    pub suffix: &'static str,
}

impl Classification {
    const IMPORT: Self = Self::new(Category::Import, ChangeColor::Cyan, "(i)");
    const ADD: Self = Self::new(Category::Add, ChangeColor::Green, "(+)");
    const DELETE: Self = Self::new(Category::Delete, ChangeColor::Red, "(-)");
    const UPDATE: Self = Self::new(Category::Update, ChangeColor::Yellow, "(~)");
    const CREATE_BEFORE_DESTROY: Self = Self::new(Category::Recreate, ChangeColor::Magenta, "(+/-)");
    const DESTROY_BEFORE_CREATE: Self = Self::new(Category::Recreate, ChangeColor::Magenta, "(-/+)");
    const NO_OP: Self = Self::new(Category::NoOp, ChangeColor::Plain, "");

    const fn new(category: Category, color: ChangeColor, suffix: &'static str) -> Self {
        Self {
            category,
            color,
            suffix,
        }
    }

    /// Classifies an action sequence, ignoring any import marker.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::UnsupportedChangeShape`] if the sequence is
    /// not one of the recognized shapes. `subject` names the change in the
    /// error.
    pub fn from_actions(subject: &str, actions: &[Action]) -> Result<Self, ClassifyError> {
        match actions {
            [Action::Create] => Ok(Self::ADD),
            [Action::Delete] => Ok(Self::DELETE),
            [Action::Update] => Ok(Self::UPDATE),
            [Action::Create, Action::Delete] => Ok(Self::CREATE_BEFORE_DESTROY),
            [Action::Delete, Action::Create] => Ok(Self::DESTROY_BEFORE_CREATE),
            [Action::NoOp] => Ok(Self::NO_OP),
            _ => Err(ClassifyError::unsupported(subject, actions)),
        }
    }
}

/// Classifies a resource change.
///
/// A real import (non-empty import id) wins over whatever the actions say.
///
/// # Errors
///
/// Returns [`ClassifyError::UnsupportedChangeShape`] for unrecognized action
/// sequences.
pub fn classify_resource(change: &ResourceChange) -> Result<Classification, ClassifyError> {
    if change.is_real_import() {
        return Ok(Classification::IMPORT);
    }
    Classification::from_actions(&change.address, &change.actions)
}

/// Classifies an output change by its actions.
///
/// # Errors
///
/// Returns [`ClassifyError::UnsupportedChangeShape`] for unrecognized action
/// sequences.
pub fn classify_output(name: &str, change: &OutputChange) -> Result<Classification, ClassifyError> {
    Classification::from_actions(name, &change.actions)
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Import,
        Self::Add,
        Self::Delete,
        Self::Update,
        Self::Recreate,
        Self::NoOp,
    ];

    /// Returns the bucket label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Add => "add",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Recreate => "recreate",
            Self::NoOp => "no-op",
        }
    }

    /// Returns the color used for this category's heading.
    #[must_use]
    pub const fn color(self) -> ChangeColor {
        match self {
            Self::Import => ChangeColor::Cyan,
            Self::Add => ChangeColor::Green,
            Self::Delete => ChangeColor::Red,
            Self::Update => ChangeColor::Yellow,
            Self::Recreate => ChangeColor::Magenta,
            Self::NoOp => ChangeColor::Plain,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(actions: &[Action]) -> ResourceChange {
        ResourceChange::new("aws_instance.example", actions)
    }

    #[test]
    fn test_single_action_colors_and_suffixes() {
        let expected = [
            (Action::Create, Category::Add, ChangeColor::Green, "(+)"),
            (Action::Delete, Category::Delete, ChangeColor::Red, "(-)"),
            (Action::Update, Category::Update, ChangeColor::Yellow, "(~)"),
        ];

        for (action, category, color, suffix) in expected {
            let result = classify_resource(&resource(&[action])).unwrap();
            assert_eq!(result.category, category);
            assert_eq!(result.color, color);
            assert_eq!(result.suffix, suffix);
        }
    }

    #[test]
    fn test_create_delete_is_recreate() {
        let result = classify_resource(&resource(&[Action::Create, Action::Delete])).unwrap();
        assert_eq!(result.category, Category::Recreate);
        assert_eq!(result.color, ChangeColor::Magenta);
        assert_eq!(result.suffix, "(+/-)");
    }

    #[test]
    fn test_delete_create_is_recreate() {
        let result = classify_resource(&resource(&[Action::Delete, Action::Create])).unwrap();
        assert_eq!(result.category, Category::Recreate);
        assert_eq!(result.color, ChangeColor::Magenta);
        assert_eq!(result.suffix, "(-/+)");
    }

    #[test]
    fn test_import_ignores_actions() {
        let cases: [&[Action]; 4] = [
            &[],
            &[Action::NoOp],
            &[Action::Update],
            &[Action::Read, Action::Forget],
        ];
        for actions in cases {
            let result = classify_resource(&resource(actions).with_importing("id")).unwrap();
            assert_eq!(result.category, Category::Import);
            assert_eq!(result.color, ChangeColor::Cyan);
            assert_eq!(result.suffix, "(i)");
        }
    }

    #[test]
    fn test_empty_import_id_falls_back_to_actions() {
        let result = classify_resource(&resource(&[Action::Create]).with_importing("")).unwrap();
        assert_eq!(result.category, Category::Add);
    }

    #[test]
    fn test_no_op() {
        let result = classify_resource(&resource(&[Action::NoOp])).unwrap();
        assert_eq!(result.category, Category::NoOp);
        assert_eq!(result.suffix, "");
    }

    #[test]
    fn test_read_is_unsupported() {
        let err = classify_resource(&resource(&[Action::Read])).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::UnsupportedChangeShape {
                subject: String::from("aws_instance.example"),
                actions: vec![Action::Read],
            }
        );
    }

    #[test]
    fn test_other_shapes_are_unsupported() {
        let cases: [&[Action]; 5] = [
            &[],
            &[Action::Forget],
            &[Action::Update, Action::Create],
            &[Action::Create, Action::Create],
            &[Action::Delete, Action::Create, Action::Update],
        ];
        for actions in cases {
            assert!(classify_resource(&resource(actions)).is_err());
        }
    }

    #[test]
    fn test_output_classification() {
        let result = classify_output("vpc_id", &OutputChange::new(&[Action::Update])).unwrap();
        assert_eq!(result.category, Category::Update);

        let err = classify_output("vpc_id", &OutputChange::new(&[Action::Read])).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::UnsupportedChangeShape { ref subject, .. } if subject == "vpc_id"
        ));
    }

    #[test]
    fn test_classifier_is_idempotent() {
        let change = resource(&[Action::Delete, Action::Create]);
        assert_eq!(
            classify_resource(&change).unwrap(),
            classify_resource(&change).unwrap()
        );
    }

    #[test]
    fn test_category_order_and_labels() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["import", "add", "delete", "update", "recreate", "no-op"]
        );
        assert!(Category::Import < Category::NoOp);
    }
}
