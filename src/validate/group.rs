//! Group-level (cross-field) rules.

use crate::form::Group;

use super::{ErrorKind, Validate};

/// A validation rule attached to a group, evaluated over its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupRule {
    /// `email` and `confirmEmail` children must hold equal values. Skipped
    /// while either field is pristine so the error never appears before the
    /// user has typed into both.
    EmailMatch,
}

impl Validate for GroupRule {
    type Target = Group;

    fn validate(&self, group: &Group) -> Option<ErrorKind> {
        match self {
            GroupRule::EmailMatch => {
                let email = group.field("email")?;
                let confirm = group.field("confirmEmail")?;
                if email.is_pristine() || confirm.is_pristine() {
                    return None;
                }
                (email.value() != confirm.value()).then_some(ErrorKind::Match)
            }
        }
    }
}
