//! Field-level rules.

use crate::form::Value;

use super::{ErrorKind, Validate};

/// A validation rule attached to a single field.
///
/// Length and email rules pass on empty values; presence is `Required`'s job,
/// so the rules compose without double-reporting on a blank field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Range { min: f64, max: f64 },
}

impl Validate for Rule {
    type Target = Value;

    fn validate(&self, value: &Value) -> Option<ErrorKind> {
        match *self {
            Rule::Required => value.is_empty().then_some(ErrorKind::Required),
            Rule::MinLength(min) => {
                let text = value.as_text()?;
                if text.is_empty() {
                    return None;
                }
                let actual = text.chars().count();
                (actual < min).then_some(ErrorKind::MinLength { min, actual })
            }
            Rule::MaxLength(max) => {
                let text = value.as_text()?;
                let actual = text.chars().count();
                (actual > max).then_some(ErrorKind::MaxLength { max, actual })
            }
            Rule::Email => {
                let text = value.as_text()?;
                if text.is_empty() || looks_like_email(text) {
                    None
                } else {
                    Some(ErrorKind::Email)
                }
            }
            Rule::Range { min, max } => {
                if value.is_null() {
                    return None;
                }
                match value.as_number() {
                    Some(n) if n >= min && n <= max => None,
                    _ => Some(ErrorKind::Range { min, max }),
                }
            }
        }
    }
}

/// Basic email shape: exactly one `@`, non-empty local and domain parts, no
/// whitespace anywhere.
fn looks_like_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = text.splitn(3, '@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}
