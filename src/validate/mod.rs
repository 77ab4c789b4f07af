//! Validation engine: typed rules producing tagged error kinds.
//!
//! Rules are plain enums evaluated synchronously on every value or status
//! change. A failed rule contributes an [`ErrorKind`] to the owning control's
//! error set; validity is simply an empty error set. Each kind carries a
//! stable string code used as the key into the message catalog.

mod group;
mod rules;

pub use group::GroupRule;
pub use rules::Rule;

/// Why a rule rejected a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    /// Value is missing (null or empty text).
    Required,
    /// Text shorter than the configured minimum.
    MinLength { min: usize, actual: usize },
    /// Text longer than the configured maximum.
    MaxLength { max: usize, actual: usize },
    /// Text does not look like an email address.
    Email,
    /// Sibling fields that must agree do not.
    Match,
    /// Value is non-null and not a number in `[min, max]`.
    Range { min: f64, max: f64 },
}

impl ErrorKind {
    /// Stable key for message lookup and display wiring.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength { .. } => "minlength",
            ErrorKind::MaxLength { .. } => "maxlength",
            ErrorKind::Email => "email",
            ErrorKind::Match => "match",
            ErrorKind::Range { .. } => "range",
        }
    }
}

/// Seam shared by field-level and group-level rules: a pure predicate from a
/// target to at most one error kind.
pub trait Validate {
    type Target: ?Sized;

    fn validate(&self, target: &Self::Target) -> Option<ErrorKind>;
}
