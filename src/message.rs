//! Error-code to display-text mapping and message derivation.

use std::collections::BTreeMap;

use crate::form::Field;

/// Ordered mapping from error codes to user-facing text.
///
/// Catalog order defines concatenation order when a field carries several
/// errors at once, so the defaults read sensibly ("Please enter your email
/// address." before "Please enter a valid email address.").
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    entries: Vec<(String, String)>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                (
                    "required".to_string(),
                    "Please enter your email address.".to_string(),
                ),
                (
                    "email".to_string(),
                    "Please enter a valid email address.".to_string(),
                ),
            ],
        }
    }
}

impl MessageCatalog {
    pub fn text_for(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == code)
            .map(|(_, v)| v.as_str())
    }

    /// Apply configured overrides: known codes are replaced in place (keeping
    /// catalog order), unknown codes are appended.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (code, text) in overrides {
            match self.entries.iter_mut().find(|(k, _)| k == code) {
                Some((_, slot)) => *slot = text.clone(),
                None => self.entries.push((code.clone(), text.clone())),
            }
        }
    }

    /// Derive the display string for a field: empty unless the field has been
    /// interacted with (touched or dirty) and carries errors; otherwise the
    /// catalog text for each active code, in catalog order, joined by a
    /// single space. Codes without catalog text are skipped.
    pub fn derive(&self, field: &Field) -> String {
        if !(field.is_touched() || field.is_dirty()) || field.is_valid() {
            return String::new();
        }
        self.entries
            .iter()
            .filter(|(code, _)| field.errors().iter().any(|e| e.code() == code))
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
