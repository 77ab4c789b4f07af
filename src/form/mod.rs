//! The form model: a tree of fields, groups, and lists with validation state.
//!
//! # Architecture
//!
//! ```text
//! mutation ──→ FormModel ──→ revalidate ──→ ChangeEvent
//!                 │                             │
//!                 └── value()/errors ←── consumers (messages, bindings)
//! ```
//!
//! All mutations and rule evaluation run synchronously on the caller's
//! thread. The [`ChangeNotifier`](crate::notify::ChangeNotifier) stream feeds
//! asynchronous consumers such as the debounced message derivation.

mod control;
mod error;
mod value;

pub use control::{Control, Field, Group, List};
pub use error::FormError;
pub use value::{Value, ValueTree};

use tokio::sync::broadcast;

use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::validate::Rule;

/// A form instance: the root control group plus its change stream.
///
/// Controls are addressed by dotted path, with list entries by index:
/// `"firstName"`, `"emailGroup.email"`, `"addresses.1.street1"`.
pub struct FormModel {
    root: Group,
    notifier: ChangeNotifier,
}

impl FormModel {
    /// Build a model from its root group and run the initial validation pass.
    pub fn new(mut root: Group) -> Self {
        root.revalidate();
        Self {
            root,
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    /// Snapshot of the whole form value.
    pub fn value(&self) -> ValueTree {
        self.root.value()
    }

    /// Subscribe to leaf value changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    pub fn control(&self, path: &str) -> Option<&Control> {
        resolve(&self.root, path)
    }

    pub fn field(&self, path: &str) -> Option<&Field> {
        self.control(path)?.as_field()
    }

    /// Apply user input to a field: sets the value, marks it dirty, and
    /// revalidates before emitting the change event.
    pub fn set_value(&mut self, path: &str, value: impl Into<Value>) -> Result<(), FormError> {
        let value = value.into();
        let field = resolve_field_mut(&mut self.root, path)?;
        field.input(value.clone());
        self.root.revalidate();
        tracing::debug!(path, "field value set");
        self.notifier.emit(path, &value);
        Ok(())
    }

    /// Record that the user interacted with a field (blur).
    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        resolve_field_mut(&mut self.root, path)?.mark_touched();
        self.root.revalidate();
        Ok(())
    }

    /// Replace a field's rule set and revalidate it immediately.
    pub fn set_validators(&mut self, path: &str, rules: Vec<Rule>) -> Result<(), FormError> {
        resolve_field_mut(&mut self.root, path)?.set_rules(rules);
        self.root.revalidate();
        tracing::debug!(path, "validators replaced");
        Ok(())
    }

    /// Remove all rules from a field and revalidate it immediately.
    pub fn clear_validators(&mut self, path: &str) -> Result<(), FormError> {
        self.set_validators(path, Vec::new())
    }

    /// Replace every field's value atomically.
    ///
    /// The provided tree must exactly match the model's shape: every field
    /// present, no unknown keys, list lengths equal. Shape is checked in a
    /// read-only pass first, so a `ShapeMismatch` leaves the model unchanged.
    /// Status flags are not altered.
    pub fn set_all(&mut self, tree: &ValueTree) -> Result<(), FormError> {
        check_group_shape(&self.root, tree, "")?;
        let mut events = Vec::new();
        apply_group(&mut self.root, tree, "", &mut events);
        self.root.revalidate();
        tracing::info!(fields = events.len(), "form value replaced");
        for (path, value) in events {
            self.notifier.emit(&path, &value);
        }
        Ok(())
    }

    /// Merge partial values into matching fields. Unknown keys, shape
    /// mismatches, and list indices beyond the current length are ignored;
    /// fields not named in the tree keep their value. Never fails.
    pub fn patch(&mut self, tree: &ValueTree) {
        let mut events = Vec::new();
        patch_group(&mut self.root, tree, "", &mut events);
        self.root.revalidate();
        tracing::debug!(fields = events.len(), "form value patched");
        for (path, value) in events {
            self.notifier.emit(&path, &value);
        }
    }

    /// Append an entry to the list at `path`, returning the new length.
    pub fn push_entry(&mut self, path: &str, entry: Group) -> Result<usize, FormError> {
        let control = resolve_mut(&mut self.root, path).ok_or_else(|| FormError::unknown(path))?;
        let Control::List(list) = control else {
            return Err(FormError::shape(path, "not a list"));
        };
        list.push(entry);
        let len = list.len();
        self.root.revalidate();
        tracing::info!(path, len, "list entry appended");
        Ok(len)
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

// Walks a dotted path. A list consumes two segments at once (index, then a
// child name); a path cannot end on a bare list entry.
fn resolve<'a>(root: &'a Group, path: &str) -> Option<&'a Control> {
    let mut segments = path.split('.');
    let mut current = root.child(segments.next()?)?;
    while let Some(segment) = segments.next() {
        current = match current {
            Control::Group(group) => group.child(segment)?,
            Control::List(list) => {
                let entry = list.get(segment.parse::<usize>().ok()?)?;
                entry.child(segments.next()?)?
            }
            Control::Field(_) => return None,
        };
    }
    Some(current)
}

fn resolve_mut<'a>(root: &'a mut Group, path: &str) -> Option<&'a mut Control> {
    let mut segments = path.split('.');
    let mut current = root.child_mut(segments.next()?)?;
    while let Some(segment) = segments.next() {
        current = match current {
            Control::Group(group) => group.child_mut(segment)?,
            Control::List(list) => {
                let entry = list.get_mut(segment.parse::<usize>().ok()?)?;
                entry.child_mut(segments.next()?)?
            }
            Control::Field(_) => return None,
        };
    }
    Some(current)
}

fn resolve_field_mut<'a>(root: &'a mut Group, path: &str) -> Result<&'a mut Field, FormError> {
    match resolve_mut(root, path) {
        Some(Control::Field(field)) => Ok(field),
        Some(_) => Err(FormError::shape(path, "not a field")),
        None => Err(FormError::unknown(path)),
    }
}

// Read-only shape check for `set_all`: exact key set, matching kinds, equal
// list lengths.
fn check_group_shape(group: &Group, tree: &ValueTree, path: &str) -> Result<(), FormError> {
    let ValueTree::Group(entries) = tree else {
        return Err(FormError::shape(path, "expected a group value"));
    };
    for (name, _) in entries {
        if group.child(name).is_none() {
            return Err(FormError::shape(&join(path, name), "unknown key"));
        }
    }
    for (name, child) in group.entries() {
        let child_path = join(path, name);
        let Some(sub) = tree.get(name) else {
            return Err(FormError::shape(path, format!("missing key '{name}'")));
        };
        check_control_shape(child, sub, &child_path)?;
    }
    Ok(())
}

fn check_control_shape(control: &Control, tree: &ValueTree, path: &str) -> Result<(), FormError> {
    match control {
        Control::Field(_) => match tree {
            ValueTree::Leaf(_) => Ok(()),
            _ => Err(FormError::shape(path, "expected a leaf value")),
        },
        Control::Group(group) => check_group_shape(group, tree, path),
        Control::List(list) => {
            let ValueTree::List(items) = tree else {
                return Err(FormError::shape(path, "expected a list value"));
            };
            if items.len() != list.len() {
                return Err(FormError::shape(
                    path,
                    format!("expected {} list entries, got {}", list.len(), items.len()),
                ));
            }
            for (index, (entry, item)) in list.iter().zip(items).enumerate() {
                check_group_shape(entry, item, &join(path, &index.to_string()))?;
            }
            Ok(())
        }
    }
}

// Writes a shape-checked tree into the model, recording changed leaves.
fn apply_group(
    group: &mut Group,
    tree: &ValueTree,
    path: &str,
    events: &mut Vec<(String, Value)>,
) {
    for (name, child) in group.entries_mut() {
        let child_path = join(path, name);
        let Some(sub) = tree.get(name) else { continue };
        match (child, sub) {
            (Control::Field(field), ValueTree::Leaf(value)) => {
                field.assign(value.clone());
                events.push((child_path, value.clone()));
            }
            (Control::Group(inner), sub) => apply_group(inner, sub, &child_path, events),
            (Control::List(list), ValueTree::List(items)) => {
                for (index, (entry, item)) in list.iter_mut().zip(items).enumerate() {
                    apply_group(entry, item, &join(&child_path, &index.to_string()), events);
                }
            }
            _ => {}
        }
    }
}

// Best-effort merge for `patch`: anything that doesn't line up is skipped.
fn patch_group(
    group: &mut Group,
    tree: &ValueTree,
    path: &str,
    events: &mut Vec<(String, Value)>,
) {
    let ValueTree::Group(entries) = tree else { return };
    for (name, sub) in entries {
        let child_path = join(path, name);
        match group.child_mut(name) {
            Some(Control::Field(field)) => {
                if let ValueTree::Leaf(value) = sub {
                    field.assign(value.clone());
                    events.push((child_path, value.clone()));
                }
            }
            Some(Control::Group(inner)) => patch_group(inner, sub, &child_path, events),
            Some(Control::List(list)) => {
                if let ValueTree::List(items) = sub {
                    for (index, item) in items.iter().enumerate() {
                        if let Some(entry) = list.get_mut(index) {
                            patch_group(entry, item, &join(&child_path, &index.to_string()), events);
                        }
                    }
                }
            }
            None => {}
        }
    }
}
