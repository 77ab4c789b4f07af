//! The control tree: fields, groups, and repeatable lists.

use crate::validate::{ErrorKind, GroupRule, Rule, Validate};

use super::value::{Value, ValueTree};

/// A leaf value holder with validation state.
///
/// `dirty` means the value was changed through user input (`pristine` is its
/// negation); `touched` means the user interacted with the field at all. Bulk
/// operations (`set_all`/`patch`) change values without touching either flag.
#[derive(Debug, Clone)]
pub struct Field {
    value: Value,
    dirty: bool,
    touched: bool,
    rules: Vec<Rule>,
    errors: Vec<ErrorKind>,
}

impl Field {
    pub fn new(value: impl Into<Value>, rules: Vec<Rule>) -> Self {
        let mut field = Self {
            value: value.into(),
            dirty: false,
            touched: false,
            rules,
            errors: Vec::new(),
        };
        field.revalidate();
        field
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_untouched(&self) -> bool {
        !self.touched
    }

    /// Active errors, in rule order. Computed even while the field is
    /// untouched; display gating is the consumer's concern.
    pub fn errors(&self) -> &[ErrorKind] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Replace the value without altering status flags (bulk operations).
    pub(crate) fn assign(&mut self, value: Value) {
        self.value = value;
    }

    /// Replace the value as user input: marks the field dirty. Touched is a
    /// separate interaction flag (set on blur by the binding layer).
    pub(crate) fn input(&mut self, value: Value) {
        self.value = value;
        self.dirty = true;
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub(crate) fn revalidate(&mut self) {
        self.errors = self
            .rules
            .iter()
            .filter_map(|rule| rule.validate(&self.value))
            .collect();
    }
}

/// Named collection of child controls with its own cross-field rules.
#[derive(Debug, Clone, Default)]
pub struct Group {
    entries: Vec<(String, Control)>,
    rules: Vec<GroupRule>,
    errors: Vec<ErrorKind>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, field: Field) -> Self {
        self.entries.push((name.to_string(), Control::Field(field)));
        self
    }

    pub fn with_group(mut self, name: &str, group: Group) -> Self {
        self.entries.push((name.to_string(), Control::Group(group)));
        self
    }

    pub fn with_list(mut self, name: &str, list: List) -> Self {
        self.entries.push((name.to_string(), Control::List(list)));
        self
    }

    pub fn with_rule(mut self, rule: GroupRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn child(&self, name: &str) -> Option<&Control> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, c)| c)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == name)
            .map(|(_, c)| c)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        match self.child(name)? {
            Control::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Control)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut Control)> {
        self.entries.iter_mut().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Errors from this group's own rules; child errors live on the children.
    pub fn errors(&self) -> &[ErrorKind] {
        &self.errors
    }

    /// Valid iff every child is valid and the group's own rules pass.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.entries.iter().all(|(_, c)| c.is_valid())
    }

    pub(crate) fn revalidate(&mut self) {
        for (_, child) in &mut self.entries {
            child.revalidate();
        }
        // Group rules read the freshly revalidated children.
        let rules = self.rules.clone();
        let mut errors = Vec::new();
        for rule in rules {
            if let Some(error) = rule.validate(self) {
                errors.push(error);
            }
        }
        self.errors = errors;
    }

    pub fn value(&self) -> ValueTree {
        ValueTree::Group(
            self.entries
                .iter()
                .map(|(name, child)| (name.clone(), child.value()))
                .collect(),
        )
    }
}

/// Ordered sequence of identically-shaped group entries (e.g. addresses).
#[derive(Debug, Clone, Default)]
pub struct List {
    entries: Vec<Group>,
}

impl List {
    pub fn new(entries: Vec<Group>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: Group) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.entries.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.entries.iter_mut()
    }

    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(Group::is_valid)
    }

    pub fn value(&self) -> ValueTree {
        ValueTree::List(self.entries.iter().map(Group::value).collect())
    }
}

/// A node in the form tree.
#[derive(Debug, Clone)]
pub enum Control {
    Field(Field),
    Group(Group),
    List(List),
}

impl Control {
    pub fn is_valid(&self) -> bool {
        match self {
            Control::Field(f) => f.is_valid(),
            Control::Group(g) => g.is_valid(),
            Control::List(l) => l.is_valid(),
        }
    }

    pub(crate) fn revalidate(&mut self) {
        match self {
            Control::Field(f) => f.revalidate(),
            Control::Group(g) => g.revalidate(),
            Control::List(l) => {
                for entry in l.iter_mut() {
                    entry.revalidate();
                }
            }
        }
    }

    pub fn value(&self) -> ValueTree {
        match self {
            Control::Field(f) => ValueTree::Leaf(f.value().clone()),
            Control::Group(g) => g.value(),
            Control::List(l) => l.value(),
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Control::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Control::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Control::List(l) => Some(l),
            _ => None,
        }
    }
}
