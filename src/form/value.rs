//! Leaf values and the external value-tree shape used by `set_all`/`patch`.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A primitive form value held by a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Empty for presence checks: null or empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(t) => t.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Numeric view of the value. Numeric text coerces, since form inputs
    /// deliver text even for number fields; NaN is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            Value::Text(t) => t.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

/// The shape of a whole form value: a tree of leaves, named groups, and
/// ordered lists. This is what `set_all`/`patch` consume and what
/// `FormModel::value` and `save` produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Leaf(Value),
    Group(Vec<(String, ValueTree)>),
    List(Vec<ValueTree>),
}

impl ValueTree {
    pub fn leaf(value: impl Into<Value>) -> Self {
        ValueTree::Leaf(value.into())
    }

    pub fn text(s: impl Into<String>) -> Self {
        ValueTree::Leaf(Value::text(s))
    }

    pub fn group<S: Into<String>>(entries: impl IntoIterator<Item = (S, ValueTree)>) -> Self {
        ValueTree::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(entries: impl IntoIterator<Item = ValueTree>) -> Self {
        ValueTree::List(entries.into_iter().collect())
    }

    /// Look up a direct child of a group entry by name.
    pub fn get(&self, name: &str) -> Option<&ValueTree> {
        match self {
            ValueTree::Group(entries) => {
                entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Replace a group entry's value, or append it if the name is new.
    /// No-op on leaves and lists.
    pub fn set(&mut self, name: &str, value: ValueTree) {
        if let ValueTree::Group(entries) = self {
            match entries.iter_mut().find(|(k, _)| k == name) {
                Some((_, slot)) => *slot = value,
                None => entries.push((name.to_string(), value)),
            }
        }
    }
}

// Hand-rolled so groups serialize as JSON objects in declaration order
// (a derived impl on Vec<(String, _)> would emit an array of pairs).
impl Serialize for ValueTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValueTree::Leaf(value) => value.serialize(serializer),
            ValueTree::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, child) in entries {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
            ValueTree::List(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for child in entries {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values() {
        assert!(Value::Null.is_empty());
        assert!(Value::text("").is_empty());
        assert!(!Value::text("x").is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn numeric_text_coerces() {
        assert_eq!(Value::text("4").as_number(), Some(4.0));
        assert_eq!(Value::text(" 4.5 ").as_number(), Some(4.5));
        assert_eq!(Value::text("four").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
    }

    #[test]
    fn group_serializes_as_object() {
        let tree = ValueTree::group([
            ("firstName", ValueTree::text("Jack")),
            ("rating", ValueTree::leaf(Value::Null)),
            ("sendCatalog", ValueTree::leaf(true)),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"firstName":"Jack","rating":null,"sendCatalog":true}"#
        );
    }
}
