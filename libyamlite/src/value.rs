//! Nested tree view of a parsed document.

use std::collections::BTreeMap;
use std::fmt;

/// A node of the document tree.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar or block text.
    String(String),
    /// Sequence of scalars.
    List(Vec<String>),
    /// Mapping of keys to nodes.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns a reference to the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns a reference to the map if this is a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Follow a dotted path through nested maps.
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        dotted
            .split('.')
            .try_fold(self, |node, key| node.as_map()?.get(key))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Map(map) => f.debug_map().entries(map).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_walks_maps() {
        let mut inner = BTreeMap::new();
        inner.insert("port".to_string(), Value::from("80"));
        let mut root = BTreeMap::new();
        root.insert("server".to_string(), Value::from(inner));
        let value = Value::from(root);

        assert_eq!(value.get("server.port").and_then(Value::as_str), Some("80"));
        assert!(value.get("server.port.extra").is_none());
        assert!(value.get("missing").is_none());
    }

    #[test]
    fn test_debug_format() {
        let value = Value::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(format!("{:?}", value), "[\"a\", \"b\"]");
    }
}
