//! Resolved entries: the flat result of parsing, keyed by dotted path.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::value::Value;

/// Root-to-leaf sequence of key segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined with `.`.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// Extend the path with one more segment.
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Value of a resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// `key: value`.
    Scalar(String),
    /// A run of `- item` lines or an inline `[a, b]` list.
    Sequence(Vec<String>),
    /// Joined lines of a block scalar.
    BlockText(String),
}

impl EntryValue {
    /// Returns the text of a scalar or block value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntryValue::Scalar(s) | EntryValue::BlockText(s) => Some(s),
            EntryValue::Sequence(_) => None,
        }
    }

    /// Returns the items of a sequence value.
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            EntryValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Short description of the value's shape, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            EntryValue::Scalar(s) | EntryValue::BlockText(s) => s.clone(),
            EntryValue::Sequence(items) => format!("[{}]", items.join(", ")),
        }
    }
}

/// A resolved `(path, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: KeyPath,
    pub value: EntryValue,
}

/// A non-fatal problem noticed while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Line that fits none of the grammar's line shapes.
    UnrecognizedLine { line_num: usize, text: String },
    /// Sequence items with no key to attach them to.
    OrphanSequence { line_num: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognizedLine { line_num, text } => {
                write!(f, "line {}: unrecognized line \"{}\" ignored", line_num + 1, text)
            }
            Warning::OrphanSequence { line_num } => {
                write!(f, "line {}: sequence has no owning key", line_num + 1)
            }
        }
    }
}

/// The parse result: entries keyed by dotted path, later writes winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: BTreeMap<String, Entry>,
    warnings: Vec<Warning>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any earlier entry with the same dotted path.
    /// A literal `a.b` key and a nested `a` / `b` path share one entry.
    /// Returns the replaced entry.
    pub fn insert(&mut self, path: KeyPath, value: EntryValue) -> Option<Entry> {
        self.entries.insert(path.dotted(), Entry { path, value })
    }

    pub(crate) fn warn(&mut self, warning: Warning) {
        tracing::warn!(%warning, "line skipped");
        self.warnings.push(warning);
    }

    /// Look up the value at a dotted path.
    pub fn get(&self, dotted: &str) -> Option<&EntryValue> {
        self.entries.get(dotted).map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries ordered by dotted path.
    pub fn entries(&self) -> btree_map::Values<'_, String, Entry> {
        self.entries.values()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Distinct first path segments.
    pub fn root_keys(&self) -> BTreeSet<&str> {
        self.entries.values().filter_map(|e| e.path.first()).collect()
    }

    /// Build the nested tree view of this document.
    ///
    /// Entries are applied in path order; where a scalar and a nested key share a
    /// prefix (`a: 1` and `a.b: 2`), the nested structure wins.
    pub fn to_value(&self) -> Value {
        let mut root = BTreeMap::new();
        for entry in self.entries.values() {
            let leaf = match &entry.value {
                EntryValue::Scalar(s) | EntryValue::BlockText(s) => Value::String(s.clone()),
                EntryValue::Sequence(items) => Value::List(items.clone()),
            };
            insert_at(&mut root, entry.path.segments(), leaf);
        }
        Value::Map(root)
    }
}

fn insert_at(map: &mut BTreeMap<String, Value>, segments: &[String], leaf: Value) {
    match segments {
        [] => {}
        [last] => {
            // Keep an existing subtree over a scalar
            if !matches!(map.get(last), Some(Value::Map(_))) {
                map.insert(last.clone(), leaf);
            }
        }
        [head, rest @ ..] => {
            let slot = map
                .entry(head.clone())
                .or_insert_with(|| Value::Map(BTreeMap::new()));
            if !matches!(slot, Value::Map(_)) {
                *slot = Value::Map(BTreeMap::new());
            }
            if let Value::Map(inner) = slot {
                insert_at(inner, rest, leaf);
            }
        }
    }
}
