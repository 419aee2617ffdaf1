//! Encode parsed documents to text formats.
//!
//! YAML, TOML and CBOR renderings live in the CLI, which uses dedicated
//! libraries for them.

use crate::document::{Document, EntryValue};
use crate::value::Value;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One `a.b.c = "value"` line per entry, ordered by path
    Paths,
    /// JSON (standard) of the nested tree view
    Json,
}

/// Encode a document to a string in the specified format.
pub fn encode(doc: &Document, format: Format) -> String {
    match format {
        Format::Paths => encode_paths(doc),
        Format::Json => encode_json(&doc.to_value(), 0),
    }
}

// =============================================================================
// Paths Encoder
// =============================================================================

fn encode_paths(doc: &Document) -> String {
    let mut out = String::new();
    for entry in doc.entries() {
        let value = match &entry.value {
            EntryValue::Scalar(s) | EntryValue::BlockText(s) => encode_json_string(s),
            EntryValue::Sequence(items) => encode_inline_list(items),
        };
        out.push_str(&format!("{} = {}\n", entry.path, value));
    }
    out
}

fn encode_inline_list(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|s| encode_json_string(s)).collect();
    format!("[{}]", items.join(", "))
}

// =============================================================================
// JSON Encoder
// =============================================================================

fn encode_json(value: &Value, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let pad1 = "  ".repeat(indent + 1);

    match value {
        Value::String(s) => encode_json_string(s),
        Value::List(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else {
                format!(
                    "[\n{}\n{}]",
                    items
                        .iter()
                        .map(|s| format!("{}{}", pad1, encode_json_string(s)))
                        .collect::<Vec<_>>()
                        .join(",\n"),
                    pad
                )
            }
        }
        Value::Map(map) => {
            if map.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{}{}: {}",
                            pad1,
                            encode_json_string(k),
                            encode_json(v, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{}}}", items.join(",\n"), pad)
            }
        }
    }
}

fn encode_json_string(s: &str) -> String {
    let mut result = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0c' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
