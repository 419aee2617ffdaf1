//! TOML transcoding: render a yamlite value tree as TOML text.
//!
//! Mapping:
//!   - Value::String -> TOML string
//!   - Value::List   -> TOML array of strings
//!   - Value::Map    -> TOML table (keys in sorted order)
//!
//! The top-level value is always a map, so every document has a TOML form.

use libyamlite::Value;
use toml_edit::DocumentMut;

/// Encode a yamlite Value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    match value_to_toml(value) {
        toml_edit::Item::Table(table) => {
            let mut doc = DocumentMut::new();
            for (key, item) in table.iter() {
                doc[key] = item.clone();
            }
            Ok(doc.to_string())
        }
        _ => Err("TOML requires the top-level value to be a table".to_string()),
    }
}

fn value_to_toml(value: &Value) -> toml_edit::Item {
    match value {
        Value::String(s) => toml_edit::value(s.as_str()),
        Value::List(items) => {
            let array: toml_edit::Array = items.iter().map(String::as_str).collect();
            toml_edit::value(array)
        }
        Value::Map(map) => {
            let mut table = toml_edit::Table::new();
            for (k, v) in map {
                table.insert(k, value_to_toml(v));
            }
            toml_edit::Item::Table(table)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_tables() {
        let doc = libyamlite::parse("name: demo\ndb:\n  host: h\n  tags: [a, b]").unwrap();
        let text = encode(&doc.to_value()).unwrap();
        let back: DocumentMut = text.parse().unwrap();
        assert_eq!(back["name"].as_str(), Some("demo"));
        assert_eq!(back["db"]["host"].as_str(), Some("h"));
        assert_eq!(back["db"]["tags"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_encode_rejects_bare_scalar() {
        assert!(encode(&Value::from("x")).is_err());
    }
}
