//! YAML transcoding: render a yamlite value tree as YAML text.
//!
//! Mapping:
//!   - Value::String -> YAML string
//!   - Value::List   -> YAML sequence of strings
//!   - Value::Map    -> YAML mapping (keys in sorted order)
//!
//! Every scalar stays a string; serde_yaml quotes values such as `8080` or
//! `true` so that they read back as strings.

use libyamlite::Value;

/// Encode a yamlite Value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let yaml_value = value_to_yaml(value);
    serde_yaml::to_string(&yaml_value).map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::List(items) => serde_yaml::Value::Sequence(
            items
                .iter()
                .map(|s| serde_yaml::Value::String(s.clone()))
                .collect(),
        ),
        Value::Map(map) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (k, v) in map {
                mapping.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(mapping)
        }
    }
}
