//! CBOR transcoding: render a yamlite value tree as CBOR binary data.
//!
//! Mapping:
//!   - Value::String -> CBOR text string
//!   - Value::List   -> CBOR array of text strings (determinate length)
//!   - Value::Map    -> CBOR map (determinate length, text string keys,
//!     sorted by key)

use ciborium::value::Value as CborValue;
use libyamlite::Value;

/// Encode a yamlite Value as CBOR bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&value_to_cbor(value), &mut buf)
        .map_err(|e| format!("CBOR encode error: {}", e))?;
    Ok(buf)
}

fn value_to_cbor(value: &Value) -> CborValue {
    match value {
        Value::String(s) => CborValue::Text(s.clone()),
        Value::List(items) => {
            CborValue::Array(items.iter().map(|s| CborValue::Text(s.clone())).collect())
        }
        Value::Map(map) => CborValue::Map(
            map.iter()
                .map(|(k, v)| (CborValue::Text(k.clone()), value_to_cbor(v)))
                .collect(),
        ),
    }
}
