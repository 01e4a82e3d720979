use crate::error::EnvelopeError;
use serde_json::{Map, Value};

/// Compact JSON with object keys sorted at every level.
///
/// Two semantically equal documents produce the same bytes, so their signatures match.
///
/// ```rust
/// use rcfg_signing::canonical_json;
/// use serde_json::json;
///
/// let bytes = canonical_json(&json!({ "b": 1, "a": { "d": [], "c": null } })).unwrap();
/// assert_eq!(bytes, br#"{"a":{"c":null,"d":[]},"b":1}"#);
/// ```
///
/// # Errors
/// [`EnvelopeError::Json`] if serialization fails.
pub fn canonical_json(document: &Value) -> Result<Vec<u8>, EnvelopeError> {
    Ok(serde_json::to_vec(&sorted(document))?)
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries.into_iter().map(|(key, value)| (key.clone(), sorted(value))).collect::<Map<_, _>>(),
            )
        },
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
