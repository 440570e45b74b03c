use serde_json::{Map, Value};

/// A string field of a document, ignoring non-string and empty values.
pub fn non_empty_str<'a>(document: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    document
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Interpret a JSON value as a document's field set.
pub fn as_document(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}
