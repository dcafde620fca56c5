//! Raw payload access helpers.

use serde_json::{Map, Value as Json};

/// Look up a field in a raw mapping, tolerating symbol-serialized keys.
///
/// Payloads that round-trip through symbol-keyed hashes arrive with `:name`
/// keys and must decode identically to plain string keys. Lookup is
/// case-sensitive on the normalized form.
pub(crate) fn lookup<'a>(obj: &'a Map<String, Json>, name: &str) -> Option<&'a Json> {
    if let Some(v) = obj.get(name) {
        return Some(v);
    }
    let mut symbol_form = String::with_capacity(name.len() + 1);
    symbol_form.push(':');
    symbol_form.push_str(name);
    obj.get(&symbol_form)
}

/// Strip the symbol marker from a key when carrying free-form mappings
/// through, so both key forms produce the same decoded map.
pub(crate) fn normalize_key(key: &str) -> &str {
    key.strip_prefix(':').unwrap_or(key)
}

/// Descriptive type name for a raw JSON value (for error messages).
pub(crate) fn json_type_name(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_both_key_forms() {
        let plain = serde_json::json!({ "status": "pending" });
        let symbolized = serde_json::json!({ ":status": "pending" });
        assert!(lookup(plain.as_object().unwrap(), "status").is_some());
        assert!(lookup(symbolized.as_object().unwrap(), "status").is_some());
        assert!(lookup(plain.as_object().unwrap(), "missing").is_none());
    }

    #[test]
    fn normalize_key_strips_one_marker() {
        assert_eq!(normalize_key(":applied"), "applied");
        assert_eq!(normalize_key("applied"), "applied");
    }
}
