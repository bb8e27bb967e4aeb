//! Normalization of JSONB columns.
//!
//! Rows written by older clients (or through drivers that stringify JSON)
//! hold a JSON-encoded string instead of the structure itself. Every row
//! conversion goes through [`decode_or_default`] so callers only ever see
//! native structures.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a column value that is either the structure itself or a string
/// containing its JSON encoding.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::String(raw) => serde_json::from_str::<T>(&raw)
            .or_else(|_| serde_json::from_value(Value::String(raw))),
        other => serde_json::from_value(other),
    }
}

/// Lenient variant used at the row boundary: `NULL` and undecodable content
/// both yield the empty value for `T`.
pub fn decode_or_default<T>(column: &str, value: impl Into<Option<Value>>) -> T
where
    T: DeserializeOwned + Default,
{
    match value.into() {
        None | Some(Value::Null) => T::default(),
        Some(value) => decode(value).unwrap_or_else(|e| {
            tracing::warn!(column, error = %e, "Malformed JSON column, using empty value");
            T::default()
        }),
    }
}

/// Element-wise variant for array columns: an entry that does not decode is
/// dropped on its own instead of emptying the whole list.
pub fn decode_list_or_default<T>(column: &str, value: impl Into<Option<Value>>) -> Vec<T>
where
    T: DeserializeOwned,
{
    let items: Vec<Value> = decode_or_default(column, value);

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match decode(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(column, index, error = %e, "Malformed JSON entry, skipping it");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn native_structures_pass_through() {
        let tags: Vec<String> = decode(json!(["logo", "brand"])).unwrap();
        assert_eq!(tags, vec!["logo", "brand"]);
    }

    #[test]
    fn encoded_strings_are_parsed() {
        let tags: Vec<String> = decode(json!(r#"["logo","brand"]"#)).unwrap();
        assert_eq!(tags, vec!["logo", "brand"]);

        let socials: BTreeMap<String, String> =
            decode(json!(r#"{"github":"https://github.com/me"}"#)).unwrap();
        assert_eq!(socials["github"], "https://github.com/me");
    }

    #[test]
    fn plain_strings_still_decode_into_string_targets() {
        let value: String = decode(json!("2021")).unwrap();
        assert_eq!(value, "2021");

        let value: String = decode(json!("hello")).unwrap();
        assert_eq!(value, "hello");
    }

    #[test]
    fn null_and_missing_fall_back_to_default() {
        let tags: Vec<String> = decode_or_default("tags", Value::Null);
        assert!(tags.is_empty());

        let hero: Option<BTreeMap<String, String>> = decode_or_default("hero", None);
        assert!(hero.is_none());
    }

    #[test]
    fn malformed_content_falls_back_to_default() {
        let tags: Vec<String> = decode_or_default("tags", json!("[not json"));
        assert!(tags.is_empty());

        let tags: Vec<String> = decode_or_default("tags", json!({"unexpected": true}));
        assert!(tags.is_empty());
    }

    #[test]
    fn encoded_null_is_absent() {
        let hero: Option<BTreeMap<String, String>> = decode_or_default("hero", json!("null"));
        assert!(hero.is_none());
    }

    #[test]
    fn list_decoding_keeps_the_valid_entries() {
        let urls: Vec<BTreeMap<String, String>> = decode_list_or_default(
            "images",
            json!([{"url": "a.png"}, 42, {"url": "b.png"}]),
        );
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1]["url"], "b.png");
    }

    #[test]
    fn list_decoding_accepts_an_encoded_array() {
        let tags: Vec<String> = decode_list_or_default("tags", json!(r#"["logo","brand"]"#));
        assert_eq!(tags, vec!["logo", "brand"]);
    }
}
