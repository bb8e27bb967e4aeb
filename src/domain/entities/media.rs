use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An image reference as stored in the `thumbnail` / `images` columns.
///
/// Only `url` is interpreted. Every other key (`alt`, `width`, `height`,
/// provider ids, captions) is kept as submitted so descriptors read back
/// exactly as they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaAsset {
    pub fn new(url: impl Into<String>) -> Self {
        MediaAsset { url: url.into(), extra: Map::new() }
    }

    pub fn alt(&self) -> Option<&str> {
        self.extra.get("alt").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let submitted = json!({
            "url": "a.png",
            "publicId": "cld/123",
            "caption": "Cover",
            "alt": "Logo sheet",
            "width": 640.5
        });

        let asset: MediaAsset = serde_json::from_value(submitted.clone()).unwrap();
        assert_eq!(asset.url, "a.png");
        assert_eq!(asset.alt(), Some("Logo sheet"));
        assert_eq!(serde_json::to_value(&asset).unwrap(), submitted);
    }

    #[test]
    fn bare_url_serializes_without_extra_keys() {
        let value = serde_json::to_value(MediaAsset::new("a.png")).unwrap();
        assert_eq!(value, json!({"url": "a.png"}));
    }
}
