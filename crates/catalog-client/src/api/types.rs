//! Jikan API v4 response types.
//!
//! These types represent the JSON responses from the Jikan API. Every field
//! is optional and tolerant of the wrong JSON type: a bad field decodes as
//! absent instead of failing the whole record.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deserialize a field, treating a type mismatch as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like `lenient`, for list fields
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Simple data wrapper (without pagination)
///
/// Elements are kept as raw JSON so one bad element can't sink the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<Value>,
}

/// Single-record wrapper (detail endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub data: Value,
}

/// Manga/anime record as returned by top, detail and snapshot payloads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub mal_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Option<WireImages>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub titles: Vec<WireTitle>,
    #[serde(default, deserialize_with = "lenient")]
    pub synopsis: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
}

/// Cover images
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireImages {
    #[serde(default, deserialize_with = "lenient")]
    pub jpg: Option<ImageSet>,
    #[serde(default, deserialize_with = "lenient")]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

/// Alternate title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireTitle {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub title_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
}

/// Recommendation pairing two entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireRecommendation {
    #[serde(default, deserialize_with = "lenient")]
    pub mal_id: Option<String>,
    /// Partial entries (id, url, images, title)
    #[serde(default, deserialize_with = "lenient_vec")]
    pub entry: Vec<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    pub status: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_types_decode_as_absent() {
        let entry: WireEntry = serde_json::from_str(
            r#"{"mal_id": 2, "title": "Berserk", "score": "n/a", "images": "none", "titles": 5}"#,
        )
        .unwrap();

        assert_eq!(entry.mal_id, Some(2));
        assert_eq!(entry.title.as_deref(), Some("Berserk"));
        assert_eq!(entry.score, None);
        assert!(entry.images.is_none());
        assert!(entry.titles.is_empty());
    }

    #[test]
    fn test_null_fields_decode_as_absent() {
        let entry: WireEntry =
            serde_json::from_str(r#"{"mal_id": 13, "title": "One Piece", "synopsis": null}"#)
                .unwrap();
        assert_eq!(entry.synopsis, None);
        assert_eq!(entry.kind, None);
    }

    #[test]
    fn test_recommendation_entries_kept_raw() {
        let rec: WireRecommendation = serde_json::from_str(
            r#"{"mal_id": "1-2", "entry": [{"mal_id": 1}, {"mal_id": 2}], "content": "similar"}"#,
        )
        .unwrap();
        assert_eq!(rec.entry.len(), 2);
        assert_eq!(rec.mal_id.as_deref(), Some("1-2"));
    }
}
