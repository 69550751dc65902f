//! Lenient decoding of catalog payloads into normalized entries.
//!
//! The envelope must be well formed; individual records are best effort.
//! Records without a usable ID or title are dropped, everything else that is
//! missing or malformed falls back to an empty value.

use crate::api::types::{DataResponse, ItemResponse, WireEntry, WireRecommendation};
use crate::error::{CatalogError, Result};
use reqwest::Url;
use serde_json::Value;
use shared::{Category, Entry};
use tracing::debug;

/// Convert a wire record into an entry, or `None` if it lacks an ID or title
pub fn entry_from_wire(wire: WireEntry) -> Option<Entry> {
    let id = wire
        .mal_id
        .filter(|&id| id > 0)
        .and_then(|id| u32::try_from(id).ok())?;

    let title = wire
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| fallback_title(&wire))?;

    let image_url = wire
        .images
        .as_ref()
        .and_then(|images| {
            let jpg = images.jpg.as_ref().and_then(|set| set.image_url.clone());
            let webp = images.webp.as_ref().and_then(|set| set.image_url.clone());
            jpg.filter(|u| is_absolute_url(u))
                .or_else(|| webp.filter(|u| is_absolute_url(u)))
        })
        .unwrap_or_default();

    let score = wire
        .score
        .filter(|s| s.is_finite() && (0.0..=10.0).contains(s));

    Some(Entry {
        id,
        title,
        image_url,
        url: wire.url.filter(|u| is_absolute_url(u)).unwrap_or_default(),
        synopsis: wire.synopsis.unwrap_or_default(),
        score,
        status: wire.status.unwrap_or_default(),
        kind: wire.kind.unwrap_or_default(),
    })
}

/// Pick the "Default" alternate title, else the first non-empty one
fn fallback_title(wire: &WireEntry) -> Option<String> {
    let usable = |t: &&crate::api::types::WireTitle| {
        t.title.as_deref().map(str::trim).is_some_and(|s| !s.is_empty())
    };

    wire.titles
        .iter()
        .filter(usable)
        .find(|t| t.title_type.as_deref() == Some("Default"))
        .or_else(|| wire.titles.iter().find(usable))
        .and_then(|t| t.title.as_deref())
        .map(|t| t.trim().to_string())
}

fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Decode a single raw record, dropping it if it can't be used
fn entry_from_value(value: Value) -> Option<Entry> {
    serde_json::from_value::<WireEntry>(value)
        .ok()
        .and_then(entry_from_wire)
}

/// Decode a `{data: [...]}` list envelope
pub fn decode_list(body: &str) -> Result<Vec<Entry>> {
    let response: DataResponse = serde_json::from_str(body)?;
    let total = response.data.len();

    let entries: Vec<Entry> = response
        .data
        .into_iter()
        .filter_map(entry_from_value)
        .collect();

    if entries.len() < total {
        debug!(
            total = total,
            kept = entries.len(),
            "Dropped malformed entries"
        );
    }

    Ok(entries)
}

/// Decode a `{data: [{entry: [...]}]}` recommendations envelope
///
/// Each recommendation's entry list is flattened in order.
pub fn decode_recommendations(body: &str) -> Result<Vec<Entry>> {
    let response: DataResponse = serde_json::from_str(body)?;

    let entries: Vec<Entry> = response
        .data
        .into_iter()
        .filter_map(|value| serde_json::from_value::<WireRecommendation>(value).ok())
        .flat_map(|rec| rec.entry.into_iter())
        .filter_map(entry_from_value)
        .collect();

    Ok(entries)
}

/// Decode the list envelope used by a category's endpoint
pub fn decode_page(category: Category, body: &str) -> Result<Vec<Entry>> {
    match category {
        Category::Manga => decode_list(body),
        Category::Recommendations => decode_recommendations(body),
    }
}

/// Decode a `{data: {...}}` detail envelope
pub fn decode_item(body: &str) -> Result<Entry> {
    let response: ItemResponse = serde_json::from_str(body)?;

    if !response.data.is_object() {
        return Err(CatalogError::Decode("data is not an object".to_string()));
    }

    entry_from_value(response.data)
        .ok_or_else(|| CatalogError::Decode("entry is missing mal_id or title".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_keeps_order() {
        let body = r#"{"data":[
            {"mal_id":1,"title":"A","images":{"jpg":{"image_url":"https://cdn.myanimelist.net/images/manga/1.jpg"}},"synopsis":"first","score":9.1,"status":"Publishing","type":"Manga"},
            {"mal_id":2,"title":"B"}
        ]}"#;

        let entries = decode_list(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].title, "A");
        assert_eq!(
            entries[0].image_url,
            "https://cdn.myanimelist.net/images/manga/1.jpg"
        );
        assert_eq!(entries[0].score, Some(9.1));
        assert_eq!(entries[0].kind, "Manga");
        assert_eq!(entries[1].title, "B");
        assert_eq!(entries[1].synopsis, "");
        assert_eq!(entries[1].score, None);
    }

    #[test]
    fn test_decode_list_drops_invalid_elements() {
        let body = r#"{"data":[
            {"mal_id":1,"title":"A"},
            {"title":"no id"},
            {"mal_id":0,"title":"zero id"},
            {"mal_id":-4,"title":"negative id"},
            {"mal_id":5,"title":"   "},
            {"mal_id":6},
            "not an object",
            42,
            {"mal_id":"7","title":"string id"},
            {"mal_id":8,"title":"H"}
        ]}"#;

        let entries = decode_list(body).unwrap();
        let ids: Vec<u32> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 8]);
    }

    #[test]
    fn test_decode_list_rejects_bad_envelope() {
        assert!(decode_list("<html>502 Bad Gateway</html>").unwrap_err().is_decode());
        assert!(decode_list(r#"{"items":[]}"#).unwrap_err().is_decode());
        assert!(decode_list(r#"{"data":{"mal_id":1}}"#).unwrap_err().is_decode());
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(decode_list(r#"{"data":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_title_falls_back_to_titles_list() {
        let body = r#"{"data":[
            {"mal_id":3,"title":"","titles":[{"type":"Japanese","title":"ベルセルク"},{"type":"Default","title":"Berserk"}]},
            {"mal_id":4,"titles":[{"type":"Synonym","title":""},{"type":"English","title":"Vagabond"}]}
        ]}"#;

        let entries = decode_list(body).unwrap();
        assert_eq!(entries[0].title, "Berserk");
        assert_eq!(entries[1].title, "Vagabond");
    }

    #[test]
    fn test_out_of_range_score_is_absent() {
        let body = r#"{"data":[
            {"mal_id":1,"title":"A","score":11.5},
            {"mal_id":2,"title":"B","score":-1},
            {"mal_id":3,"title":"C","score":0}
        ]}"#;

        let entries = decode_list(body).unwrap();
        assert_eq!(entries[0].score, None);
        assert_eq!(entries[1].score, None);
        assert_eq!(entries[2].score, Some(0.0));
    }

    #[test]
    fn test_relative_image_url_is_dropped() {
        let body = r#"{"data":[
            {"mal_id":1,"title":"A","images":{"jpg":{"image_url":"/images/1.jpg"}}},
            {"mal_id":2,"title":"B","images":{"jpg":{"image_url":null},"webp":{"image_url":"https://cdn.example.com/2.webp"}}}
        ]}"#;

        let entries = decode_list(body).unwrap();
        assert_eq!(entries[0].image_url, "");
        assert!(entries[0].needs_placeholder());
        assert_eq!(entries[1].image_url, "https://cdn.example.com/2.webp");
    }

    #[test]
    fn test_decode_recommendations_flattens_entries() {
        let body = r#"{"data":[
            {"mal_id":"1-2","entry":[{"mal_id":1,"title":"A"},{"mal_id":2,"title":"B"}],"content":"x"},
            {"mal_id":"3-4","entry":[{"mal_id":3,"title":"C"},{"url":"missing id"}]},
            {"mal_id":"5-6","entry":"broken"}
        ]}"#;

        let entries = decode_recommendations(body).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_decode_item() {
        let entry =
            decode_item(r#"{"data":{"mal_id":2,"title":"Berserk","status":"Publishing"}}"#).unwrap();
        assert_eq!(entry.id, 2);
        assert_eq!(entry.status, "Publishing");

        assert!(decode_item(r#"{"data":{"title":"no id"}}"#).unwrap_err().is_decode());
        assert!(decode_item(r#"{"data":[]}"#).unwrap_err().is_decode());
        assert!(decode_item(r#"{"status":404,"message":"Not Found"}"#)
            .unwrap_err()
            .is_decode());
    }
}
