//! Data models for the catalog.
//!
//! This module defines the normalized records handed to the UI layer:
//! catalog entries, list categories and pages, and where a page came from.

use serde::{Deserialize, Serialize};

/// A single catalog item (manga or anime)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: u32,                // MyAnimeList ID, primary key
    pub title: String,          // Never empty
    pub image_url: String,      // Absolute URL or empty
    pub url: String,            // Upstream page, may be empty
    pub synopsis: String,

    /// Score in [0, 10]; `None` when upstream has no score
    pub score: Option<f64>,

    // Free-form upstream vocabulary
    pub status: String,
    pub kind: String,
}

impl Entry {
    /// Whether the renderer should substitute a placeholder image
    pub fn needs_placeholder(&self) -> bool {
        self.image_url.is_empty()
    }
}

/// List endpoints exposed by the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Manga,
    Recommendations,
}

impl Category {
    /// All categories, in snapshot lookup order
    pub const ALL: [Category; 2] = [Category::Manga, Category::Recommendations];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Manga => "manga",
            Category::Recommendations => "recommendations",
        }
    }

    /// File name of the bundled snapshot for this category
    pub fn snapshot_file_name(&self) -> &'static str {
        match self {
            Category::Manga => "top_manga.json",
            Category::Recommendations => "recommendations_manga.json",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manga" | "top" => Ok(Category::Manga),
            "recommendations" | "recs" => Ok(Category::Recommendations),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

/// Where the entries of a page came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageSource {
    /// Decoded from a live API response (may legitimately be empty)
    Network,
    /// Loaded from the bundled local snapshot
    Snapshot,
    /// Network and snapshot both failed; the page is empty
    Unavailable { reason: String },
}

/// Ordered list of entries from a list endpoint, in upstream ranking order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    pub category: Category,
    pub entries: Vec<Entry>,
    pub source: PageSource,
}

impl CatalogPage {
    pub fn new(category: Category, entries: Vec<Entry>, source: PageSource) -> Self {
        Self {
            category,
            entries,
            source,
        }
    }

    /// Empty page substituted when nothing could be loaded
    pub fn unavailable(category: Category, reason: impl Into<String>) -> Self {
        Self::new(
            category,
            Vec::new(),
            PageSource::Unavailable {
                reason: reason.into(),
            },
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.source, PageSource::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, title: &str) -> Entry {
        Entry {
            id,
            title: title.to_string(),
            image_url: String::new(),
            url: String::new(),
            synopsis: String::new(),
            score: None,
            status: String::new(),
            kind: String::new(),
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("manga".parse::<Category>().unwrap(), Category::Manga);
        assert_eq!(
            "Recommendations".parse::<Category>().unwrap(),
            Category::Recommendations
        );
        assert!("anime".parse::<Category>().is_err());
    }

    #[test]
    fn test_unavailable_page() {
        let page = CatalogPage::unavailable(Category::Manga, "offline");
        assert!(page.is_empty());
        assert!(page.is_unavailable());

        let page = CatalogPage::new(Category::Manga, Vec::new(), PageSource::Network);
        assert!(page.is_empty());
        assert!(!page.is_unavailable());
    }

    #[test]
    fn test_page_placeholder() {
        let page = CatalogPage::new(
            Category::Manga,
            vec![entry(1, "A"), entry(2, "B")],
            PageSource::Network,
        );
        assert_eq!(page.len(), 2);
        assert!(page.entries.iter().all(|e| e.needs_placeholder()));
    }

    #[test]
    fn test_absent_score_serializes_as_null() {
        let json = serde_json::to_value(entry(7, "C")).unwrap();
        assert!(json["score"].is_null());
    }
}
