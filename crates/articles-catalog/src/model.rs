use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use catalog_common::catalog_api::CategoryInfo;
use catalog_common::category::{Category, CategoryIndex};
use catalog_common::record::CatalogRecord;

/// A long-form article published to the network.
///
/// Only `id` is required in the snapshot; every other field falls back to a
/// default, so an article with missing searchable text simply never matches
/// a non-empty query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Article {
    /// Stable identifier, unique within the snapshot.
    pub id: String,
    /// Display title, searched.
    #[serde(default)]
    pub title: String,
    /// Lead-in text, searched alongside the title.
    #[serde(default)]
    pub excerpt: String,
    /// Author display name.
    #[serde(default)]
    pub author: String,
    /// Author's network public key.
    #[serde(default)]
    pub author_pubkey: String,
    /// Publication date as supplied by the source.
    #[serde(default)]
    pub published_at: String,
    /// Estimated reading time, e.g. "8 min".
    #[serde(default)]
    pub read_time: String,
    /// Owning category id.
    #[serde(default)]
    pub category: String,
    /// Tags, each searched independently.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Comment count at snapshot time.
    #[serde(default)]
    pub comments: u32,
    /// Cross-category highlight flag.
    #[serde(default)]
    pub featured: bool,
}

impl CatalogRecord for Article {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn body(&self) -> &str {
        &self.excerpt
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn category_id(&self) -> &str {
        &self.category
    }
    fn featured(&self) -> bool {
        self.featured
    }
}

/// The static article category set with its declared counts.
///
/// Counts are catalog metadata, not live tallies; they are surfaced as-is.
pub fn categories() -> CategoryIndex {
    CategoryIndex::new(vec![
        Category::new("all", "All Articles", 42),
        Category::new("crypto", "Cryptography", 12),
        Category::new("privacy", "Privacy", 8),
        Category::new("libertarian", "Libertarian", 15),
        Category::new("tech", "Technology", 7),
    ])
}

/// One computed article view: the featured block, the regular block, and the
/// spotlight article shown above both when no category filter is active.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrowseArticlesResponse {
    pub category: CategoryInfo,
    pub spotlight: Option<Article>,
    pub featured: Vec<Article>,
    pub regular: Vec<Article>,
    pub is_empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::snapshot::parse_snapshot;

    #[test]
    fn snapshot_records_tolerate_missing_fields() {
        let raw = r#"[{"id": "7", "title": "Bare"}]"#;
        let articles: Vec<Article> = parse_snapshot(raw).unwrap();
        let article = &articles[0];
        assert_eq!(article.title, "Bare");
        assert_eq!(article.excerpt, "");
        assert!(article.tags.is_empty());
        assert!(!article.featured);
    }

    #[test]
    fn category_set_declares_all_first() {
        let index = categories();
        assert_eq!(index.list()[0].id, "all");
        assert_eq!(index.list()[0].count, 42);
        assert!(index.resolve("libertarian").is_some());
    }

    /// Integration test: parse the checked-in article snapshot.
    ///
    /// Skipped when the data file is not present (e.g. in a stripped-down
    /// checkout).
    #[test]
    fn checked_in_snapshot_parses() {
        let path = std::path::Path::new("../../data/articles.json");
        if !path.exists() {
            eprintln!("skipping checked_in_snapshot_parses: {} not found", path.display());
            return;
        }

        let raw = std::fs::read_to_string(path).expect("read snapshot");
        let articles: Vec<Article> = parse_snapshot(&raw).expect("parse snapshot");
        assert_eq!(articles.len(), 4);

        let ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        let manifesto = &articles[0];
        assert!(manifesto.featured);
        assert_eq!(manifesto.category, "libertarian");
        assert!(manifesto.tags.contains(&"cypherpunk".to_string()));

        let index = categories();
        for article in &articles {
            assert!(
                index.resolve(&article.category).is_some(),
                "article {} has unresolvable category {}",
                article.id,
                article.category
            );
        }
    }
}
