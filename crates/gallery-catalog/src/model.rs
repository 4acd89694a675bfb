use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use catalog_common::catalog_api::CategoryInfo;
use catalog_common::category::{Category, CategoryIndex};
use catalog_common::record::CatalogRecord;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Work {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_pubkey: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub file_size: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub license: String,
}

impl CatalogRecord for Work {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn body(&self) -> &str {
        &self.description
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

/// Static gallery category set with declared counts.
pub fn categories() -> CategoryIndex {
    CategoryIndex::new(vec![
        Category::new("all", "All Works", 89),
        Category::new("digital-art", "Digital Art", 34),
        Category::new("photography", "Photography", 22),
        Category::new("glitch", "Glitch Art", 18),
        Category::new("cyberpunk", "Cyberpunk", 15),
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrowseGalleryResponse {
    pub category: CategoryInfo,
    pub featured: Vec<Work>,
    pub regular: Vec<Work>,
    pub is_empty: bool,
}
