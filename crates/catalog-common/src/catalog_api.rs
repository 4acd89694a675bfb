use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::Category;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BrowseParams {
    /// Free-text search over titles, bodies, and tags. Empty or omitted
    /// matches every record.
    pub query: Option<String>,
    /// Category id to restrict to (default: "all"). Unknown ids fall back
    /// to "all".
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetRecordParams {
    /// Stable record id, matched case-insensitively.
    pub record_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub id: String,
    pub label: String,
    /// Declared count from the category configuration, surfaced as-is.
    pub count: usize,
}

impl From<&Category> for CategoryInfo {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            label: category.label.clone(),
            count: category.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadCatalogResponse {
    pub reloaded: bool,
    pub record_count: usize,
}
