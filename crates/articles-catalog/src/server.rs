/// MCP server implementation for the article catalog.
///
/// Exposes four tools:
/// - `browse_articles`: text + category filtered view of the catalog
/// - `get_article`: look up a single article by id
/// - `list_categories`: the static category set with declared counts
/// - `reload_catalog`: re-read the snapshot file and invalidate caches
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::CatalogCache;
use crate::config::Config;
use crate::error::AppError;
use crate::model::{self, Article, BrowseArticlesResponse};
use catalog_common::catalog_api::{
    BrowseParams, CategoryInfo, CategoryListResponse, GetRecordParams, ReloadCatalogResponse,
};
use catalog_common::category::{CategoryIndex, ALL_CATEGORY};
use catalog_common::filter::{primary_featured, CatalogFilter, View};
use catalog_common::snapshot;

/// Shared record store, protected by RwLock for safe concurrent reads and an
/// exclusive write during snapshot reload.
pub struct AppState {
    pub articles: Vec<Article>,
}

#[derive(Clone)]
pub struct ArticlesCatalogServer {
    state: Arc<RwLock<AppState>>,
    categories: Arc<CategoryIndex>,
    cache: Arc<CatalogCache>,
    config: Config,
    tool_router: ToolRouter<ArticlesCatalogServer>,
}

impl ArticlesCatalogServer {
    pub fn new(articles: Vec<Article>, cache: Arc<CatalogCache>, config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState { articles })),
            categories: Arc::new(model::categories()),
            cache,
            config,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ArticlesCatalogServer {
    #[tool(description = "Browse the article catalog. Filters by a free-text query over titles, excerpts, and tags, and by category. Returns the featured block, the regular block, and the spotlight article.")]
    async fn browse_articles(
        &self,
        Parameters(params): Parameters<BrowseParams>,
    ) -> Result<Json<BrowseArticlesResponse>, String> {
        let query = params.query.unwrap_or_default();
        let query = query.trim();
        let requested = params
            .category
            .unwrap_or_else(|| ALL_CATEGORY.to_string());

        let filter = CatalogFilter::new(query, requested.trim(), &self.categories);

        if let Some(cached) = self.cache.get_view(query, filter.category_id()).await {
            info!(query, category = filter.category_id(), "view cache hit");
            return Ok(Json(cached));
        }

        let state = self.state.read().await;
        let view = View::compute(&state.articles, &filter);

        let response = BrowseArticlesResponse {
            category: CategoryInfo::from(self.categories.resolve_or_all(filter.category_id())),
            spotlight: if filter.is_all_categories() {
                primary_featured(&state.articles).cloned()
            } else {
                None
            },
            featured: view.featured.iter().map(|&a| a.clone()).collect(),
            regular: view.regular.iter().map(|&a| a.clone()).collect(),
            is_empty: view.is_empty(),
        };
        drop(state);

        self.cache.set_view(query, filter.category_id(), &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Get a single article by its id.")]
    async fn get_article(
        &self,
        Parameters(params): Parameters<GetRecordParams>,
    ) -> Result<Json<Article>, String> {
        let record_id = params.record_id.trim().to_string();
        if record_id.is_empty() {
            return Err("record_id must not be empty".to_string());
        }

        // Check cache first
        if let Some(cached) = self.cache.get_article(&record_id).await {
            return Ok(Json(cached));
        }

        let state = self.state.read().await;
        let article = state
            .articles
            .iter()
            .find(|a| a.id.eq_ignore_ascii_case(&record_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(record_id.clone()).to_string())?;
        drop(state);

        self.cache.set_article(&article).await;
        Ok(Json(article))
    }

    #[tool(description = "List article categories with their declared record counts.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self.categories.list().iter().map(CategoryInfo::from).collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Re-read the article snapshot from disk, swap the in-memory catalog, and invalidate cached views.")]
    async fn reload_catalog(&self) -> Result<Json<ReloadCatalogResponse>, String> {
        info!("reload_catalog tool invoked");

        let articles = snapshot::load_snapshot::<Article>(&self.config.snapshot_path)
            .map_err(|e| format!("reload failed: {e}"))?;
        let record_count = articles.len();

        {
            let mut state = self.state.write().await;
            state.articles = articles;
        }
        self.cache.invalidate_all().await;
        info!(record_count, "article catalog reloaded");

        Ok(Json(ReloadCatalogResponse {
            reloaded: true,
            record_count,
        }))
    }
}

#[tool_handler]
impl ServerHandler for ArticlesCatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "articles-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Article catalog server for the CypherNet freedom library. Use \
                 browse_articles to filter by free text and category (featured \
                 articles are highlighted separately while no category filter is \
                 active), get_article for a single record, list_categories for the \
                 category chips, and reload_catalog after the snapshot file changes."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArticlesCatalogServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = ArticlesCatalogServer::tool_router().list_all();
        for name in [
            "browse_articles",
            "get_article",
            "list_categories",
            "reload_catalog",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }
}
