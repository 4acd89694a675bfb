/// MCP server implementation for the marketplace catalog.
///
/// Exposes four tools:
/// - `browse_market`: text + category filtered view of the listings
/// - `get_listing`: look up a single listing by id
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
use crate::model::{self, BrowseMarketResponse, Listing};
use catalog_common::catalog_api::{
    BrowseParams, CategoryInfo, CategoryListResponse, GetRecordParams, ReloadCatalogResponse,
};
use catalog_common::category::{CategoryIndex, ALL_CATEGORY};
use catalog_common::filter::{CatalogFilter, View};
use catalog_common::snapshot;

pub struct AppState {
    pub listings: Vec<Listing>,
}

#[derive(Clone)]
pub struct MarketCatalogServer {
    state: Arc<RwLock<AppState>>,
    categories: Arc<CategoryIndex>,
    cache: Arc<CatalogCache>,
    config: Config,
    tool_router: ToolRouter<MarketCatalogServer>,
}

impl MarketCatalogServer {
    pub fn new(listings: Vec<Listing>, cache: Arc<CatalogCache>, config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState { listings })),
            categories: Arc::new(model::categories()),
            cache,
            config,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl MarketCatalogServer {
    #[tool(description = "Browse the marketplace. Filters listings by a free-text query over titles, descriptions, and tags, and by category. Featured listings are returned separately while no category filter is active.")]
    async fn browse_market(
        &self,
        Parameters(params): Parameters<BrowseParams>,
    ) -> Result<Json<BrowseMarketResponse>, String> {
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
        let view = View::compute(&state.listings, &filter);

        let response = BrowseMarketResponse {
            category: CategoryInfo::from(self.categories.resolve_or_all(filter.category_id())),
            featured: view.featured.iter().map(|&l| l.clone()).collect(),
            regular: view.regular.iter().map(|&l| l.clone()).collect(),
            is_empty: view.is_empty(),
        };
        drop(state);

        self.cache.set_view(query, filter.category_id(), &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Get a single marketplace listing by its id.")]
    async fn get_listing(
        &self,
        Parameters(params): Parameters<GetRecordParams>,
    ) -> Result<Json<Listing>, String> {
        let record_id = params.record_id.trim().to_string();
        if record_id.is_empty() {
            return Err("record_id must not be empty".to_string());
        }

        if let Some(cached) = self.cache.get_listing(&record_id).await {
            return Ok(Json(cached));
        }

        let state = self.state.read().await;
        let listing = state
            .listings
            .iter()
            .find(|l| l.id.eq_ignore_ascii_case(&record_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(record_id.clone()).to_string())?;
        drop(state);

        self.cache.set_listing(&listing).await;
        Ok(Json(listing))
    }

    #[tool(description = "List marketplace categories with their declared item counts.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self.categories.list().iter().map(CategoryInfo::from).collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Re-read the listing snapshot from disk, swap the in-memory catalog, and invalidate cached views.")]
    async fn reload_catalog(&self) -> Result<Json<ReloadCatalogResponse>, String> {
        info!("reload_catalog tool invoked");

        let listings = snapshot::load_snapshot::<Listing>(&self.config.snapshot_path)
            .map_err(|e| format!("reload failed: {e}"))?;
        let record_count = listings.len();

        {
            let mut state = self.state.write().await;
            state.listings = listings;
        }
        self.cache.invalidate_all().await;
        info!(record_count, "marketplace catalog reloaded");

        Ok(Json(ReloadCatalogResponse {
            reloaded: true,
            record_count,
        }))
    }
}

#[tool_handler]
impl ServerHandler for MarketCatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "market-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Marketplace catalog server for CypherNet secure trading. Use \
                 browse_market to filter listings by free text and category, \
                 get_listing for a single record, list_categories for the category \
                 chips, and reload_catalog after the snapshot file changes."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MarketCatalogServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = MarketCatalogServer::tool_router().list_all();
        for name in [
            "browse_market",
            "get_listing",
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
