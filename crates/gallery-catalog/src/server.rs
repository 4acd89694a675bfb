/// MCP server implementation for the gallery catalog.
///
/// Exposes four tools:
/// - `browse_gallery`: text + category filtered view of the works
/// - `get_work`: look up a single work by id
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
use crate::model::{self, BrowseGalleryResponse, Work};
use catalog_common::catalog_api::{
    BrowseParams, CategoryInfo, CategoryListResponse, GetRecordParams, ReloadCatalogResponse,
};
use catalog_common::category::{CategoryIndex, ALL_CATEGORY};
use catalog_common::filter::{CatalogFilter, View};
use catalog_common::snapshot;

pub struct AppState {
    pub works: Vec<Work>,
}

#[derive(Clone)]
pub struct GalleryCatalogServer {
    state: Arc<RwLock<AppState>>,
    categories: Arc<CategoryIndex>,
    cache: Arc<CatalogCache>,
    config: Config,
    tool_router: ToolRouter<GalleryCatalogServer>,
}

impl GalleryCatalogServer {
    pub fn new(works: Vec<Work>, cache: Arc<CatalogCache>, config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState { works })),
            categories: Arc::new(model::categories()),
            cache,
            config,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl GalleryCatalogServer {
    #[tool(description = "Browse the gallery. Filters works by a free-text query over titles, descriptions, and tags, and by category. Featured works are returned separately while no category filter is active.")]
    async fn browse_gallery(
        &self,
        Parameters(params): Parameters<BrowseParams>,
    ) -> Result<Json<BrowseGalleryResponse>, String> {
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
        let view = View::compute(&state.works, &filter);

        let response = BrowseGalleryResponse {
            category: CategoryInfo::from(self.categories.resolve_or_all(filter.category_id())),
            featured: view.featured.iter().map(|&w| w.clone()).collect(),
            regular: view.regular.iter().map(|&w| w.clone()).collect(),
            is_empty: view.is_empty(),
        };
        drop(state);

        self.cache.set_view(query, filter.category_id(), &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Get a single gallery work by its id.")]
    async fn get_work(
        &self,
        Parameters(params): Parameters<GetRecordParams>,
    ) -> Result<Json<Work>, String> {
        let record_id = params.record_id.trim().to_string();
        if record_id.is_empty() {
            return Err("record_id must not be empty".to_string());
        }

        if let Some(cached) = self.cache.get_work(&record_id).await {
            return Ok(Json(cached));
        }

        let state = self.state.read().await;
        let work = state
            .works
            .iter()
            .find(|w| w.id.eq_ignore_ascii_case(&record_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(record_id.clone()).to_string())?;
        drop(state);

        self.cache.set_work(&work).await;
        Ok(Json(work))
    }

    #[tool(description = "List gallery categories with their declared work counts.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self.categories.list().iter().map(CategoryInfo::from).collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Re-read the gallery snapshot from disk, swap the in-memory catalog, and invalidate cached views.")]
    async fn reload_catalog(&self) -> Result<Json<ReloadCatalogResponse>, String> {
        info!("reload_catalog tool invoked");

        let works = snapshot::load_snapshot::<Work>(&self.config.snapshot_path)
            .map_err(|e| format!("reload failed: {e}"))?;
        let record_count = works.len();

        {
            let mut state = self.state.write().await;
            state.works = works;
        }
        self.cache.invalidate_all().await;
        info!(record_count, "gallery catalog reloaded");

        Ok(Json(ReloadCatalogResponse {
            reloaded: true,
            record_count,
        }))
    }
}

#[tool_handler]
impl ServerHandler for GalleryCatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gallery-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Gallery catalog server for the CypherNet art collective. Use \
                 browse_gallery to filter works by free text and category, get_work \
                 for a single record, list_categories for the category chips, and \
                 reload_catalog after the snapshot file changes."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GalleryCatalogServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = GalleryCatalogServer::tool_router().list_all();
        for name in [
            "browse_gallery",
            "get_work",
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
