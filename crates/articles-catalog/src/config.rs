use std::path::PathBuf;

use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
///
/// The snapshot path is required and validated at load time. Redis is
/// optional; if absent, the server runs without caching.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379"). `None` disables caching.
    pub redis_url: Option<String>,
    /// Filesystem path to the article snapshot JSON.
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ARTICLES_CATALOG_PATH`: path to the article snapshot JSON
    ///
    /// Optional:
    /// - `REDIS_URL`: Redis connection string (omit to disable caching)
    pub fn from_env() -> Result<Self, AppError> {
        let snapshot_path = std::env::var("ARTICLES_CATALOG_PATH").map_err(|_| {
            AppError::Config("ARTICLES_CATALOG_PATH environment variable is required".to_string())
        })?;
        let snapshot_path = PathBuf::from(snapshot_path);

        if !snapshot_path.exists() {
            return Err(AppError::Config(format!(
                "article snapshot not found at {}",
                snapshot_path.display()
            )));
        }

        let redis_url = std::env::var("REDIS_URL").ok();

        Ok(Self {
            redis_url,
            snapshot_path,
        })
    }
}
