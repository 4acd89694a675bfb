use std::path::PathBuf;

use crate::error::AppError;

/// Server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL. `None` disables caching.
    pub redis_url: Option<String>,
    /// Filesystem path to the gallery snapshot JSON.
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GALLERY_CATALOG_PATH`: path to the gallery snapshot JSON
    ///
    /// Optional:
    /// - `REDIS_URL`: Redis connection string (omit to disable caching)
    pub fn from_env() -> Result<Self, AppError> {
        let snapshot_path = std::env::var("GALLERY_CATALOG_PATH").map_err(|_| {
            AppError::Config("GALLERY_CATALOG_PATH environment variable is required".to_string())
        })?;
        let snapshot_path = PathBuf::from(snapshot_path);

        if !snapshot_path.exists() {
            return Err(AppError::Config(format!(
                "gallery snapshot not found at {}",
                snapshot_path.display()
            )));
        }

        Ok(Self {
            redis_url: std::env::var("REDIS_URL").ok(),
            snapshot_path,
        })
    }
}
