use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

/// Versioned so a schema change can migrate by renaming the key.
pub const DEFAULT_STORAGE_KEY: &str = "byob.tennis.reviews.v1";

pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

/// Settings for opening a review store.
///
/// Deserialized from the JSON the host passes to `create_store_with_config`;
/// every field is optional:
///
/// ```json
/// { "path": "reviews.lmdb", "mapSize": 10485760, "storageKey": "byob.tennis.reviews.v1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub map_size: usize,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::for_name("court_reviews")
    }
}

impl StoreConfig {
    /// Same layout `create_store(name)` uses: an LMDB directory `{name}.lmdb`.
    pub fn for_name(name: &str) -> Self {
        StoreConfig {
            path: PathBuf::from(format!("{name}.lmdb")),
            map_size: DEFAULT_MAP_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if self.path.as_os_str().is_empty() {
            return Err(AppResponse::ValidationError("Store path is empty".to_string()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(AppResponse::ValidationError("Storage key is empty".to_string()));
        }
        if self.map_size == 0 {
            return Err(AppResponse::ValidationError("mapSize must be positive".to_string()));
        }
        Ok(())
    }
}
