//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use catalog_core::search::{DEFAULT_CATEGORIES, DEFAULT_ITEMS_PER_PAGE, ITEMS_PER_PAGE_OPTIONS};
use catalog_data::DEFAULT_IMAGE_FOLDER;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product list endpoint.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image bucket.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Listing defaults.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Session storage and share links.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: CliConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Check values the loader cannot express in types.
    pub fn validate(&self) -> Result<()> {
        if !ITEMS_PER_PAGE_OPTIONS.contains(&self.browse.items_per_page) {
            bail!(
                "browse.items_per_page must be one of {:?}, got {}",
                ITEMS_PER_PAGE_OPTIONS,
                self.browse.items_per_page
            );
        }
        Ok(())
    }
}

/// Remote product list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base_url: String,

    /// Path of the list endpoint, relative to `base_url`.
    #[serde(default = "default_list_path")]
    pub list_path: String,

    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,
}

fn default_api_base() -> String {
    "http://localhost:3000/".to_string()
}

fn default_list_path() -> String {
    "barang/get/barang-catalog".to_string()
}

fn default_api_timeout() -> u64 {
    10_000
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            list_path: default_list_path(),
            timeout_ms: default_api_timeout(),
        }
    }
}

/// Image bucket used to resolve product pictures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Object API root of the bucket.
    #[serde(default = "default_image_base")]
    pub base_url: String,

    #[serde(default = "default_image_folder")]
    pub folder: String,

    /// Bound on each single lookup.
    #[serde(default = "default_image_timeout")]
    pub timeout_ms: u64,
}

fn default_image_base() -> String {
    "https://firebasestorage.googleapis.com/v0/b/bucket/o/".to_string()
}

fn default_image_folder() -> String {
    DEFAULT_IMAGE_FOLDER.to_string()
}

fn default_image_timeout() -> u64 {
    5_000
}

impl ImagesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base(),
            folder: default_image_folder(),
            timeout_ms: default_image_timeout(),
        }
    }
}

/// Listing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Categories offered for selection.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            categories: default_categories(),
        }
    }
}

/// Session storage and share link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session file, relative to the working directory.
    #[serde(default = "default_session_dir")]
    pub dir: String,

    /// Storefront origin used in share links.
    #[serde(default = "default_share_origin")]
    pub share_origin: String,
}

fn default_session_dir() -> String {
    ".ecatalog".to_string()
}

fn default_share_origin() -> String {
    "http://localhost:5173".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
            share_origin: default_share_origin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.list_path, "barang/get/barang-catalog");
        assert_eq!(config.images.folder, "NSIPIC/ITY/foto_produk");
        assert_eq!(config.browse.items_per_page, 10);
        assert_eq!(config.browse.categories.len(), 6);
        assert_eq!(config.session.dir, ".ecatalog");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.toko.test/"

            [browse]
            items_per_page = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.toko.test/");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.browse.items_per_page, 50);
    }

    #[test]
    fn test_json_config() {
        let config: CliConfig =
            serde_json::from_str(r#"{"session": {"share_origin": "https://toko.test"}}"#).unwrap();
        assert_eq!(config.session.share_origin, "https://toko.test");
        assert_eq!(config.session.dir, ".ecatalog");
    }

    #[test]
    fn test_rejects_unknown_page_size() {
        let config: CliConfig = toml::from_str("[browse]\nitems_per_page = 25").unwrap();
        assert!(config.validate().is_err());
    }
}
