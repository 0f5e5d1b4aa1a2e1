//! Image URL resolution.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Folder holding one `{code}.jpg` per product.
pub const DEFAULT_IMAGE_FOLDER: &str = "NSIPIC/ITY/foto_produk";

/// Storage path of a product image.
pub fn image_path(folder: &str, code: &str) -> String {
    format!("{}/{}.jpg", folder.trim_end_matches('/'), code)
}

/// Resolves a storage path to a downloadable URL.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, path: &str) -> Result<String, FetchError>;
}

/// Object metadata returned by the storage bucket.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    #[serde(default)]
    download_tokens: Option<String>,
}

/// Resolves paths against a storage bucket's object API.
///
/// The object is looked up by its URL-encoded path; a successful lookup
/// yields `{bucket}{path}?alt=media`, with the first download token
/// appended when the bucket reports one.
#[derive(Debug, Clone)]
pub struct HttpImageResolver {
    client: reqwest::Client,
    bucket: Url,
}

impl HttpImageResolver {
    pub fn new(bucket_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let bucket = Url::parse(bucket_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, bucket })
    }

    /// Metadata URL of the object at `path`.
    pub fn object_url(&self, path: &str) -> Result<Url, FetchError> {
        let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
        Ok(self.bucket.join(&encoded)?)
    }
}

#[async_trait]
impl ImageResolver for HttpImageResolver {
    async fn resolve(&self, path: &str) -> Result<String, FetchError> {
        let object = self.object_url(path)?;
        let response = self.client.get(object.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message: format!("no image at {}", path),
            });
        }

        let metadata: ObjectMetadata = response.json().await?;
        let mut download = object;
        {
            let mut query = download.query_pairs_mut();
            query.append_pair("alt", "media");
            if let Some(token) = metadata
                .download_tokens
                .as_deref()
                .and_then(|tokens| tokens.split(',').next())
            {
                query.append_pair("token", token);
            }
        }

        debug!(path, url = %download, "resolved image");
        Ok(download.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path() {
        assert_eq!(image_path(DEFAULT_IMAGE_FOLDER, "CC-017"), "NSIPIC/ITY/foto_produk/CC-017.jpg");
        assert_eq!(image_path("pics/", "A1"), "pics/A1.jpg");
    }

    #[test]
    fn test_object_url_encodes_path() {
        let resolver = HttpImageResolver::new(
            "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/",
            Duration::from_secs(5),
        )
        .unwrap();

        let url = resolver.object_url("NSIPIC/ITY/foto_produk/CC-017.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "https://firebasestorage.googleapis.com/v0/b/shop.appspot.com/o/NSIPIC%2FITY%2Ffoto_produk%2FCC-017.jpg"
        );
    }
}
