//! Product list sources.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::request::ListRequest;
use crate::response::ListResponse;

/// Anything that can serve a page of raw product records.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page. Non-2xx responses are errors.
    async fn list_products(&self, request: &ListRequest) -> Result<ListResponse, FetchError>;
}

/// The remote list endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpProductSource {
    /// Create a source for `base_url` joined with `list_path`.
    pub fn new(base_url: &str, list_path: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(base_url)?.join(list_path)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn list_products(&self, request: &ListRequest) -> Result<ListResponse, FetchError> {
        let url = request.to_url(&self.endpoint);
        debug!(%url, page = request.page, limit = request.limit, "fetching product page");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let source = HttpProductSource::new(
            "http://localhost:3000/",
            "barang/get/barang-catalog",
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            source.endpoint().as_str(),
            "http://localhost:3000/barang/get/barang-catalog"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpProductSource::new("nope", "x", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
