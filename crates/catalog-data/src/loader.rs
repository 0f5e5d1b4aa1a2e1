//! Catalog loading with a superseded-fetch guard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use catalog_core::catalog::Product;
use catalog_core::search::PaginationState;
use tracing::{debug, error, info};

use crate::adapter::ProductAdapter;
use crate::client::ProductSource;
use crate::error::FetchError;
use crate::image::ImageResolver;
use crate::request::ListRequest;
use crate::response::PageMeta;

/// What the listing currently shows.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Products of the last applied page.
    pub products: Vec<Product>,
    /// Server metadata of the last applied page.
    pub meta: Option<PageMeta>,
    /// Whether the latest issued load has not finished yet.
    pub loading: bool,
}

impl CatalogState {
    /// Copy the server's page and total into `pagination`.
    pub fn sync_pagination(&self, pagination: &mut PaginationState) {
        if let Some(meta) = self.meta {
            pagination.apply_server_meta(meta.page, meta.total);
        }
    }
}

/// Result of one `load` call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The page replaced the displayed products.
    Applied { generation: u64, count: usize, meta: PageMeta },
    /// A newer load was issued while this one was in flight; result dropped.
    Superseded { generation: u64, latest: u64 },
    /// The fetch failed; the previous products are still shown.
    Failed { generation: u64, error: FetchError },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }
}

/// Loads catalog pages and applies only the newest result.
///
/// Each `load` takes a ticket from a monotonically increasing counter. When
/// a fetch completes, its result is applied only if its ticket is still the
/// latest issued, so a slow earlier request cannot overwrite a newer page.
pub struct CatalogLoader<P, R> {
    source: P,
    adapter: ProductAdapter<R>,
    latest: AtomicU64,
    state: Mutex<CatalogState>,
}

impl<P: ProductSource, R: ImageResolver> CatalogLoader<P, R> {
    pub fn new(source: P, adapter: ProductAdapter<R>) -> Self {
        Self {
            source,
            adapter,
            latest: AtomicU64::new(0),
            state: Mutex::new(CatalogState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current listing state.
    pub fn snapshot(&self) -> CatalogState {
        self.state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Ticket of the most recently issued load.
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Fetch and convert one page, then apply it if still current.
    ///
    /// Never returns an error: failures are logged and reported in the
    /// outcome while the previous products stay in place.
    pub async fn load(&self, request: &ListRequest) -> LoadOutcome {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state().loading = true;

        let fetched = match self.source.list_products(request).await {
            Ok(response) => {
                let products = self.adapter.convert_page(&response.data).await;
                Ok((products, response.meta))
            }
            Err(error) => Err(error),
        };

        let mut state = self.state();
        let latest = self.latest.load(Ordering::SeqCst);
        if generation != latest {
            debug!(generation, latest, "dropping superseded catalog page");
            return LoadOutcome::Superseded { generation, latest };
        }
        state.loading = false;

        match fetched {
            Ok((products, meta)) => {
                let count = products.len();
                info!(generation, count, page = meta.page, total = meta.total, "catalog page loaded");
                state.products = products;
                state.meta = Some(meta);
                LoadOutcome::Applied { generation, count, meta }
            }
            Err(error) => {
                error!(generation, page = request.page, %error, "failed to fetch catalog page");
                LoadOutcome::Failed { generation, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{ListResponse, RawId, RawRecord};
    use async_trait::async_trait;
    use catalog_core::search::FilterState;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    struct NoImages;

    #[async_trait]
    impl ImageResolver for NoImages {
        async fn resolve(&self, path: &str) -> Result<String, FetchError> {
            Ok(format!("img://{}", path))
        }
    }

    /// Answers each call with whatever is sent on the matching channel.
    struct GatedSource {
        gates: Mutex<VecDeque<oneshot::Receiver<Result<ListResponse, FetchError>>>>,
    }

    impl GatedSource {
        fn new(count: usize) -> (Self, Vec<oneshot::Sender<Result<ListResponse, FetchError>>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) = (0..count).map(|_| oneshot::channel()).unzip();
            (
                Self {
                    gates: Mutex::new(receivers),
                },
                senders,
            )
        }
    }

    #[async_trait]
    impl ProductSource for GatedSource {
        async fn list_products(&self, _request: &ListRequest) -> Result<ListResponse, FetchError> {
            let gate = self.gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => rx.await.unwrap_or(Err(FetchError::Timeout)),
                None => Err(FetchError::RequestError("no more responses".into())),
            }
        }
    }

    fn page(ids: &[i64], page: usize, total: usize) -> ListResponse {
        ListResponse {
            data: ids
                .iter()
                .map(|id| RawRecord {
                    id: RawId::Number(*id),
                    nama_barang: format!("Barang {}", id),
                    berat: Some(1.5),
                    kadar: None,
                    kode_barang: format!("K{}", id),
                    size: None,
                    harga_jual_catalog: Some(100.0),
                })
                .collect(),
            meta: PageMeta {
                total_pages: total.div_ceil(10),
                page,
                total,
                limit: 10,
            },
        }
    }

    fn request() -> ListRequest {
        ListRequest::new(&FilterState::default(), &PaginationState::default())
    }

    fn ids(state: &CatalogState) -> Vec<i64> {
        state.products.iter().map(|p| p.id.get()).collect()
    }

    #[tokio::test]
    async fn test_load_applies_page() {
        let (source, mut senders) = GatedSource::new(1);
        let loader = CatalogLoader::new(source, ProductAdapter::new(NoImages));
        senders.remove(0).send(Ok(page(&[1, 2], 2, 12))).unwrap();

        let outcome = loader.load(&request()).await;
        assert!(outcome.is_applied());

        let state = loader.snapshot();
        assert_eq!(ids(&state), vec![1, 2]);
        assert!(!state.loading);

        let mut pagination = PaginationState::default();
        state.sync_pagination(&mut pagination);
        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.total(), 12);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_products() {
        let (source, mut senders) = GatedSource::new(2);
        let loader = CatalogLoader::new(source, ProductAdapter::new(NoImages));
        senders.remove(0).send(Ok(page(&[7], 1, 1))).unwrap();
        loader.load(&request()).await;

        senders
            .remove(0)
            .send(Err(FetchError::HttpError {
                status: 500,
                message: "boom".into(),
            }))
            .unwrap();
        let outcome = loader.load(&request()).await;

        assert!(matches!(outcome, LoadOutcome::Failed { generation: 2, .. }));
        let state = loader.snapshot();
        assert_eq!(ids(&state), vec![7]);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_superseded_result_is_dropped() {
        let (source, senders) = GatedSource::new(2);
        let loader = CatalogLoader::new(source, ProductAdapter::new(NoImages));
        let mut senders = senders.into_iter();
        let (first, second) = (senders.next().unwrap(), senders.next().unwrap());

        let req = request();
        let (older, newer, _) = tokio::join!(loader.load(&req), loader.load(&req), async {
            // Newer response arrives first, the older one after it.
            second.send(Ok(page(&[20, 21], 2, 30))).unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(page(&[10, 11], 1, 30))).unwrap();
        });

        assert!(matches!(newer, LoadOutcome::Applied { generation: 2, .. }));
        assert!(matches!(older, LoadOutcome::Superseded { generation: 1, latest: 2 }));
        assert_eq!(ids(&loader.snapshot()), vec![20, 21]);
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_loading_flag_while_in_flight() {
        let (source, senders) = GatedSource::new(1);
        let loader = CatalogLoader::new(source, ProductAdapter::new(NoImages));
        let sender = senders.into_iter().next().unwrap();
        let req = request();

        let (_, seen_loading) = tokio::join!(loader.load(&req), async {
            let loading = loader.is_loading();
            sender.send(Ok(page(&[1], 1, 1))).unwrap();
            loading
        });

        assert!(seen_loading);
        assert!(!loader.is_loading());
    }
}
