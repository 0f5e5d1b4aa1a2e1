//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use catalog_core::cart::SharedCart;
use catalog_core::catalog::Product;
use catalog_core::search::FilterState;
use catalog_data::{
    CatalogLoader, CatalogState, HttpImageResolver, HttpProductSource, ListRequest, LoadOutcome,
    ProductAdapter,
};
use catalog_session::{FileStorage, Session};

use crate::config::CliConfig;
use crate::output::Output;

/// Name of the session file inside the session directory.
const SESSION_FILE: &str = "session.json";

/// The loader wired to the configured endpoints.
pub type RemoteLoader = CatalogLoader<HttpProductSource, HttpImageResolver>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// The browsing session: its record, storage and cart.
pub struct SessionHandle {
    pub session: Session,
    pub storage: Arc<FileStorage>,
    pub cart: SharedCart<Arc<FileStorage>>,
}

impl SessionHandle {
    /// End the session, dropping the cart and every other stored value.
    pub fn end(self) -> Result<()> {
        self.cart.clear();
        self.session
            .end(self.storage.as_ref())
            .context("Failed to end session")
    }
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["ecatalog.toml", ".ecatalog.toml", "ecatalog.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %format!("{:#}", e), "ignoring config file")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the session file.
    pub fn session_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.session.dir)
    }

    /// Open the session and restore its cart.
    pub fn open_session(&self) -> Result<SessionHandle> {
        let path = self.session_dir().join(SESSION_FILE);
        let storage = Arc::new(
            FileStorage::open_or_reset(&path)
                .with_context(|| format!("Failed to open session file: {}", path.display()))?,
        );
        let session = Session::resume_or_start(storage.as_ref()).context("Failed to start session")?;
        self.output.debug(&format!("Session {} ({})", session.id, path.display()));

        let cart = SharedCart::restore(Arc::clone(&storage));
        Ok(SessionHandle {
            session,
            storage,
            cart,
        })
    }

    /// Build the catalog loader from the configured endpoints.
    pub fn loader(&self) -> Result<RemoteLoader> {
        let api = &self.config.api;
        let source = HttpProductSource::new(&api.base_url, &api.list_path, api.timeout())
            .with_context(|| format!("Invalid product endpoint: {}{}", api.base_url, api.list_path))?;

        let images = &self.config.images;
        let resolver = HttpImageResolver::new(&images.base_url, images.timeout())
            .with_context(|| format!("Invalid image bucket: {}", images.base_url))?;
        let adapter = ProductAdapter::new(resolver)
            .with_folder(images.folder.clone())
            .with_timeout(images.timeout());

        Ok(CatalogLoader::new(source, adapter))
    }

    /// Load one catalog page, reporting but not failing on fetch errors.
    pub async fn load_page(&self, loader: &RemoteLoader, request: &ListRequest) -> CatalogState {
        let spinner = self.output.spinner(&format!("Loading page {}...", request.page));
        let outcome = loader.load(request).await;
        spinner.finish_and_clear();

        if let LoadOutcome::Failed { error, .. } = &outcome {
            self.output.warn(&format!("Could not load products: {}", error));
        }
        loader.snapshot()
    }

    /// Load the given page with no filters, for id lookups.
    pub async fn load_products(&self, page: usize, per_page: usize) -> Result<Vec<Product>> {
        let loader = self.loader()?;
        let request = ListRequest::new(&FilterState::default(), &Default::default())
            .with_page(page, per_page);
        Ok(self.load_page(&loader, &request).await.products)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
