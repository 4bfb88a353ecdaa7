//! Lazy, cached access to the eight part collections
//!
//! Fetching is split across two layers: [`CatalogClient`] is the transport
//! contract (HTTP in production, stubs in tests), and [`PartCatalog`] owns
//! the per-category cache. Each category moves through an explicit state
//! machine (`NotRequested -> Loading -> Ready | Failed`), so duplicate
//! fetch issuance is suppressed by state, not by render timing.
//!
//! A failed fetch degrades to an empty list: downstream components render
//! "no items" exactly as they would for an empty collection, while the
//! underlying error goes to the log stream. There is no automatic retry.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{info, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::model::{Category, Part};

/// Loading lifecycle of one category list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Never requested; first access triggers a fetch
    #[default]
    NotRequested,
    /// Fetch in flight; no second fetch is issued
    Loading,
    /// Fetch completed, possibly with an empty list; never refetched
    Ready(Vec<Part>),
    /// Fetch failed; observable as an empty list, never auto-retried
    Failed,
}

static NOT_REQUESTED: FetchState = FetchState::NotRequested;

/// Per-session cache of fetched category lists.
///
/// One owned object instead of ambient module state, so it can be injected
/// and inspected. All mutation goes through [`set`](CatalogCache::set).
#[derive(Debug, Default)]
pub struct CatalogCache {
    states: HashMap<Category, FetchState>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fetch state for a category
    pub fn state(&self, category: Category) -> &FetchState {
        self.states.get(&category).unwrap_or(&NOT_REQUESTED)
    }

    pub fn set(&mut self, category: Category, state: FetchState) {
        self.states.insert(category, state);
    }

    /// Whether the category has been requested at all
    pub fn has(&self, category: Category) -> bool {
        !matches!(self.state(category), FetchState::NotRequested)
    }

    /// Observable part list for a category.
    ///
    /// `Failed`, `Loading` and `NotRequested` all present as empty: the
    /// UI-visible "no items" state is shared between an empty collection
    /// and a failed load.
    pub fn parts(&self, category: Category) -> &[Part] {
        match self.state(category) {
            FetchState::Ready(parts) => parts,
            _ => &[],
        }
    }
}

/// Transport contract for the catalog read endpoints
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full list for one category, in store order
    async fn fetch_category(&self, category: Category) -> FetchResult<Vec<Part>>;
}

/// Production client for the HTTP catalog endpoints (`GET /<category>`)
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, category: Category) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            category.route()
        )
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_category(&self, category: Category) -> FetchResult<Vec<Part>> {
        let response = self
            .http
            .get(self.endpoint(category))
            .send()
            .await
            .map_err(|source| FetchError::Network { category, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                category,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network { category, source })?;
        let docs: Vec<JsonValue> = serde_json::from_str(&body)
            .map_err(|source| FetchError::Decode { category, source })?;

        let mut parts = Vec::with_capacity(docs.len());
        for doc in docs {
            let mut part: Part = serde_json::from_value(doc)
                .map_err(|source| FetchError::Decode { category, source })?;
            part.category = Some(category);
            parts.push(part);
        }
        Ok(parts)
    }
}

/// Cached catalog accessor: one fetch per category per session.
///
/// Owned by the session and mutated through `&mut`; no locking, matching
/// the single event loop the UI runs on. Fetches for different categories
/// are independent and may resolve in any order.
pub struct PartCatalog<C> {
    client: C,
    cache: CatalogCache,
}

impl<C: CatalogClient> PartCatalog<C> {
    pub fn new(client: C) -> Self {
        Self::with_cache(client, CatalogCache::new())
    }

    /// Build around an existing cache (pre-seeded or shared state)
    pub fn with_cache(client: C, cache: CatalogCache) -> Self {
        Self { client, cache }
    }

    /// The observable list for `category`, fetching on first access.
    ///
    /// Any already-requested state short-circuits: a cached result is never
    /// refetched, even when empty, and a failed fetch stays failed. On
    /// failure the error is logged and the category presents as empty.
    pub async fn fetch_category(&mut self, category: Category) -> &[Part] {
        if self.cache.has(category) {
            return self.cache.parts(category);
        }

        self.cache.set(category, FetchState::Loading);
        match self.client.fetch_category(category).await {
            Ok(parts) => {
                info!(%category, count = parts.len(), "category list fetched");
                self.cache.set(category, FetchState::Ready(parts));
            }
            Err(err) => {
                warn!(%category, error = %err, "category fetch failed, presenting empty list");
                self.cache.set(category, FetchState::Failed);
            }
        }
        self.cache.parts(category)
    }

    /// Cached list without triggering a fetch
    pub fn cached_parts(&self, category: Category) -> &[Part] {
        self.cache.parts(category)
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    /// Client stub: serves one canned part per category, or fails
    struct StubClient {
        failing: HashSet<Category>,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn new() -> Self {
            Self {
                failing: HashSet::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(categories: &[Category]) -> Self {
            Self {
                failing: categories.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogClient for StubClient {
        async fn fetch_category(&self, category: Category) -> FetchResult<Vec<Part>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&category) {
                return Err(FetchError::Status {
                    category,
                    status: 500,
                });
            }
            let mut part: Part = serde_json::from_value(json!({
                "_id": format!("{category}-1"),
                "Brand": "ACME",
                "Model": "One",
                "Price_THB": 100,
            }))
            .unwrap();
            part.category = Some(category);
            Ok(vec![part])
        }
    }

    #[tokio::test]
    async fn test_first_access_fetches_then_caches() {
        let mut catalog = PartCatalog::new(StubClient::new());

        let parts = catalog.fetch_category(Category::Cpu).await;
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].category, Some(Category::Cpu));

        catalog.fetch_category(Category::Cpu).await;
        assert_eq!(catalog.client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_categories_are_cached_independently() {
        let mut catalog = PartCatalog::new(StubClient::new());

        catalog.fetch_category(Category::Cpu).await;
        catalog.fetch_category(Category::Psu).await;
        catalog.fetch_category(Category::Cpu).await;

        assert_eq!(catalog.client.call_count(), 2);
        assert_eq!(catalog.cached_parts(Category::Psu).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_presents_as_empty() {
        let mut catalog = PartCatalog::new(StubClient::failing(&[Category::Ssd]));

        let parts = catalog.fetch_category(Category::Ssd).await;
        assert!(parts.is_empty());
        assert_eq!(*catalog.cache().state(Category::Ssd), FetchState::Failed);

        // failure is cached too: no auto-retry on next access
        catalog.fetch_category(Category::Ssd).await;
        assert_eq!(catalog.client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_preseeded_cache_suppresses_fetch() {
        let mut cache = CatalogCache::new();
        cache.set(Category::Ram, FetchState::Ready(Vec::new()));
        let mut catalog = PartCatalog::with_cache(StubClient::new(), cache);

        let parts = catalog.fetch_category(Category::Ram).await;
        assert!(parts.is_empty());
        assert_eq!(catalog.client.call_count(), 0);
    }

    #[test]
    fn test_cache_default_state() {
        let cache = CatalogCache::new();
        assert!(!cache.has(Category::Case));
        assert_eq!(*cache.state(Category::Case), FetchState::NotRequested);
        assert!(cache.parts(Category::Case).is_empty());
    }
}
