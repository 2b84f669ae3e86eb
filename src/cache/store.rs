// In-memory TTL store wrapping a fetch function.
// Serves the last fetched value until it expires or a refresh is forced.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::error::Result;

/// Default cache expiration: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Elapsed time since `at`, saturating to zero for timestamps in the future.
fn elapsed_since(at: DateTime<Utc>) -> Duration {
    Utc::now()
        .signed_duration_since(at)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Whether a fetch made at `fetched_at` is still fresh under `ttl`.
pub fn is_fresh(fetched_at: Option<DateTime<Utc>>, ttl: Duration) -> bool {
    fetched_at.is_some_and(|at| elapsed_since(at) < ttl)
}

/// Wrapper for cached data with its fetch time.
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was fetched.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped now.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this cached data is still valid (younger than the TTL).
    pub fn is_valid(&self, ttl: Duration) -> bool {
        is_fresh(Some(self.cached_at), ttl)
    }
}

/// Source of a store's value.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<T>;
}

#[async_trait]
impl<T, F, Fut> DataSource<T> for F
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    async fn fetch(&self) -> Result<T> {
        (self)().await
    }
}

/// Store for one fetched value with TTL caching and error capture.
pub struct ApiStore<T> {
    name: &'static str,
    source: Box<dyn DataSource<T>>,
    cached: Option<CachedData<T>>,
    empty: T,
    error: Option<String>,
    cache_expiration: Duration,
}

impl<T> ApiStore<T>
where
    T: Clone + Default + Send + 'static,
{
    /// Create a store named `name` that fetches from `source`.
    pub fn new(name: &'static str, source: impl DataSource<T> + 'static) -> Self {
        Self {
            name,
            source: Box::new(source),
            cached: None,
            empty: T::default(),
            error: None,
            cache_expiration: DEFAULT_TTL,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current data, or the empty value before the first successful fetch.
    pub fn data(&self) -> &T {
        self.cached.as_ref().map_or(&self.empty, |c| &c.data)
    }

    /// Message from the most recent failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.cached.as_ref().map(|c| c.cached_at)
    }

    pub fn cache_expiration(&self) -> Duration {
        self.cache_expiration
    }

    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.cache_expiration = expiration;
    }

    /// Check if the cache is valid.
    pub fn is_cache_valid(&self) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| c.is_valid(self.cache_expiration))
    }

    /// Fetch data from the source or the cache.
    ///
    /// A failed fetch records the error, keeps the previous data and returns
    /// the empty value.
    pub async fn fetch_data(&mut self, force_refresh: bool) -> T {
        if self.is_cache_valid() && !force_refresh {
            debug!("{} store: cache hit", self.name);
            return self.data().clone();
        }

        debug!(
            "{} store: fetching (force_refresh = {})",
            self.name, force_refresh
        );
        self.error = None;

        let result = self.source.fetch().await;
        match result {
            Ok(data) => {
                self.cached = Some(CachedData::new(data.clone()));
                data
            }
            Err(e) => {
                error!("{} store error: {}", self.name, e);
                self.error = Some(e.to_string());
                T::default()
            }
        }
    }

    /// Re-fetch regardless of cache validity.
    pub async fn refresh_data(&mut self) -> T {
        self.fetch_data(true).await
    }

    /// Clear all data and reset the store.
    pub fn clear_data(&mut self) {
        self.cached = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source returning the call number, failing on the calls listed in `fail_on`.
    fn counting_source(
        calls: Arc<AtomicUsize>,
        fail_on: &'static [usize],
    ) -> impl DataSource<Vec<usize>> {
        move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if fail_on.contains(&n) {
                    Err(SiteError::Other(format!("fetch {} failed", n)))
                } else {
                    Ok(vec![n])
                }
            }
        }
    }

    #[test]
    fn test_cached_data_expiry() {
        let mut data = CachedData::new("test");
        assert!(data.is_valid(Duration::from_secs(300)));

        // Set cached_at to the past
        data.cached_at = Utc::now() - chrono::Duration::seconds(600);
        assert!(!data.is_valid(Duration::from_secs(300)));

        // Zero TTL is never valid
        assert!(!CachedData::new("test").is_valid(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_serves_cache_until_expired() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ApiStore::new("test", counting_source(calls.clone(), &[]));

        assert!(!store.is_cache_valid());
        assert_eq!(store.fetch_data(false).await, vec![1]);
        assert_eq!(store.fetch_data(false).await, vec![1]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.is_cache_valid());

        // Backdate the fetch past the expiration
        if let Some(cached) = store.cached.as_mut() {
            cached.cached_at = Utc::now() - chrono::Duration::seconds(301);
        }
        assert!(!store.is_cache_valid());
        assert_eq!(store.fetch_data(false).await, vec![2]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ApiStore::new("test", counting_source(calls.clone(), &[]));

        store.fetch_data(false).await;
        assert_eq!(store.fetch_data(true).await, vec![2]);
        assert_eq!(store.refresh_data().await, vec![3]);
        assert_eq!(store.data(), &vec![3]);
    }

    #[tokio::test]
    async fn test_error_is_captured_and_data_kept() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ApiStore::new("test", counting_source(calls.clone(), &[2]));

        store.fetch_data(false).await;
        let fetched_at = store.last_fetched();

        let result = store.fetch_data(true).await;
        assert!(result.is_empty());
        assert_eq!(store.error(), Some("fetch 2 failed"));
        assert_eq!(store.data(), &vec![1]);
        assert_eq!(store.last_fetched(), fetched_at);

        // A successful fetch clears the error
        store.fetch_data(true).await;
        assert!(store.error().is_none());
        assert_eq!(store.data(), &vec![3]);
    }

    #[tokio::test]
    async fn test_zero_expiration_always_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ApiStore::new("test", counting_source(calls.clone(), &[]));
        store.set_cache_expiration(Duration::ZERO);

        store.fetch_data(false).await;
        store.fetch_data(false).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ApiStore::new("test", counting_source(calls.clone(), &[1]));

        store.fetch_data(false).await;
        assert!(store.error().is_some());

        store.clear_data();
        assert!(store.error().is_none());
        assert!(store.last_fetched().is_none());
        assert!(store.data().is_empty());
        assert!(!store.is_cache_valid());
    }
}
