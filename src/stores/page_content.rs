// Page content store.
// Caches the page content map and resolves pages and sections by name.

use std::time::Duration;

use crate::api::{PageContent, PageContentMap, Section, SiteClient};
use crate::cache::{ApiStore, DataSource};
use crate::error::Result;

pub struct PageContentStore {
    base: ApiStore<Option<PageContentMap>>,
}

impl PageContentStore {
    pub fn new(client: &SiteClient) -> Self {
        let client = client.clone();
        Self::with_source(move || {
            let client = client.clone();
            async move { client.fetch_page_content().await }
        })
    }

    pub fn with_source<S>(source: S) -> Self
    where
        S: DataSource<PageContentMap> + 'static,
    {
        Self {
            base: ApiStore::new("page content", Present(source)),
        }
    }

    pub fn all_content(&self) -> Option<&PageContentMap> {
        self.base.data().as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.base.error()
    }

    pub fn base(&self) -> &ApiStore<Option<PageContentMap>> {
        &self.base
    }

    pub fn is_cache_valid(&self) -> bool {
        self.base.is_cache_valid()
    }

    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.base.set_cache_expiration(expiration);
    }

    /// Content for a page from the cached map.
    pub fn get_page_content(&self, page: &str) -> Option<&PageContent> {
        self.all_content()?.get(page)
    }

    /// A section of a page from the cached map.
    pub fn get_section(&self, page: &str, section_id: &str) -> Option<&Section> {
        self.get_page_content(page)?.section(section_id)
    }

    /// Fetch every page. `None` when the fetch fails.
    pub async fn fetch_all_content(&mut self, force_refresh: bool) -> Option<PageContentMap> {
        self.base.fetch_data(force_refresh).await
    }

    /// Fetch one page, going to the source only when the cache is stale.
    pub async fn fetch_page_content(
        &mut self,
        page: &str,
        force_refresh: bool,
    ) -> Option<PageContent> {
        if !(self.is_cache_valid() && self.all_content().is_some()) || force_refresh {
            self.fetch_all_content(force_refresh).await;
        }
        self.get_page_content(page).cloned()
    }

    pub fn clear_cache(&mut self) {
        self.base.clear_data();
    }
}

/// Adapts a page map source to the store's optional value.
struct Present<S>(S);

#[async_trait::async_trait]
impl<S> DataSource<Option<PageContentMap>> for Present<S>
where
    S: DataSource<PageContentMap>,
{
    async fn fetch(&self) -> Result<Option<PageContentMap>> {
        self.0.fetch().await.map(Some)
    }
}
