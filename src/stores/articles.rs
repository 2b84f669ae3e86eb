// Article store.
// Caches all articles and, separately, the featured subset.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::api::{Article, ContentId, SiteClient};
use crate::cache::{ApiStore, DataSource, is_fresh};

pub struct ArticleStore {
    base: ApiStore<Vec<Article>>,
    featured_source: Box<dyn DataSource<Vec<Article>>>,
    featured: Vec<Article>,
    featured_error: Option<String>,
    last_featured_fetched: Option<DateTime<Utc>>,
}

impl ArticleStore {
    pub fn new(client: &SiteClient) -> Self {
        let all = client.clone();
        let featured = client.clone();
        Self::with_sources(
            move || {
                let client = all.clone();
                async move { client.fetch_articles().await }
            },
            move || {
                let client = featured.clone();
                async move { client.fetch_featured_articles().await }
            },
        )
    }

    pub fn with_sources(
        all: impl DataSource<Vec<Article>> + 'static,
        featured: impl DataSource<Vec<Article>> + 'static,
    ) -> Self {
        Self {
            base: ApiStore::new("articles", all),
            featured_source: Box::new(featured),
            featured: Vec::new(),
            featured_error: None,
            last_featured_fetched: None,
        }
    }

    pub fn all_articles(&self) -> &[Article] {
        self.base.data()
    }

    pub fn featured_articles(&self) -> &[Article] {
        &self.featured
    }

    pub fn base(&self) -> &ApiStore<Vec<Article>> {
        &self.base
    }

    pub fn error(&self) -> Option<&str> {
        self.base.error()
    }

    pub fn featured_error(&self) -> Option<&str> {
        self.featured_error.as_deref()
    }

    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.base.set_cache_expiration(expiration);
    }

    /// Featured articles share the expiration of the full list.
    pub fn is_featured_cache_valid(&self) -> bool {
        is_fresh(self.last_featured_fetched, self.base.cache_expiration())
    }

    pub async fn fetch_all_articles(&mut self, force_refresh: bool) -> Vec<Article> {
        self.base.fetch_data(force_refresh).await
    }

    /// Fetch only featured articles, filtering the cached list when it is fresh.
    pub async fn fetch_featured_articles(&mut self, force_refresh: bool) -> Vec<Article> {
        if self.is_featured_cache_valid() && !force_refresh {
            return self.featured.clone();
        }

        self.featured_error = None;

        if self.base.is_cache_valid() && !force_refresh && !self.base.data().is_empty() {
            debug!("featured articles: filtering cached articles");
            self.featured = self
                .base
                .data()
                .iter()
                .filter(|article| article.featured)
                .cloned()
                .collect();
        } else {
            let result = self.featured_source.fetch().await;
            match result {
                Ok(featured) => self.featured = featured,
                Err(e) => {
                    error!("Featured articles error: {}", e);
                    self.featured_error = Some(e.to_string());
                    return Vec::new();
                }
            }
        }

        self.last_featured_fetched = Some(Utc::now());
        self.featured.clone()
    }

    /// Get a single article by id, fetching the list if it is not cached.
    pub async fn get_article_by_id(
        &mut self,
        id: impl Into<ContentId>,
        force_refresh: bool,
    ) -> Option<Article> {
        let id = id.into();
        self.find_article(|article| article.id == id, force_refresh)
            .await
    }

    /// Get a single article by its route slug.
    pub async fn get_article_by_slug(&mut self, slug: &str, force_refresh: bool) -> Option<Article> {
        self.find_article(|article| article.matches_slug(slug), force_refresh)
            .await
    }

    async fn find_article(
        &mut self,
        matches: impl Fn(&Article) -> bool,
        force_refresh: bool,
    ) -> Option<Article> {
        if !force_refresh {
            if let Some(article) = self.base.data().iter().find(|a| matches(a)) {
                return Some(article.clone());
            }
        }

        self.fetch_all_articles(force_refresh).await;
        self.base.data().iter().find(|a| matches(a)).cloned()
    }

    /// Clear all article data.
    pub fn clear_all_data(&mut self) {
        self.base.clear_data();
        self.featured.clear();
        self.featured_error = None;
        self.last_featured_fetched = None;
    }
}
