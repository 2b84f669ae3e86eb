// Site data facade.
// Owns the router and one store per data domain, and loads what a route needs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::api::{Article, Card, CarouselImage, PageContent, SiteClient, StaffMember};
use crate::config::Config;
use crate::error::{Result, SiteError};
use crate::router::{Route, Router};
use crate::stores::{
    ArticleStore, CardStore, CarouselStore, PageContentStore, StaffStore, carousel_store,
    staff_store,
};

/// Name of the page content entry used by the home view.
pub const HOME_PAGE: &str = "home";

/// Everything the home view shows.
#[derive(Debug, Clone, Default)]
pub struct HomeData {
    pub page: Option<PageContent>,
    pub carousel: Vec<CarouselImage>,
    pub featured: Vec<Article>,
    pub cards: Vec<Card>,
    pub staff: Vec<StaffMember>,
}

/// Data loaded for a route.
#[derive(Debug, Clone)]
pub enum PageData {
    Home(HomeData),
    Blog(Vec<Article>),
    Article(Article),
}

pub struct Site {
    pub router: Router,
    pub articles: ArticleStore,
    pub cards: CardStore,
    pub carousel: CarouselStore,
    pub staff: StaffStore,
    pub pages: PageContentStore,
}

impl Site {
    /// Build a site whose stores all fetch through `client`.
    pub fn new(client: SiteClient, router: Router, cache_expiration: Duration) -> Self {
        let mut site = Self {
            router,
            articles: ArticleStore::new(&client),
            cards: CardStore::new(&client),
            carousel: carousel_store(&client),
            staff: staff_store(&client),
            pages: PageContentStore::new(&client),
        };
        site.set_cache_expiration(cache_expiration);
        site
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = SiteClient::from_config(config)?;
        Ok(Self::new(
            client,
            Router::new(&config.site.base_path),
            config.cache_expiration(),
        ))
    }

    /// Apply one expiration to every store.
    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.articles.set_cache_expiration(expiration);
        self.cards.set_cache_expiration(expiration);
        self.carousel.set_cache_expiration(expiration);
        self.staff.set_cache_expiration(expiration);
        self.pages.set_cache_expiration(expiration);
    }

    /// Resolve a path and load its data.
    pub async fn load_path(&mut self, path: &str, force_refresh: bool) -> Result<(Route, PageData)> {
        let route = self.router.resolve(path)?;
        let data = self.load(&route, force_refresh).await?;
        Ok((route, data))
    }

    /// Load the data a route renders.
    pub async fn load(&mut self, route: &Route, force_refresh: bool) -> Result<PageData> {
        info!("Loading {} (force_refresh = {})", route.path(), force_refresh);
        match route {
            Route::Home => Ok(PageData::Home(self.home(force_refresh).await)),
            Route::Blog => Ok(PageData::Blog(
                self.articles.fetch_all_articles(force_refresh).await,
            )),
            Route::SingleArticle { slug } => self
                .articles
                .get_article_by_slug(slug, force_refresh)
                .await
                .map(PageData::Article)
                .ok_or_else(|| {
                    let reason = self
                        .articles
                        .error()
                        .map(|e| format!(" ({})", e))
                        .unwrap_or_default();
                    SiteError::NotFound(format!("article '{}'{}", slug, reason))
                }),
        }
    }

    async fn home(&mut self, force_refresh: bool) -> HomeData {
        HomeData {
            page: self.pages.fetch_page_content(HOME_PAGE, force_refresh).await,
            carousel: self.carousel.fetch_data(force_refresh).await,
            featured: self.articles.fetch_featured_articles(force_refresh).await,
            cards: self.cards.fetch_all_cards(force_refresh).await,
            staff: self.staff.fetch_data(force_refresh).await,
        }
    }

    /// Errors captured by the stores on their last fetch.
    pub fn errors(&self) -> Vec<String> {
        let captured = [
            ("articles", self.articles.error()),
            ("featured articles", self.articles.featured_error()),
            ("cards", self.cards.error()),
            ("carousel", self.carousel.error()),
            ("staff", self.staff.error()),
            ("page content", self.pages.error()),
        ];
        captured
            .into_iter()
            .filter_map(|(store, error)| error.map(|e| format!("{}: {}", store, e)))
            .collect()
    }

    /// Most recent fetch time across the stores a route reads.
    pub fn last_fetched(&self, route: &Route) -> Option<DateTime<Utc>> {
        match route {
            Route::Home => [
                self.pages.base().last_fetched(),
                self.carousel.last_fetched(),
                self.cards.base().last_fetched(),
                self.staff.last_fetched(),
            ]
            .into_iter()
            .flatten()
            .max(),
            Route::Blog | Route::SingleArticle { .. } => self.articles.base().last_fetched(),
        }
    }

    /// Drop every cached value.
    pub fn clear(&mut self) {
        self.articles.clear_all_data();
        self.cards.clear_data();
        self.carousel.clear_data();
        self.staff.clear_data();
        self.pages.clear_cache();
    }
}
