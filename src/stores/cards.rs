// Card store.
// Caches the home page cards and looks them up by id.

use std::time::Duration;

use crate::api::{Card, ContentId, SiteClient};
use crate::cache::{ApiStore, DataSource};

pub struct CardStore {
    base: ApiStore<Vec<Card>>,
}

impl CardStore {
    pub fn new(client: &SiteClient) -> Self {
        let client = client.clone();
        Self::with_source(move || {
            let client = client.clone();
            async move { client.fetch_cards().await }
        })
    }

    pub fn with_source(source: impl DataSource<Vec<Card>> + 'static) -> Self {
        Self {
            base: ApiStore::new("cards", source),
        }
    }

    pub fn all_cards(&self) -> &[Card] {
        self.base.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.base.error()
    }

    pub fn base(&self) -> &ApiStore<Vec<Card>> {
        &self.base
    }

    pub fn set_cache_expiration(&mut self, expiration: Duration) {
        self.base.set_cache_expiration(expiration);
    }

    pub async fn fetch_all_cards(&mut self, force_refresh: bool) -> Vec<Card> {
        self.base.fetch_data(force_refresh).await
    }

    /// Look up a card in the cached data without fetching.
    pub fn get_card_by_id(&self, id: impl Into<ContentId>) -> Option<&Card> {
        let id = id.into();
        self.base.data().iter().find(|card| card.id == id)
    }

    pub fn clear_data(&mut self) {
        self.base.clear_data();
    }
}
