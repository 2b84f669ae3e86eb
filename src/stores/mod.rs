// Per-domain data stores.
// Each wraps the generic TTL store around one site endpoint.

pub mod articles;
pub mod cards;
pub mod page_content;

use crate::api::{CarouselImage, SiteClient, StaffMember};
use crate::cache::ApiStore;

pub use articles::ArticleStore;
pub use cards::CardStore;
pub use page_content::PageContentStore;

/// Staff member data.
pub type StaffStore = ApiStore<Vec<StaffMember>>;

/// Carousel image data.
pub type CarouselStore = ApiStore<Vec<CarouselImage>>;

pub fn staff_store(client: &SiteClient) -> StaffStore {
    let client = client.clone();
    ApiStore::new("staff", move || {
        let client = client.clone();
        async move { client.fetch_staff().await }
    })
}

pub fn carousel_store(client: &SiteClient) -> CarouselStore {
    let client = client.clone();
    ApiStore::new("carousel", move || {
        let client = client.clone();
        async move { client.fetch_carousel_images().await }
    })
}
