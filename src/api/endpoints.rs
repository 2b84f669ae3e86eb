// Site data endpoint functions.
// One typed fetch per static JSON file, each with its failure policy.

use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::error::Result;

use super::client::SiteClient;
use super::types::{Article, Card, CarouselImage, PageContent, PageContentMap, StaffMember};

/// What an endpoint hands back when the fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Log the failure and return an empty value.
    Empty,
    /// Return the error to the caller.
    Propagate,
}

/// A static JSON file served by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Articles,
    Cards,
    CarouselImages,
    Staff,
    PageContent,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Articles,
        Resource::Cards,
        Resource::CarouselImages,
        Resource::Staff,
        Resource::PageContent,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Resource::Articles => "/data/articles.json",
            Resource::Cards => "/data/cards.json",
            Resource::CarouselImages => "/data/carousel-images.json",
            Resource::Staff => "/data/staff.json",
            Resource::PageContent => "/data/page-content.json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::Cards => "cards",
            Resource::CarouselImages => "carousel images",
            Resource::Staff => "staff data",
            Resource::PageContent => "page content",
        }
    }

    pub fn fallback(&self) -> Fallback {
        match self {
            Resource::Articles | Resource::CarouselImages | Resource::Staff => Fallback::Empty,
            Resource::Cards | Resource::PageContent => Fallback::Propagate,
        }
    }
}

impl SiteClient {
    /// Fetch a resource, applying its failure policy.
    async fn fetch_resource<T: DeserializeOwned + Default>(&self, resource: Resource) -> Result<T> {
        match self.get_json(resource.path()).await {
            Ok(value) => Ok(value),
            Err(e) => match resource.fallback() {
                Fallback::Empty => {
                    warn!("Failed to fetch {}: {}", resource.label(), e);
                    Ok(T::default())
                }
                Fallback::Propagate => {
                    error!("Failed to fetch {}: {}", resource.label(), e);
                    Err(e)
                }
            },
        }
    }

    /// Get all articles. Failures yield an empty list.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.fetch_resource(Resource::Articles).await
    }

    /// Get only the articles flagged as featured.
    pub async fn fetch_featured_articles(&self) -> Result<Vec<Article>> {
        let articles = self.fetch_articles().await?;
        Ok(articles.into_iter().filter(|a| a.featured).collect())
    }

    /// Get all home page cards.
    pub async fn fetch_cards(&self) -> Result<Vec<Card>> {
        self.fetch_resource(Resource::Cards).await
    }

    /// Get carousel images. Failures yield an empty list.
    pub async fn fetch_carousel_images(&self) -> Result<Vec<CarouselImage>> {
        self.fetch_resource(Resource::CarouselImages).await
    }

    /// Get staff members. Failures yield an empty list.
    pub async fn fetch_staff(&self) -> Result<Vec<StaffMember>> {
        self.fetch_resource(Resource::Staff).await
    }

    /// Get content for every page.
    pub async fn fetch_page_content(&self) -> Result<PageContentMap> {
        self.fetch_resource(Resource::PageContent).await
    }

    /// Get content for one page, `None` if the page has no entry.
    pub async fn fetch_page_content_by_name(&self, page: &str) -> Result<Option<PageContent>> {
        let mut pages = self.fetch_page_content().await?;
        Ok(pages.remove(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_policies() {
        assert_eq!(Resource::Articles.fallback(), Fallback::Empty);
        assert_eq!(Resource::Staff.fallback(), Fallback::Empty);
        assert_eq!(Resource::Cards.fallback(), Fallback::Propagate);
        assert_eq!(Resource::PageContent.fallback(), Fallback::Propagate);
    }

    #[test]
    fn test_paths_are_distinct() {
        let mut paths: Vec<_> = Resource::ALL.iter().map(|r| r.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Resource::ALL.len());
        assert!(paths.iter().all(|p| p.starts_with("/data/")));
    }
}
