// Site content types.
// Structs for deserializing the static JSON data files.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a content item. The data files use numbers or strings.
///
/// Ids compare by their text form, so `7` and `"7"` are the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentId {
    Number(u64),
    Text(String),
}

impl PartialEq for ContentId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContentId::Number(a), ContentId::Number(b)) => a == b,
            (ContentId::Text(a), ContentId::Text(b)) => a == b,
            (ContentId::Number(n), ContentId::Text(s))
            | (ContentId::Text(s), ContentId::Number(n)) => *s == n.to_string(),
        }
    }
}

impl Eq for ContentId {}

impl Hash for ContentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `eq`
        self.to_string().hash(state);
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentId::Number(n) => write!(f, "{}", n),
            ContentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        ContentId::Number(id)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        ContentId::Text(id.to_string())
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        ContentId::Text(id)
    }
}

/// Blog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ContentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// The path segment used by the single-article route.
    pub fn route_slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn matches_slug(&self, slug: &str) -> bool {
        match &self.slug {
            Some(own) => own == slug,
            None => self.id.to_string() == slug,
        }
    }
}

/// Home page feature card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: ContentId,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "text")]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Image shown in the home page carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    #[serde(default, alias = "url", alias = "image")]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl CarouselImage {
    pub fn label(&self) -> &str {
        self.caption
            .as_deref()
            .or(self.alt.as_deref())
            .unwrap_or(&self.src)
    }
}

/// Staff member profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(default)]
    pub id: Option<ContentId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "title", alias = "position")]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Hero banner at the top of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Content section of a page, addressed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: ContentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "body", alias = "text")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Content of one page. Fields other than hero and sections are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub hero: Option<Hero>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PageContent {
    /// Find a section by its id.
    pub fn section(&self, id: impl Into<ContentId>) -> Option<&Section> {
        let id = id.into();
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }
}

/// All pages, keyed by page name (`home`, `about`, ...).
pub type PageContentMap = BTreeMap<String, PageContent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_forms() {
        let numeric: ContentId = serde_json::from_str("7").unwrap();
        let text: ContentId = serde_json::from_str("\"intro\"").unwrap();
        assert_eq!(numeric, ContentId::Number(7));
        assert_eq!(text, ContentId::Text("intro".to_string()));
        assert_eq!(ContentId::from("7"), numeric);
        assert_eq!(text.to_string(), "intro");
    }

    #[test]
    fn test_numeric_string_id_matches_itself() {
        let quoted: ContentId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(quoted, ContentId::Text("42".to_string()));
        assert_eq!(ContentId::from("42"), quoted);
        assert_eq!(ContentId::from(42u64), quoted);
        assert_ne!(ContentId::from("042"), ContentId::from(42u64));

        let mut ids = std::collections::HashSet::new();
        ids.insert(ContentId::Number(42));
        assert!(ids.contains(&ContentId::from("42")));
    }

    #[test]
    fn test_records_with_missing_fields_still_decode() {
        let json = r#"[{"id": 1, "title": "ok"}, {"id": 2, "slug": "draft"}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title, "");
        assert_eq!(articles[1].route_slug(), "draft");

        let card: Card = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(card.title.is_empty());
        let staff: StaffMember = serde_json::from_str(r#"{"role": "Director"}"#).unwrap();
        assert!(staff.name.is_empty());
        let image: CarouselImage = serde_json::from_str(r#"{"alt": "Porch"}"#).unwrap();
        assert_eq!(image.label(), "Porch");
    }

    #[test]
    fn test_numeric_section_ids() {
        let json = r#"{"sections": [{"id": 1, "title": "First"}, {"id": "2", "title": "Second"}]}"#;
        let page: PageContent = serde_json::from_str(json).unwrap();
        assert_eq!(page.section("1").unwrap().title.as_deref(), Some("First"));
        assert_eq!(page.section(2u64).unwrap().title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_article_defaults() {
        let json = r#"{"id": 3, "title": "Opening day", "imageUrl": "/img/open.jpg"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(!article.featured);
        assert!(article.tags.is_empty());
        assert_eq!(article.image_url.as_deref(), Some("/img/open.jpg"));
        assert_eq!(article.route_slug(), "3");
        assert!(article.matches_slug("3"));
    }

    #[test]
    fn test_article_slug_takes_precedence() {
        let json = r#"{"id": 3, "title": "Opening day", "slug": "opening-day", "featured": true}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.featured);
        assert!(article.matches_slug("opening-day"));
        assert!(!article.matches_slug("3"));
    }

    #[test]
    fn test_page_content_helpers() {
        let json = r#"{
            "hero": {"title": "Welcome", "cta": "Join us"},
            "sections": [
                {"id": "mission", "title": "Our mission", "body": "Serve the community"},
                {"id": "history", "title": "History"}
            ],
            "footerNote": "est. 1998"
        }"#;
        let page: PageContent = serde_json::from_str(json).unwrap();

        let hero = page.hero().unwrap();
        assert_eq!(hero.title.as_deref(), Some("Welcome"));
        assert_eq!(hero.extra.get("cta"), Some(&Value::from("Join us")));

        let mission = page.section("mission").unwrap();
        assert_eq!(mission.content.as_deref(), Some("Serve the community"));
        assert!(page.section("missing").is_none());
        assert!(page.extra.contains_key("footerNote"));
    }

    #[test]
    fn test_page_without_sections() {
        let page: PageContent = serde_json::from_str("{}").unwrap();
        assert!(page.hero().is_none());
        assert!(page.section("anything").is_none());
    }

    #[test]
    fn test_carousel_label() {
        let image: CarouselImage =
            serde_json::from_str(r#"{"url": "/img/a.jpg", "alt": "Front door"}"#).unwrap();
        assert_eq!(image.src, "/img/a.jpg");
        assert_eq!(image.label(), "Front door");
    }
}
