// Client-side routing.
// Maps site paths under a base path to the views that render them.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::error::{Result, SiteError};

/// Bytes escaped in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Blog,
    SingleArticle { slug: String },
}

impl Route {
    /// Route name, as used for named navigation.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Blog => "blog",
            Route::SingleArticle { .. } => "single-article",
        }
    }

    /// Path relative to the router base, with the slug percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::SingleArticle { slug } => {
                format!("/blog/{}", utf8_percent_encode(slug, SEGMENT))
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Blog => "Blog".to_string(),
            Route::SingleArticle { slug } => slug.clone(),
        }
    }
}

/// One entry in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
}

pub const ROUTES: [RouteDef; 3] = [
    RouteDef {
        name: "home",
        pattern: "/",
    },
    RouteDef {
        name: "blog",
        pattern: "/blog",
    },
    RouteDef {
        name: "single-article",
        pattern: "/blog/:slug",
    },
];

/// Scroll position to restore after navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub top: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    base_path: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    /// Create a router mounted under `base_path` (e.g. `/` or `/site/`).
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        if self.base_path.is_empty() {
            "/"
        } else {
            &self.base_path
        }
    }

    pub fn routes(&self) -> &'static [RouteDef] {
        &ROUTES
    }

    /// Resolve a full path (with base, query or fragment) to a route.
    pub fn resolve(&self, path: &str) -> Result<Route> {
        let not_found = || SiteError::RouteNotFound(path.to_string());

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let relative = if self.base_path.is_empty() {
            path.as_str()
        } else {
            match path.strip_prefix(&self.base_path) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => return Err(not_found()),
            }
        };

        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["blog"] => Ok(Route::Blog),
            ["blog", slug] => {
                let slug = percent_decode_str(slug)
                    .decode_utf8()
                    .map_err(|_| not_found())?;
                Ok(Route::SingleArticle {
                    slug: slug.into_owned(),
                })
            }
            _ => Err(not_found()),
        }
    }

    /// Full path for a route, including the base path.
    pub fn href(&self, route: &Route) -> String {
        match route {
            Route::Home => format!("{}/", self.base_path),
            route => format!("{}{}", self.base_path, route.path()),
        }
    }

    /// Where to scroll after navigating: always the top of the page.
    pub fn scroll_behavior(
        &self,
        _to: &Route,
        _from: Option<&Route>,
        _saved: Option<ScrollPosition>,
    ) -> ScrollPosition {
        ScrollPosition { top: 0 }
    }
}
