// Blog view.
// One entry per article: title, meta and excerpt.

use ratatui::prelude::*;

use crate::api::Article;
use crate::router::{Route, Router};

use super::{article_meta, muted};

/// One list line for an article, shared with the TUI list.
pub fn article_line(article: &Article) -> Line<'static> {
    let mut spans = Vec::new();
    if article.featured {
        spans.push(Span::styled("★ ", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(
        article.title.clone(),
        Style::default().fg(Color::Cyan),
    ));
    if let Some(meta) = article_meta(article.author.as_deref(), article.date.as_deref()) {
        spans.push(muted(format!("  {}", meta)));
    }
    Line::from(spans)
}

/// Article list with links built by `router`, so they carry its base path.
pub fn render_blog(articles: &[Article], router: &Router) -> Text<'static> {
    if articles.is_empty() {
        return Text::from(Line::from(muted("No articles yet")));
    }

    let mut lines = Vec::new();
    for article in articles {
        lines.push(article_line(article));
        if let Some(excerpt) = &article.excerpt {
            lines.push(Line::from(format!("  {}", excerpt)));
        }
        let route = Route::SingleArticle {
            slug: article.route_slug(),
        };
        lines.push(Line::from(muted(format!("  {}", router.href(&route)))));
    }
    Text::from(lines)
}
