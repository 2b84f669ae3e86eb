// Views for each route.
// Render loaded page data into styled text for the TUI or plain stdout.

pub mod article;
pub mod blog;
pub mod home;

use ratatui::prelude::*;

use crate::router::Router;
use crate::site::PageData;

pub use article::render_article;
pub use blog::render_blog;
pub use home::render_home;

/// Render the view for loaded page data. Links are built by `router`.
pub fn render(data: &PageData, router: &Router) -> Text<'static> {
    match data {
        PageData::Home(home) => render_home(home),
        PageData::Blog(articles) => render_blog(articles, router),
        PageData::Article(article) => render_article(article),
    }
}

/// Flatten styled text to plain lines.
pub fn to_plain(text: &Text) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(title: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        title.into(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(Color::DarkGray))
}

/// Article metadata line: author and date, when present.
fn article_meta(author: Option<&str>, date: Option<&str>) -> Option<String> {
    match (author, date) {
        (Some(author), Some(date)) => Some(format!("{} · {}", author, date)),
        (Some(author), None) => Some(author.to_string()),
        (None, Some(date)) => Some(date.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_plain_joins_spans() {
        let text = Text::from(vec![
            Line::from(vec![Span::raw("a"), muted("b")]),
            heading("c"),
        ]);
        assert_eq!(to_plain(&text), "ab\nc");
    }

    #[test]
    fn test_article_meta() {
        assert_eq!(
            article_meta(Some("Ana"), Some("2024-03-01")).as_deref(),
            Some("Ana · 2024-03-01")
        );
        assert_eq!(article_meta(None, None), None);
    }
}
