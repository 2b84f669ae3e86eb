// Single article view.

use ratatui::prelude::*;

use crate::api::Article;

use super::{article_meta, heading, muted};

pub fn render_article(article: &Article) -> Text<'static> {
    let mut lines = vec![heading(article.title.clone())];

    if let Some(meta) = article_meta(article.author.as_deref(), article.date.as_deref()) {
        lines.push(Line::from(muted(meta)));
    }
    lines.push(Line::default());

    match article.content.as_deref().or(article.excerpt.as_deref()) {
        Some(body) => lines.extend(body.lines().map(|l| Line::from(l.to_string()))),
        None => lines.push(Line::from(muted("(no content)"))),
    }

    if !article.tags.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            muted("Tags: "),
            Span::styled(article.tags.join(", "), Style::default().fg(Color::Magenta)),
        ]));
    }

    Text::from(lines)
}
