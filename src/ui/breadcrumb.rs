// Breadcrumb rendering for navigation trail.
// Shows the route path on the left and when its data was fetched on the right.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::state::BreadcrumbNode;

/// Format timestamp for display with local timezone.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    let local: DateTime<chrono::Local> = dt.with_timezone(&chrono::Local);
    local.format("%Y-%m-%d %H:%M:%S %z").to_string()
}

/// Spans for the breadcrumb trail, current level highlighted.
fn breadcrumb_spans(breadcrumbs: &[BreadcrumbNode]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, node) in breadcrumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        }

        let style = if i == breadcrumbs.len() - 1 {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        spans.push(Span::styled(node.label.clone(), style));
    }

    spans
}

/// Render the breadcrumb trail.
pub fn draw_breadcrumb(
    frame: &mut Frame,
    breadcrumbs: &[BreadcrumbNode],
    href: &str,
    area: Rect,
    timestamp: Option<DateTime<Utc>>,
) {
    let mut spans = breadcrumb_spans(breadcrumbs);
    spans.push(Span::styled(
        format!("  {}", href),
        Style::default().fg(Color::DarkGray),
    ));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);

    // Fetch time on the right of the first row
    if let Some(ts) = timestamp {
        let timestamp_para = Paragraph::new(Line::from(Span::styled(
            format_timestamp(&ts),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(
            timestamp_para,
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: 1,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;

    #[test]
    fn test_breadcrumb_spans() {
        let crumbs = vec![
            BreadcrumbNode {
                label: "Blog".to_string(),
                route: Route::Blog,
            },
            BreadcrumbNode {
                label: "spring".to_string(),
                route: Route::SingleArticle {
                    slug: "spring".to_string(),
                },
            },
        ];
        let spans = breadcrumb_spans(&crumbs);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Blog > spring");
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
    }
}
