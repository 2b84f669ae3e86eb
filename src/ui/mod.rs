// UI module for rendering the TUI.
// Contains widgets for tabs, breadcrumbs, lists and rendered pages.

mod breadcrumb;
mod list;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::router::Route;

pub use list::format_relative_time;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    let current = app.nav.current().clone();
    breadcrumb::draw_breadcrumb(
        frame,
        &app.nav.breadcrumbs(),
        &app.site.router.href(&current),
        chunks[1],
        app.site.last_fetched(&current),
    );

    draw_content(frame, app, &current, chunks[2]);
    draw_status_bar(frame, app, &current, chunks[3]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the main content area for the current route.
fn draw_content(frame: &mut Frame, app: &mut App, route: &Route, area: Rect) {
    match route {
        Route::Blog => list::render_articles_list(frame, &mut app.articles, area),
        Route::Home | Route::SingleArticle { .. } => {
            list::render_page(frame, &app.page, &route.title(), app.scroll, area)
        }
    }
}

/// Draw the status bar with keybinding hints and cache age.
fn draw_status_bar(frame: &mut Frame, app: &App, route: &Route, area: Rect) {
    let key = |k: &'static str| Span::raw(k);
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(Color::DarkGray));

    let mut spans = if *route == Route::Blog {
        vec![key(" ↑↓ "), hint("Navigate"), key("  ↵ "), hint("Open")]
    } else {
        vec![key(" ↑↓ "), hint("Scroll"), key("  PgUp/Dn "), hint("Page")]
    };
    spans.extend([
        key("  Esc "),
        hint("Back"),
        key("  Tab "),
        hint("Switch"),
        key("  r "),
        hint("Refresh"),
        key("  ? "),
        hint("Help"),
        key("  q "),
        hint("Quit"),
    ]);

    if let Some(fetched) = app.site.last_fetched(route) {
        spans.push(Span::styled(
            format!("  Updated {}", format_relative_time(&fetched)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  ⚠ {}", status),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50;
    let popup_height = 15;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let bindings = [
        ("  ↑/↓ or j/k    ", "Select article / scroll page"),
        ("  PgUp/PgDn     ", "Page scroll"),
        ("  Home or g     ", "Back to top"),
        ("  Enter         ", "Open article"),
        ("  Esc           ", "Go back / close help"),
        ("  Tab           ", "Switch tabs"),
        ("  r             ", "Refresh, bypassing the cache"),
        ("  ?             ", "Show/hide this help"),
        ("  q             ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_text.extend(bindings.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, Style::default().fg(Color::Cyan)),
            Span::raw(*action),
        ])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
    ]));

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::backend::TestBackend;

    use crate::api::SiteClient;
    use crate::cache::DEFAULT_TTL;
    use crate::router::Router;
    use crate::site::Site;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_loading_and_help() {
        let client = SiteClient::new("http://localhost:9/", Duration::from_secs(1), "test")
            .unwrap();
        let site = Site::new(client, Router::default(), DEFAULT_TTL);
        let mut app = App::new(site, Route::Blog);

        let text = screen(&mut app);
        assert!(text.contains("sitefront"));
        assert!(text.contains("Loading articles"));

        app.show_help = true;
        let text = screen(&mut app);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
