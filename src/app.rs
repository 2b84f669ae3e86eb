// App state and main event loop.
// Manages tabs, route navigation, view state and keyboard input handling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tracing::{debug, warn};

use crate::api::Article;
use crate::router::{Route, ScrollPosition};
use crate::site::{PageData, Site};
use crate::state::{LoadingState, NavigationStack, SelectableList};
use crate::{ui, views};

/// Lines moved by PgUp/PgDn.
const PAGE_SCROLL: u16 = 10;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Blog,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Home, Tab::Blog];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Blog => "Blog",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Blog,
            Tab::Blog => Tab::Home,
        }
    }

    pub fn prev(&self) -> Self {
        // Two tabs: previous and next coincide
        self.next()
    }

    /// Root route of the tab.
    pub fn route(&self) -> Route {
        match self {
            Tab::Home => Route::Home,
            Tab::Blog => Route::Blog,
        }
    }

    /// Tab a route belongs to.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Tab::Home,
            Route::Blog | Route::SingleArticle { .. } => Tab::Blog,
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    /// Route stack for the active tab.
    pub nav: NavigationStack,
    pub site: Site,
    /// Rendered home or article page.
    pub page: LoadingState<Text<'static>>,
    /// Blog article list.
    pub articles: SelectableList<Article>,
    /// Vertical scroll of the rendered page.
    pub scroll: u16,
    /// Whether the help overlay is showing.
    pub show_help: bool,
    /// Last store errors, shown in the status bar.
    pub status: Option<String>,
    /// Whether the app should exit.
    pub should_quit: bool,
    /// Load requested for the current route; the flag forces a refresh.
    pending_load: Option<bool>,
}

impl App {
    /// Create the app positioned at `start`; its data loads on the first loop turn.
    pub fn new(site: Site, start: Route) -> Self {
        let active_tab = Tab::for_route(&start);
        let mut nav = NavigationStack::new(active_tab.route());
        if start != active_tab.route() {
            nav.push(start);
        }
        let mut app = Self {
            active_tab,
            nav,
            site,
            page: LoadingState::Idle,
            articles: SelectableList::new(),
            scroll: 0,
            show_help: false,
            status: None,
            should_quit: false,
            pending_load: None,
        };
        app.request_load(false);
        app
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            // The loading state is on screen now, so the fetch can block the loop
            if let Some(force_refresh) = self.pending_load.take() {
                self.load_current(force_refresh).await;
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Whether a load is queued for the next loop turn.
    pub fn is_load_pending(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Queue a load of the current route and show its loading state.
    fn request_load(&mut self, force_refresh: bool) {
        match self.nav.current() {
            Route::Blog => self.articles.set_loading(),
            _ => self.page = LoadingState::Loading,
        }
        self.pending_load = Some(force_refresh);
    }

    /// Load the current route through the site stores.
    pub async fn load_current(&mut self, force_refresh: bool) {
        let route = self.nav.current().clone();
        match self.site.load(&route, force_refresh).await {
            Ok(PageData::Blog(list)) => self.articles.set_loaded(list),
            Ok(data) => {
                self.page = LoadingState::Loaded(views::render(&data, &self.site.router))
            }
            Err(e) => {
                warn!("Failed to load {}: {}", route.path(), e);
                match route {
                    Route::Blog => self.articles.set_error(e.to_string()),
                    _ => self.page = LoadingState::Error(e.to_string()),
                }
            }
        }

        let scroll = self
            .site
            .router
            .scroll_behavior(&route, None, Some(self.nav.saved_scroll()));
        self.scroll = scroll.top;

        let errors = self.site.errors();
        self.status = (!errors.is_empty()).then(|| errors.join("; "));
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.switch_tab(self.active_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.active_tab.prev()),
            KeyCode::Char('r') => {
                debug!("Force refresh of {}", self.nav.current().path());
                self.request_load(true);
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::PageDown => self.move_down(PAGE_SCROLL),
            KeyCode::PageUp => self.move_up(PAGE_SCROLL),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.nav.reset_to(tab.route());
        self.request_load(false);
    }

    /// Open the selected article from the blog list.
    fn open_selected(&mut self) {
        if *self.nav.current() != Route::Blog {
            return;
        }
        let Some(article) = self.articles.selected_item() else {
            return;
        };
        let slug = article.route_slug();
        self.nav.save_scroll(ScrollPosition { top: self.scroll });
        self.nav.push(Route::SingleArticle { slug });
        self.request_load(false);
    }

    fn go_back(&mut self) {
        if self.nav.pop() {
            self.request_load(false);
        }
    }

    fn in_list(&self) -> bool {
        *self.nav.current() == Route::Blog
    }

    fn move_down(&mut self, lines: u16) {
        if self.in_list() {
            for _ in 0..lines {
                self.articles.select_next();
            }
        } else {
            self.scroll = self.scroll.saturating_add(lines);
        }
    }

    fn move_up(&mut self, lines: u16) {
        if self.in_list() {
            for _ in 0..lines {
                self.articles.select_prev();
            }
        } else {
            self.scroll = self.scroll.saturating_sub(lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ContentId, SiteClient};
    use crate::cache::DEFAULT_TTL;
    use crate::router::Router;

    fn app(start: Route) -> App {
        let client = SiteClient::new("http://localhost:9/", Duration::from_secs(1), "test")
            .unwrap();
        App::new(Site::new(client, Router::default(), DEFAULT_TTL), start)
    }

    fn article(id: u64, slug: &str) -> Article {
        Article {
            id: ContentId::Number(id),
            title: slug.to_string(),
            slug: Some(slug.to_string()),
            excerpt: None,
            content: None,
            author: None,
            date: None,
            image_url: None,
            featured: false,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_start_route_builds_stack() {
        let app = app(Route::SingleArticle {
            slug: "spring".to_string(),
        });
        assert_eq!(app.active_tab, Tab::Blog);
        assert_eq!(app.nav.depth(), 2);
        assert_eq!(app.nav.root(), &Route::Blog);
        assert!(app.is_load_pending());
        assert!(app.page.is_loading());
    }

    #[test]
    fn test_tab_switch_resets_navigation() {
        let mut app = app(Route::Home);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Blog);
        assert_eq!(app.nav.current(), &Route::Blog);
        assert!(app.articles.data.is_loading());

        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Home);
        assert_eq!(app.nav.current(), &Route::Home);
    }

    #[test]
    fn test_open_article_and_back() {
        let mut app = app(Route::Blog);
        app.articles
            .set_loaded(vec![article(1, "first"), article(2, "second")]);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.nav.current(),
            &Route::SingleArticle {
                slug: "second".to_string()
            }
        );

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.nav.current(), &Route::Blog);
        // Root can't be popped
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.nav.depth(), 1);
    }

    #[test]
    fn test_help_captures_keys() {
        let mut app = app(Route::Home);
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Home);

        app.handle_key(KeyCode::Esc);
        assert!(!app.show_help);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_on_page() {
        let mut app = app(Route::Home);
        app.handle_key(KeyCode::PageDown);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.scroll, PAGE_SCROLL + 1);
        app.handle_key(KeyCode::PageUp);
        app.handle_key(KeyCode::PageUp);
        assert_eq!(app.scroll, 0);
    }
}
