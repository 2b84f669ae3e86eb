// Navigation state management.
// Handles the route stack and breadcrumb trail for drill-down views.

use crate::router::{Route, ScrollPosition};

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
    /// The route this node represents.
    pub route: Route,
}

/// Navigation stack of routes (bottom = root, top = current).
#[derive(Debug, Clone)]
pub struct NavigationStack {
    stack: Vec<(Route, ScrollPosition)>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given route.
    pub fn new(root: Route) -> Self {
        Self {
            stack: vec![(root, ScrollPosition::default())],
        }
    }

    /// Get the current route.
    pub fn current(&self) -> &Route {
        // The root is never popped
        &self.stack[self.stack.len() - 1].0
    }

    pub fn root(&self) -> &Route {
        &self.stack[0].0
    }

    /// Push a route onto the stack (drill down).
    pub fn push(&mut self, route: Route) {
        self.stack.push((route, ScrollPosition::default()));
    }

    /// Pop the current route (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back (not at root).
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Scroll position remembered for the current route.
    pub fn saved_scroll(&self) -> ScrollPosition {
        self.stack[self.stack.len() - 1].1
    }

    /// Remember the scroll position of the current route.
    pub fn save_scroll(&mut self, position: ScrollPosition) {
        let last = self.stack.len() - 1;
        self.stack[last].1 = position;
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.stack
            .iter()
            .map(|(route, _)| BreadcrumbNode {
                label: route.title(),
                route: route.clone(),
            })
            .collect()
    }

    /// Replace the whole stack with a new root.
    pub fn reset_to(&mut self, root: Route) {
        self.stack = vec![(root, ScrollPosition::default())];
    }

    /// Get the depth of the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
