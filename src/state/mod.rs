// State management module.
// Handles navigation and per-view UI state.

pub mod navigation;
pub mod view;

pub use navigation::{BreadcrumbNode, NavigationStack};
pub use view::{LoadingState, SelectableList};
