pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod router;
pub mod site;
pub mod state;
pub mod stores;
pub mod ui;
pub mod views;

pub use config::Config;
pub use error::{Result, SiteError};
