// Site data API module.
// Client, endpoints and types for the static JSON files the site serves.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::SiteClient;
pub use endpoints::{Fallback, Resource};
pub use types::*;
