// Cache module for fetched site data.
// Generic in-memory TTL store reused by every data domain.

pub mod store;

pub use store::{ApiStore, CachedData, DEFAULT_TTL, DataSource, is_fresh};
