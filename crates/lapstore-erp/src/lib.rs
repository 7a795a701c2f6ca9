pub mod catalog;
pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod retry;
pub mod service;
pub mod types;

pub use client::ErpClient;
pub use error::ErpError;
pub use normalize::normalize_item;
pub use retry::{fetch_with_retry, RetryPolicy};
pub use service::{normalize_items, CatalogConfig, CatalogService, ProductFilters, Sourced};
pub use types::RawItem;
