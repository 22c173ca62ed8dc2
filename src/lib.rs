//! # Storefront Catalog SDK
//!
//! An async data layer for an electronics storefront backed by a public
//! product catalog API. It fetches with bounded retries, caches decoded
//! responses with per-endpoint lifetimes, and narrows the catalog to
//! electronics with keyword classification.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CatalogConfig`] and [`CatalogConfigBuilder`]
//! - A retrying HTTP layer with per-attempt timeouts, exponential backoff and
//!   cancellation via [`clients::HttpClient`]
//! - A TTL response cache with an injectable clock via [`cache::ResponseCache`]
//! - Cached catalog endpoints via [`catalog::CatalogClient`]
//! - Electronics, phone and accessory classification via [`adapter::Classifier`]
//! - Storefront operations that never fail via [`ProductService`]
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_catalog::{BaseUrl, CatalogConfig};
//!
//! let config = CatalogConfig::builder()
//!     .base_url(BaseUrl::new("https://dummyjson.com").unwrap())
//!     .user_agent_prefix("MyStore/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://dummyjson.com");
//! ```
//!
//! ## Storefront Operations
//!
//! ```rust,ignore
//! use storefront_catalog::{CatalogConfig, ProductService};
//!
//! let service = ProductService::new(&CatalogConfig::default());
//!
//! // Electronics in a category, bounded by the limit
//! let phones = service.list_by_category("smartphones", 8).await;
//!
//! // Free-text search, blank queries return nothing
//! let results = service.search("iphone", 10).await;
//!
//! // Curated selections
//! let hero = service.hero_product().await;
//! let accessories = service.pick_accessories(3).await;
//!
//! // Single lookup, `None` when missing
//! let product = service.get_by_id("121").await;
//! ```
//!
//! ## Lower-Level Access
//!
//! ```rust,ignore
//! use storefront_catalog::clients::{CancellationToken, HttpRequest};
//!
//! let token = CancellationToken::new();
//! let request = HttpRequest::builder("products/search")
//!     .query_param("q", "charger")
//!     .cancel_token(token.clone())
//!     .build()?;
//!
//! let response = service.client().http().fetch(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the cache and clients are instances passed explicitly
//! - **Fail-fast validation**: configuration is checked when it is built
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **Graceful degradation**: storefront operations log failures and return
//!   empty results

pub mod adapter;
pub mod cache;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod products;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, CacheTtls, CatalogConfig, CatalogConfigBuilder, CuratedQueries};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    CancellationToken, HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy,
};

// Re-export catalog and storefront types
pub use adapter::{Classifier, ClassifierRules};
pub use cache::ResponseCache;
pub use catalog::{CatalogClient, CatalogError};
pub use products::{ListingFilter, Product, ProductService, SortOrder};
