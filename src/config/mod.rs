//! Configuration types for the storefront catalog SDK.
//!
//! This module provides the configuration used to construct the catalog
//! client stack.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CatalogConfig`]: The main configuration struct holding all SDK settings
//! - [`CatalogConfigBuilder`]: A builder for constructing [`CatalogConfig`] instances
//! - [`BaseUrl`]: A validated API base URL
//! - [`CacheTtls`]: Per-endpoint cache lifetimes
//! - [`CuratedQueries`]: Fixed queries behind the curated selections
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_catalog::{CatalogConfig, BaseUrl};
//! use storefront_catalog::clients::RetryPolicy;
//!
//! let config = CatalogConfig::builder()
//!     .base_url(BaseUrl::new("https://dummyjson.com").unwrap())
//!     .retry(RetryPolicy {
//!         max_retries: 2,
//!         base_delay: Duration::from_millis(500),
//!         timeout: Duration::from_secs(5),
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry().max_retries, 2);
//! ```

mod curated;
mod newtypes;
mod ttl;

pub use curated::CuratedQueries;
pub use newtypes::{BaseUrl, DEFAULT_BASE_URL};
pub use ttl::CacheTtls;

use crate::adapter::ClassifierRules;
use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Default maximum number of cached responses.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Configuration for the storefront catalog SDK.
///
/// All settings are static for the lifetime of a client. Every field has a
/// default, so `CatalogConfig::default()` targets the public demo API.
///
/// # Thread Safety
///
/// `CatalogConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    base_url: BaseUrl,
    retry: RetryPolicy,
    ttls: CacheTtls,
    cache_capacity: Option<usize>,
    user_agent_prefix: Option<String>,
    classifier: ClassifierRules,
    curated: CuratedQueries,
}

impl CatalogConfig {
    /// Creates a new builder for constructing a `CatalogConfig`.
    #[must_use]
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the cache lifetimes.
    #[must_use]
    pub const fn ttls(&self) -> &CacheTtls {
        &self.ttls
    }

    /// Returns the cache capacity, or `None` when unbounded.
    #[must_use]
    pub const fn cache_capacity(&self) -> Option<usize> {
        self.cache_capacity
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the classification tables.
    #[must_use]
    pub const fn classifier(&self) -> &ClassifierRules {
        &self.classifier
    }

    /// Returns the curated query settings.
    #[must_use]
    pub const fn curated(&self) -> &CuratedQueries {
        &self.curated
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            retry: RetryPolicy::default(),
            ttls: CacheTtls::default(),
            cache_capacity: Some(DEFAULT_CACHE_CAPACITY),
            user_agent_prefix: None,
            classifier: ClassifierRules::default(),
            curated: CuratedQueries::default(),
        }
    }
}

// Verify CatalogConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogConfig>();
};

/// Builder for constructing [`CatalogConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://dummyjson.com`
/// - `retry`: 3 retries, 1s base delay, 10s timeout
/// - `ttls`: see [`CacheTtls::default`]
/// - `cache_capacity`: [`DEFAULT_CACHE_CAPACITY`]
/// - `user_agent_prefix`: `None`
/// - `classifier`: built-in electronics tables
/// - `curated`: see [`CuratedQueries::default`]
#[derive(Debug, Default)]
pub struct CatalogConfigBuilder {
    base_url: Option<BaseUrl>,
    retry: Option<RetryPolicy>,
    ttls: Option<CacheTtls>,
    cache_capacity: Option<Option<usize>>,
    user_agent_prefix: Option<String>,
    classifier: Option<ClassifierRules>,
    curated: Option<CuratedQueries>,
}

impl CatalogConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the default retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets the cache lifetimes.
    #[must_use]
    pub const fn ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = Some(ttls);
        self
    }

    /// Sets the cache capacity; `None` leaves the cache unbounded.
    #[must_use]
    pub const fn cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Replaces the classification tables.
    #[must_use]
    pub fn classifier(mut self, rules: ClassifierRules) -> Self {
        self.classifier = Some(rules);
        self
    }

    /// Replaces the curated query settings.
    #[must_use]
    pub fn curated(mut self, curated: CuratedQueries) -> Self {
        self.curated = Some(curated);
        self
    }

    /// Builds the [`CatalogConfig`], validating the retry policy and cache capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] for a zero timeout and
    /// [`ConfigError::ZeroCacheCapacity`] for a capacity of zero.
    pub fn build(self) -> Result<CatalogConfig, ConfigError> {
        let retry = self.retry.unwrap_or_default();
        retry.validate()?;

        let cache_capacity = self.cache_capacity.unwrap_or(Some(DEFAULT_CACHE_CAPACITY));
        if cache_capacity == Some(0) {
            return Err(ConfigError::ZeroCacheCapacity);
        }

        Ok(CatalogConfig {
            base_url: self.base_url.unwrap_or_default(),
            retry,
            ttls: self.ttls.unwrap_or_default(),
            cache_capacity,
            user_agent_prefix: self.user_agent_prefix,
            classifier: self.classifier.unwrap_or_default(),
            curated: self.curated.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CatalogConfig::builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.retry(), &RetryPolicy::default());
        assert_eq!(config.ttls(), &CacheTtls::default());
        assert_eq!(config.cache_capacity(), Some(DEFAULT_CACHE_CAPACITY));
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.curated(), &CuratedQueries::default());
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = CatalogConfig::builder()
            .retry(RetryPolicy::no_retries(Duration::ZERO))
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidRetryPolicy { .. })));
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = CatalogConfig::builder().cache_capacity(Some(0)).build();
        assert!(matches!(result, Err(ConfigError::ZeroCacheCapacity)));
    }

    #[test]
    fn test_builder_allows_unbounded_cache() {
        let config = CatalogConfig::builder()
            .cache_capacity(None)
            .build()
            .unwrap();
        assert_eq!(config.cache_capacity(), None);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let base_url = BaseUrl::new("http://127.0.0.1:9000").unwrap();
        let ttls = CacheTtls {
            listing: Duration::from_secs(1),
            search: Duration::from_secs(2),
            product: Duration::from_secs(3),
            categories: Duration::from_secs(4),
        };
        let curated = CuratedQueries {
            hero_query: "Galaxy".to_string(),
            ..CuratedQueries::default()
        };

        let config = CatalogConfig::builder()
            .base_url(base_url.clone())
            .ttls(ttls)
            .cache_capacity(Some(16))
            .user_agent_prefix("GadgetShop/1.0")
            .curated(curated)
            .build()
            .unwrap();

        assert_eq!(config.base_url(), &base_url);
        assert_eq!(config.ttls(), &ttls);
        assert_eq!(config.cache_capacity(), Some(16));
        assert_eq!(config.user_agent_prefix(), Some("GadgetShop/1.0"));
        assert_eq!(config.curated().hero_query, "Galaxy");
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = CatalogConfig::default();
        let cloned = config.clone();
        assert_eq!(cloned.base_url(), config.base_url());

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("CatalogConfig"));
    }
}
