//! Cached client for the catalog API endpoints.
//!
//! Every operation follows the same path: build a deterministic cache key,
//! return the cached body on a hit, otherwise fetch through the retrying
//! [`HttpClient`], fail on a non-success status, decode, cache and return.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cache::ResponseCache;
use crate::catalog::errors::CatalogError;
use crate::catalog::types::{ProductPage, RawProduct};
use crate::clients::{HttpClient, HttpError, HttpRequest, HttpResponseError};
use crate::config::{CacheTtls, CatalogConfig};

/// Client for listing, searching and looking up catalog products.
///
/// The cache is shared through an `Arc`, so several clients (or a test) can
/// observe the same entries.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_catalog::CatalogConfig;
/// use storefront_catalog::catalog::CatalogClient;
///
/// let client = CatalogClient::new(&CatalogConfig::default());
///
/// let page = client.list_products(8, 0, Some("smartphones")).await?;
/// let phone = client.get_by_id(121).await?;
/// let categories = client.list_categories().await?;
/// ```
#[derive(Debug)]
pub struct CatalogClient {
    http: HttpClient,
    cache: Arc<ResponseCache>,
    ttls: CacheTtls,
}

// Verify CatalogClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogClient>();
};

impl CatalogClient {
    /// Creates a client with a `reqwest` transport and a fresh cache.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Arc::new(ResponseCache::new(config.cache_capacity()));
        Self::with_parts(HttpClient::new(config), cache, *config.ttls())
    }

    /// Assembles a client from explicit parts.
    #[must_use]
    pub const fn with_parts(http: HttpClient, cache: Arc<ResponseCache>, ttls: CacheTtls) -> Self {
        Self { http, cache, ttls }
    }

    /// Returns the shared response cache.
    #[must_use]
    pub const fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Lists one page of products, optionally restricted to a category.
    ///
    /// An empty category is treated as no category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails, the API answers with a
    /// non-success status, or the body is not a product page.
    pub async fn list_products(
        &self,
        limit: u32,
        skip: u32,
        category: Option<&str>,
    ) -> Result<ProductPage, CatalogError> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let path = category.map_or_else(
            || "products".to_string(),
            |c| format!("products/category/{}", urlencoding::encode(c)),
        );
        let key = format!("products:{}:{limit}:{skip}", category.unwrap_or("all"));
        let request = HttpRequest::builder(path)
            .query_param("limit", limit)
            .query_param("skip", skip)
            .build()
            .map_err(HttpError::from)?;

        self.cached_get(&key, request, self.ttls.listing, "fetch products")
            .await
    }

    /// Runs a free-text search.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails, the API answers with a
    /// non-success status, or the body is not a product page.
    pub async fn search(&self, query: &str, limit: u32) -> Result<ProductPage, CatalogError> {
        let query = query.trim();
        let key = format!("search:{}:{limit}", query.to_lowercase());
        let request = HttpRequest::builder("products/search")
            .query_param("q", query)
            .query_param("limit", limit)
            .build()
            .map_err(HttpError::from)?;

        self.cached_get(&key, request, self.ttls.search, "search products")
            .await
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the id does not exist, and
    /// other [`CatalogError`] variants for fetch or decode failures.
    pub async fn get_by_id(&self, id: u64) -> Result<RawProduct, CatalogError> {
        let key = format!("product:{id}");
        let request = HttpRequest::builder(format!("products/{id}"))
            .build()
            .map_err(HttpError::from)?;

        self.cached_get(&key, request, self.ttls.product, "fetch product")
            .await
    }

    /// Lists every category slug.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails, the API answers with a
    /// non-success status, or the body is not a list of strings.
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let request = HttpRequest::builder("products/category-list")
            .build()
            .map_err(HttpError::from)?;

        self.cached_get(
            "categories:all",
            request,
            self.ttls.categories,
            "fetch categories",
        )
        .await
    }

    async fn cached_get<T: DeserializeOwned>(
        &self,
        key: &str,
        request: HttpRequest,
        ttl: Duration,
        operation: &'static str,
    ) -> Result<T, CatalogError> {
        if let Some(body) = self.cache.get(key) {
            if let Ok(value) = serde_json::from_value(body) {
                return Ok(value);
            }
            tracing::warn!(key, "cached body no longer decodes, refetching");
        }

        let path = request.path.clone();
        let response = self.http.fetch(request).await?;

        if response.code == 404 {
            return Err(CatalogError::NotFound {
                resource: format!("{path}: {}", response.error_message()),
            });
        }
        if !response.is_ok() {
            return Err(CatalogError::Request {
                operation,
                source: HttpResponseError {
                    code: response.code,
                    message: response.error_message(),
                },
            });
        }

        let value = serde_json::from_value(response.body.clone())
            .map_err(|source| CatalogError::Decode { operation, source })?;
        self.cache.set(key, response.body, ttl);
        Ok(value)
    }
}
