//! Storefront-facing product operations.
//!
//! [`ProductService`] composes the [`CatalogClient`] with the adapter and
//! classifier and bounds every result set. It never returns errors: a
//! failure is logged and degrades to an empty list or `None`.

use std::collections::HashSet;

use crate::adapter::{to_product, Classifier};
use crate::catalog::{CatalogClient, CatalogError, ProductPage};
use crate::config::{CatalogConfig, CuratedQueries};
use crate::products::Product;

/// Page size for the phone category when browsing the whole catalog.
pub const BROWSE_PHONE_LIMIT: usize = 100;

/// Page size for each additional category when browsing the whole catalog.
pub const BROWSE_CATEGORY_LIMIT: usize = 30;

/// Number of additional categories included when browsing the whole catalog.
pub const BROWSE_EXTRA_CATEGORIES: usize = 4;

/// Number of results returned by [`ProductService::suggest`].
pub const SUGGESTION_LIMIT: usize = 5;

/// Product operations for the storefront UI.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_catalog::{CatalogConfig, ProductService};
///
/// let service = ProductService::new(&CatalogConfig::default());
///
/// let phones = service.list_by_category("smartphones", 8).await;
/// let hero = service.hero_product().await;
/// let accessories = service.pick_accessories(3).await;
/// ```
#[derive(Debug)]
pub struct ProductService {
    client: CatalogClient,
    classifier: Classifier,
    curated: CuratedQueries,
}

// Verify ProductService is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProductService>();
};

impl ProductService {
    /// Creates a service with a `reqwest`-backed client and a fresh cache.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self::with_client(CatalogClient::new(config), config)
    }

    /// Creates a service over an existing client.
    #[must_use]
    pub fn with_client(client: CatalogClient, config: &CatalogConfig) -> Self {
        Self {
            client,
            classifier: Classifier::new(config.classifier().clone()),
            curated: config.curated().clone(),
        }
    }

    /// Returns the underlying catalog client.
    #[must_use]
    pub const fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Returns the classifier.
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Electronics in `category`, at most `limit` of them.
    pub async fn list_by_category(&self, category: &str, limit: usize) -> Vec<Product> {
        let result = self
            .client
            .list_products(page_size(limit), 0, Some(category))
            .await;
        match result {
            Ok(page) => self.electronics(&page, limit),
            Err(error) => {
                tracing::error!(category, error = %error, "Error fetching products");
                Vec::new()
            }
        }
    }

    /// Electronics matching `query`, at most `limit` of them.
    ///
    /// Twice `limit` records are requested to leave headroom for the
    /// non-electronics the filter discards. Blank queries return nothing
    /// without a request.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Product> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let result = self
            .client
            .search(query, page_size(limit.saturating_mul(2)))
            .await;
        match result {
            Ok(page) => self.electronics(&page, limit),
            Err(error) => {
                tracing::error!(query, error = %error, "Error searching products");
                Vec::new()
            }
        }
    }

    /// Autocomplete suggestions for a search box.
    pub async fn suggest(&self, query: &str) -> Vec<Product> {
        self.search(query, SUGGESTION_LIMIT).await
    }

    /// A single product, or `None` when it is missing or cannot be fetched.
    pub async fn get_by_id(&self, id: &str) -> Option<Product> {
        let Ok(numeric) = id.trim().parse::<u64>() else {
            tracing::warn!(id, "Product id is not numeric");
            return None;
        };
        match self.client.get_by_id(numeric).await {
            Ok(raw) => Some(to_product(&raw)),
            Err(error) if error.is_not_found() => {
                tracing::debug!(id, "Product not found");
                None
            }
            Err(error) => {
                tracing::error!(id, error = %error, "Error fetching product");
                None
            }
        }
    }

    /// The newest phone matching the hero query.
    ///
    /// Searches for the hero query first; when that yields no phone, scans
    /// the fallback category. Among candidates the numerically largest id
    /// wins.
    pub async fn pick_hero_phone(&self) -> Option<Product> {
        let limit = self.curated.hero_search_limit;

        match self.client.search(&self.curated.hero_query, limit).await {
            Ok(page) => {
                if let Some(phone) = self.newest_phone(&page) {
                    return Some(phone);
                }
            }
            Err(error) => Self::log_failure("hero search", &self.curated.hero_query, &error),
        }

        let category = &self.curated.hero_fallback_category;
        match self.client.list_products(limit, 0, Some(category)).await {
            Ok(page) => self.newest_phone(&page),
            Err(error) => {
                Self::log_failure("hero category", category, &error);
                None
            }
        }
    }

    /// [`pick_hero_phone`](Self::pick_hero_phone), or
    /// [`Product::hero_fallback`] when no phone is available.
    pub async fn hero_product(&self) -> Product {
        self.pick_hero_phone()
            .await
            .unwrap_or_else(Product::hero_fallback)
    }

    /// Up to `limit` accessories gathered from the curated accessory queries.
    ///
    /// Queries run one after another. Results are unioned by id and the
    /// first occurrence of an id wins. A failing query is skipped.
    pub async fn pick_accessories(&self, limit: usize) -> Vec<Product> {
        let mut seen = HashSet::new();
        let mut accessories = Vec::new();

        for query in &self.curated.accessory_queries {
            let page = match self
                .client
                .search(query, self.curated.accessory_search_limit)
                .await
            {
                Ok(page) => page,
                Err(error) => {
                    tracing::warn!(
                        query = query.as_str(),
                        error = %error,
                        "Accessory search failed, skipping"
                    );
                    continue;
                }
            };

            accessories.extend(
                page.products
                    .iter()
                    .map(to_product)
                    .filter(|product| self.classifier.is_accessory(product))
                    .filter(|product| seen.insert(product.id.clone())),
            );
        }

        accessories.truncate(limit);
        accessories
    }

    /// The broad catalog: the phone category plus the first few other
    /// categories, electronics only, unioned by id.
    pub async fn browse_catalog(&self) -> Vec<Product> {
        let phone_category = &self.curated.phone_category;
        let mut products = self
            .list_by_category(phone_category, BROWSE_PHONE_LIMIT)
            .await;

        match self.client.list_categories().await {
            Ok(categories) => {
                let others = categories
                    .iter()
                    .filter(|category| *category != phone_category)
                    .take(BROWSE_EXTRA_CATEGORIES);
                for category in others {
                    products.extend(
                        self.list_by_category(category, BROWSE_CATEGORY_LIMIT)
                            .await,
                    );
                }
            }
            Err(error) => tracing::error!(error = %error, "Error fetching categories"),
        }

        let mut seen = HashSet::new();
        products.retain(|product| seen.insert(product.id.clone()));
        products
    }

    fn electronics(&self, page: &ProductPage, limit: usize) -> Vec<Product> {
        page.products
            .iter()
            .map(to_product)
            .filter(|product| self.classifier.is_electronic(product))
            .take(limit)
            .collect()
    }

    fn newest_phone(&self, page: &ProductPage) -> Option<Product> {
        page.products
            .iter()
            .map(to_product)
            .filter(|product| self.classifier.is_phone(product))
            .max_by_key(|product| product.numeric_id().unwrap_or(0))
    }

    fn log_failure(step: &str, input: &str, error: &CatalogError) {
        tracing::error!(step, input, error = %error, "Error fetching hero phone");
    }
}

fn page_size(limit: usize) -> u32 {
    u32::try_from(limit).unwrap_or(u32::MAX)
}
