//! Cache lifetimes per kind of catalog data.

use std::time::Duration;

/// Time-to-live settings for cached catalog responses.
///
/// Each kind of data carries its own staleness tolerance: listings and
/// search results change often, single products rarely, and the category
/// list almost never.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use storefront_catalog::CacheTtls;
///
/// let ttls = CacheTtls::default();
/// assert_eq!(ttls.listing, Duration::from_secs(120));
/// assert_eq!(ttls.categories, Duration::from_secs(1800));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheTtls {
    /// Category and "all products" listings.
    pub listing: Duration,
    /// Free-text search results.
    pub search: Duration,
    /// Single product lookups.
    pub product: Duration,
    /// The category name list.
    pub categories: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            listing: Duration::from_secs(2 * 60),
            search: Duration::from_secs(60),
            product: Duration::from_secs(10 * 60),
            categories: Duration::from_secs(30 * 60),
        }
    }
}
