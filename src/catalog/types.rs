//! Wire types returned by the catalog API.
//!
//! These mirror the third-party JSON shapes and never leave the SDK's
//! lower layers; the storefront works with
//! [`Product`](crate::products::Product) instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record as returned by the catalog API.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::catalog::RawProduct;
///
/// let raw: RawProduct = serde_json::from_value(serde_json::json!({
///     "id": 121,
///     "title": "iPhone 5s",
///     "description": "A classic smartphone",
///     "price": 199.99,
///     "category": "smartphones",
///     "thumbnail": "https://cdn.example.com/121/thumbnail.webp",
///     "images": []
/// }))
/// .unwrap();
///
/// assert_eq!(raw.id, 121);
/// assert_eq!(raw.price.to_string(), "199.99");
/// assert!(raw.brand.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Numeric product id.
    pub id: u64,
    /// Product title.
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Discount in percent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    /// Average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Primary thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of products plus pagination metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Records on this page.
    #[serde(default)]
    pub products: Vec<RawProduct>,
    /// Total matching records across all pages.
    #[serde(default)]
    pub total: u64,
    /// Offset of this page.
    #[serde(default)]
    pub skip: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
}

impl ProductPage {
    /// Returns `true` when further records exist past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.skip + (self.products.len() as u64) < self.total
    }
}
