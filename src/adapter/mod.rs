//! Maps catalog API records to storefront products and classifies them.
//!
//! [`to_product`] is a pure field mapping. [`Classifier`] holds the keyword
//! heuristics used to keep the storefront to electronics.

mod classifier;

pub use classifier::{Classifier, ClassifierRules, HandsetBrand, DEFAULT_HANDSET_PATTERN};

use crate::catalog::RawProduct;
use crate::products::Product;

/// Converts an API record into a [`Product`].
///
/// The display image is the thumbnail, else the first gallery image, else
/// empty. Every other field is copied as-is.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::adapter::to_product;
/// use storefront_catalog::catalog::RawProduct;
///
/// let raw: RawProduct = serde_json::from_value(serde_json::json!({
///     "id": 42,
///     "title": "Wireless Earbuds",
///     "price": 49.5,
///     "category": "mobile-accessories",
///     "thumbnail": "",
///     "images": ["https://cdn.example.com/42/1.webp"]
/// })).unwrap();
///
/// let product = to_product(&raw);
/// assert_eq!(product.id, "42");
/// assert_eq!(product.image, "https://cdn.example.com/42/1.webp");
/// ```
#[must_use]
pub fn to_product(raw: &RawProduct) -> Product {
    let image = raw
        .thumbnail
        .as_deref()
        .filter(|thumbnail| !thumbnail.is_empty())
        .or_else(|| raw.images.iter().map(String::as_str).find(|i| !i.is_empty()))
        .unwrap_or_default()
        .to_string();

    Product::new(
        raw.id.to_string(),
        raw.title.clone(),
        raw.description.clone(),
        raw.price,
        image,
        raw.category.clone(),
        raw.rating,
        raw.stock,
        raw.brand.clone(),
    )
}
