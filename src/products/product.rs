//! The storefront's product representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as the storefront sees it.
///
/// Products are created by the [`adapter`](crate::adapter) from API records
/// and are never mutated afterwards. The struct is non-exhaustive, so code
/// outside this crate reads the fields but cannot assemble one by hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Product {
    /// Identifier, the API's numeric id rendered as a string.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Display image URL, empty when the record has none.
    pub image: String,
    /// Category slug.
    pub category: String,
    /// Average rating.
    pub rating: Option<f64>,
    /// Units in stock.
    pub stock: Option<u32>,
    /// Brand name.
    pub brand: Option<String>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        id: String,
        title: String,
        description: String,
        price: Decimal,
        image: String,
        category: String,
        rating: Option<f64>,
        stock: Option<u32>,
        brand: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            image,
            category,
            rating,
            stock,
            brand,
        }
    }

    /// The id as a number, or `None` for ids that are not numeric.
    ///
    /// Larger ids were added to the catalog later.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    /// Product shown in the hero banner when the catalog offers no phone.
    #[must_use]
    pub fn hero_fallback() -> Self {
        Self::new(
            "iphone-14-hero".to_string(),
            "iPhone 14".to_string(),
            "A15 Bionic, dual-camera system, and all-day battery in the classic design you know."
                .to_string(),
            Decimal::new(799, 0),
            "https://images.unsplash.com/photo-1661961112957-4c7c11b9c5f8?auto=format&fit=crop&w=800&q=80"
                .to_string(),
            "smartphones".to_string(),
            Some(4.7),
            Some(10),
            Some("Apple".to_string()),
        )
    }

    /// Lowercased `"{title} {description}"`, the text the classifiers search.
    pub(crate) fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}
