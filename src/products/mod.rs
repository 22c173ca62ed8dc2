//! Storefront products and the operations the UI calls.
//!
//! - [`Product`]: the storefront's product representation
//! - [`ProductService`]: listing, search, lookup and curated selections
//! - [`ListingFilter`]: brand, price and ordering filters over a fetched list

mod listing;
mod product;
mod service;

pub use listing::{brands, price_ceiling, ListingFilter, SortOrder};
pub use product::Product;
pub use service::{
    ProductService, BROWSE_CATEGORY_LIMIT, BROWSE_EXTRA_CATEGORIES, BROWSE_PHONE_LIMIT,
    SUGGESTION_LIMIT,
};
