//! Category, search and lookup client for the catalog API.
//!
//! The API exposes:
//!
//! - `GET /products?limit&skip`
//! - `GET /products/category/{name}?limit&skip`
//! - `GET /products/search?q&limit`
//! - `GET /products/{id}`
//! - `GET /products/category-list`
//!
//! [`CatalogClient`] wraps each endpoint with the response cache and the
//! retrying HTTP client and hands back the raw wire types in [`types`].

mod client;
mod errors;
pub mod types;

pub use client::CatalogClient;
pub use errors::CatalogError;
pub use types::{ProductPage, RawProduct};
