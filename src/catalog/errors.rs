//! Catalog client error types.
//!
//! - [`CatalogError::Request`]: the API answered with a non-success status
//! - [`CatalogError::NotFound`]: the API answered 404
//! - [`CatalogError::Decode`]: the body did not match the expected shape
//! - [`CatalogError::Http`]: the retried fetch itself failed

use crate::clients::{HttpError, HttpResponseError};
use thiserror::Error;

/// Error type for catalog operations.
///
/// # Example
///
/// ```rust
/// use storefront_catalog::catalog::CatalogError;
/// use storefront_catalog::clients::HttpResponseError;
///
/// let error = CatalogError::Request {
///     operation: "fetch products",
///     source: HttpResponseError { code: 400, message: "Bad Request".to_string() },
/// };
/// assert_eq!(error.to_string(), "Failed to fetch products: HTTP 400: Bad Request");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The API returned a non-success status.
    #[error("Failed to {operation}: {source}")]
    Request {
        /// What the client was doing.
        operation: &'static str,
        /// The status and message of the response.
        source: HttpResponseError,
    },

    /// The requested resource does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response to {operation}: {source}")]
    Decode {
        /// What the client was doing.
        operation: &'static str,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// The retried fetch failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl CatalogError {
    /// Returns `true` for [`CatalogError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
