//! Error types for the storefront catalog SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use storefront_catalog::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an http(s) URL with a host (e.g., 'https://dummyjson.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Retry policy is invalid.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// The reason the policy is invalid.
        reason: String,
    },

    /// Cache capacity of zero would make every insert an eviction.
    #[error("Cache capacity must be at least 1 entry. Use no capacity for an unbounded cache.")]
    ZeroCacheCapacity,

    /// A classifier pattern failed to compile.
    #[error("Invalid classifier pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern that was provided.
        pattern: String,
        /// The compiler's explanation.
        reason: String,
    },
}
