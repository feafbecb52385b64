//! Unified error types for the marketplace core.
//!
//! Validation problems are collected, never short-circuited, so a caller can
//! present every field error at once. Authorization failures surface as
//! [`Error::Forbidden`] and are expected to redirect, not crash.

use thiserror::Error;

/// All failure modes of the marketplace core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// One or more field-level problems, collected for display
    #[error("Validation failed: {}", .errors.join("; "))]
    Validation {
        /// Every field error found, in field order
        errors: Vec<String>,
    },

    /// The caller is not allowed to perform this action
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// Why the action was denied
        reason: String,
    },

    /// A referenced product does not exist
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Primary key of the missing product
        id: i64,
    },

    /// A referenced message does not exist
    #[error("Message not found: {id}")]
    MessageNotFound {
        /// Primary key of the missing message
        id: i64,
    },

    /// Checkout was attempted against a cart with no items
    #[error("Cart is empty")]
    EmptyCart,

    /// Order number generation kept colliding with existing orders
    #[error("Could not allocate a unique order number after {attempts} attempts")]
    OrderNumberConflict {
        /// How many generation attempts were made
        attempts: u32,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
