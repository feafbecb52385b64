//! Core business logic - framework-agnostic marketplace operations.
//!
//! Each submodule owns one stage of the commerce lifecycle. Functions are
//! async, take a database connection, and return crate [`Result`]s; the web
//! layer above decides how verdicts and errors are presented.
//!
//! [`Result`]: crate::errors::Result

/// The seller authorization checkpoint
pub mod access;
/// Per-user cart aggregation
pub mod cart;
/// Product catalog lifecycle and validation
pub mod catalog;
/// Atomic conversion of a cart into a multi-seller order
pub mod checkout;
/// Seller dashboard statistics
pub mod dashboard;
/// Buyer/seller messaging and engagement facts
pub mod messaging;
/// Lazy per-identity profile provisioning
pub mod profile;
/// Subscription purchases and derived validity windows
pub mod subscription;
