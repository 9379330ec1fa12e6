//! # Domain Errors
//!
//! Error types for invariant violations in the shipping domain.

use thiserror::Error;

/// Error raised when a domain value or entity would break one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Weight is negative or not a finite number.
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    /// A package dimension is non-positive or not a finite number.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Item quantity is zero.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Destination address is incomplete or malformed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A rate amount is not strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A package was requested for an empty cart.
    #[error("package has no items")]
    EmptyPackage,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
