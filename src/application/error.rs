//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur during use case execution.
//! The REST layer maps each variant to an HTTP status and a JSON body.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - Invariant violations          -> 400
//! ├── Validation(String)           - Unreadable request body       -> 400
//! ├── InvalidRequest(Vec<FieldError>) - Field-level validation     -> 400
//! ├── NoRatesAvailable             - Nothing to offer              -> 400
//! ├── Unauthorized                 - Not signed in                 -> 401
//! ├── Forbidden                    - Signed in, not an admin       -> 403
//! ├── NotFound(String)             - Unknown route or resource     -> 404
//! ├── NotConfigured(String)        - Integration missing           -> 500
//! └── Internal(String)             - Anything else                 -> 500
//! ```
//!
//! # Examples
//!
//! ```
//! use storefront_shipping::application::error::{ApplicationError, FieldError};
//!
//! let err = ApplicationError::invalid_request(vec![
//!     FieldError::new("items", "at least one item is required"),
//! ]);
//! assert!(err.is_validation());
//! ```

use crate::application::services::rate_aggregation::AggregationError;
use crate::domain::errors::DomainError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A validation failure tied to one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// JSON path of the offending field (e.g. `items[0].quantity`).
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request body could not be read.
    #[error("validation error: {0}")]
    Validation(String),

    /// One or more request fields are invalid.
    #[error("invalid request: {}", join_fields(.0))]
    InvalidRequest(Vec<FieldError>),

    /// No carrier returned a usable rate.
    #[error("no shipping rates available")]
    NoRatesAvailable,

    /// Caller is not signed in.
    #[error("unauthorized")]
    Unauthorized,

    /// Caller is signed in but lacks the admin role.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required integration has no credentials.
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a field-level validation error.
    #[must_use]
    pub fn invalid_request(fields: Vec<FieldError>) -> Self {
        Self::InvalidRequest(fields)
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Creates a not configured error.
    #[must_use]
    pub fn not_configured(integration: impl Into<String>) -> Self {
        Self::NotConfigured(integration.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error stems from the caller's input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidRequest(_) | Self::Domain(_)
        )
    }
}

impl From<AggregationError> for ApplicationError {
    fn from(error: AggregationError) -> Self {
        match error {
            AggregationError::NoCarriersConfigured => Self::not_configured("Shipping service"),
            AggregationError::NoRatesAvailable { .. } => Self::NoRatesAvailable,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_lists_fields() {
        let err = ApplicationError::invalid_request(vec![
            FieldError::new("items", "at least one item is required"),
            FieldError::new("shippingAddress.state", "must be a two-letter code"),
        ]);
        let message = err.to_string();
        assert!(message.contains("items: at least one item is required"));
        assert!(message.contains("shippingAddress.state"));
        assert!(err.is_validation());
    }

    #[test]
    fn from_domain_error() {
        let err: ApplicationError = DomainError::EmptyPackage.into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("package has no items"));
    }

    #[test]
    fn from_aggregation_error() {
        let err: ApplicationError = AggregationError::NoCarriersConfigured.into();
        assert!(matches!(err, ApplicationError::NotConfigured(_)));
        assert_eq!(err.to_string(), "Shipping service is not configured");

        let err: ApplicationError = AggregationError::NoRatesAvailable {
            collected: 3,
            failed_carriers: vec![],
        }
        .into();
        assert!(matches!(err, ApplicationError::NoRatesAvailable));
    }

    #[test]
    fn non_input_errors_are_not_validation() {
        assert!(!ApplicationError::Unauthorized.is_validation());
        assert!(!ApplicationError::internal("boom").is_validation());
        assert!(!ApplicationError::not_found("/nope").is_validation());
    }
}
