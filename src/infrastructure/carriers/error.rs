//! # Carrier Errors
//!
//! Error types for outbound calls to the shipping provider.
//!
//! Every variant is absorbed by rate aggregation: a failing carrier contributes
//! no rates instead of failing the request.
//!
//! # Examples
//!
//! ```
//! use storefront_shipping::infrastructure::carriers::error::CarrierError;
//!
//! let error = CarrierError::authentication("Invalid API key");
//! assert!(error.is_client_error());
//!
//! let error = CarrierError::connection("connection refused");
//! assert!(!error.is_client_error());
//! ```

use thiserror::Error;

/// Error type for carrier rate calls.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network failure or provider-side 5xx.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials rejected.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// Provider rejected the request parameters.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Unexpected status or unparseable body.
    #[error("carrier protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Local failure (client construction, task join).
    #[error("carrier internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if the provider rejected what we sent (bad request or credentials).
    ///
    /// These point at configuration or input problems rather than provider outages.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Authentication { .. }
        )
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;
