//! # HTTP Client
//!
//! Shared HTTP client for carrier adapters.
//!
//! Wraps `reqwest` with JSON bodies, HTTP Basic authentication and mapping of
//! transport failures and status codes onto [`CarrierError`]. The client keeps
//! reqwest's default timeouts and never retries.

use crate::config::ApiCredentials;
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client wrapper for carrier adapters.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be created.
    pub fn new() -> CarrierResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CarrierError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Makes a Basic-authenticated POST with a JSON body and deserializes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request.
    /// * `body` - The request body to serialize as JSON.
    /// * `credentials` - Key/secret pair sent as the Basic user/password.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Connection` or `CarrierError::Timeout` if the request fails.
    /// Returns a status-specific error for non-2xx responses.
    /// Returns `CarrierError::ProtocolError` if the response cannot be parsed.
    pub async fn post_with_basic_auth<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        credentials: &ApiCredentials,
    ) -> CarrierResult<T> {
        let response = self
            .client
            .post(url)
            .basic_auth(credentials.key(), Some(credentials.secret()))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> CarrierResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                CarrierError::protocol_error(format!("Failed to parse response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a CarrierError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout("Request timed out")
        } else if error.is_connect() {
            CarrierError::connection(format!("Connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a CarrierError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> CarrierError {
        match status {
            StatusCode::BAD_REQUEST => {
                CarrierError::invalid_request(format!("Bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CarrierError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("Rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                CarrierError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => CarrierError::protocol_error(format!("HTTP error ({}): {}", status, body)),
        }
    }
}
