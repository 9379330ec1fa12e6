//! HTTP mapping of [`ApplicationError`].

use crate::api::rest::dto::ErrorResponse;
use crate::application::error::ApplicationError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl ApplicationError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(_)
            | Self::Validation(_)
            | Self::InvalidRequest(_)
            | Self::NoRatesAvailable => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotConfigured(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Domain(e) => ErrorResponse::new(e.to_string()),
            Self::Validation(message) => ErrorResponse::new(message),
            Self::InvalidRequest(fields) => ErrorResponse::with_details("Invalid request", fields),
            Self::NoRatesAvailable => {
                ErrorResponse::new("No shipping rates available for this address")
            }
            Self::Unauthorized => ErrorResponse::new("Unauthorized"),
            Self::Forbidden => ErrorResponse::new("Forbidden"),
            Self::NotFound(_) => ErrorResponse::new("Not found"),
            Self::NotConfigured(integration) => {
                ErrorResponse::new(format!("{integration} is not configured"))
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                ErrorResponse::new("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::error::FieldError;
    use crate::domain::errors::DomainError;

    async fn body_of(err: ApplicationError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApplicationError::from(DomainError::EmptyPackage).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::NoRatesAvailable.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApplicationError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApplicationError::not_found("/x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApplicationError::not_configured("Shipping service").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_request_carries_details() {
        let (status, body) = body_of(ApplicationError::invalid_request(vec![FieldError::new(
            "items[0].quantity",
            "quantity must be at least 1",
        )]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({
                "error": "Invalid request",
                "details": [{ "field": "items[0].quantity", "message": "quantity must be at least 1" }]
            })
        );
    }

    #[tokio::test]
    async fn internal_error_hides_message() {
        let (status, body) = body_of(ApplicationError::internal("db password wrong")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn not_configured_names_integration() {
        let (_, body) = body_of(ApplicationError::not_configured("Shipping service")).await;
        assert_eq!(body["error"], "Shipping service is not configured");
    }
}
