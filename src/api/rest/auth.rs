//! # Admin Authorization
//!
//! Bearer-token gate for the admin endpoints.
//!
//! Tokens are HS256 JWTs signed with `AUTH_JWT_SECRET`. A caller with a
//! valid token is signed in; it is an admin only if its `email` claim is on
//! the `ADMIN_EMAILS` allow-list (compared case-insensitively).

use crate::api::rest::handlers::AppState;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::AuthConfig;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Claims read from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// User email.
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

/// An authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    /// User id from the token subject.
    pub user_id: String,
    /// Normalized email.
    pub email: String,
}

/// Verifies tokens and checks the admin allow-list.
#[derive(Clone)]
pub struct AdminGate {
    secret: Option<String>,
    admin_emails: HashSet<String>,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("admin_emails", &self.admin_emails)
            .finish()
    }
}

impl AdminGate {
    /// Creates a gate. Emails are normalized to lowercase.
    #[must_use]
    pub fn new(secret: Option<String>, admin_emails: &[String]) -> Self {
        Self {
            secret,
            admin_emails: admin_emails
                .iter()
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    /// Creates a gate from auth settings.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.clone(), &config.admin_emails)
    }

    /// Verifies `token` and checks that its email is an admin.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Unauthorized` if no secret is configured or
    /// the token is invalid or expired, and `ApplicationError::Forbidden` if
    /// the token carries no admin email.
    pub fn authorize(&self, token: &str) -> ApplicationResult<AdminUser> {
        let Some(secret) = self.secret.as_deref() else {
            tracing::warn!("admin request rejected: AUTH_JWT_SECRET is not set");
            return Err(ApplicationError::Unauthorized);
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                ApplicationError::Unauthorized
            })?;

        let email = data
            .claims
            .email
            .map(|email| email.trim().to_lowercase())
            .filter(|email| self.admin_emails.contains(email));

        match email {
            Some(email) => Ok(AdminUser {
                user_id: data.claims.sub,
                email,
            }),
            None => {
                tracing::warn!(user_id = %data.claims.sub, "admin request from non-admin user");
                Err(ApplicationError::Forbidden)
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApplicationError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApplicationError::Unauthorized)?;
        state.admin_gate.authorize(bearer.token())
    }
}
