//! # Configuration
//!
//! Typed settings read from environment variables.
//!
//! The binary loads an optional `.env` file with `dotenvy` first; values are
//! then collected through the `config` crate's environment source. Every
//! integration is optional: a missing key/secret pair leaves that integration
//! unconfigured instead of failing startup.
//!
//! # Examples
//!
//! ```
//! use storefront_shipping::config::AppConfig;
//!
//! let config = AppConfig::from_vars([
//!     ("SHIPSTATION_API_KEY", "key"),
//!     ("SHIPSTATION_API_SECRET", "secret"),
//!     ("ADMIN_EMAILS", "Owner@Example.com, ops@example.com"),
//! ])
//! .unwrap();
//!
//! assert!(config.shipping.credentials.is_some());
//! assert_eq!(config.shipping.origin.postal_code(), "93065");
//! assert_eq!(config.auth.admin_emails, vec!["owner@example.com", "ops@example.com"]);
//! ```

use crate::domain::entities::Location;
use config::{Config, Environment};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
/// Default shipping provider base URL.
pub const DEFAULT_SHIPSTATION_BASE_URL: &str = "https://ssapi.shipstation.com";
/// Carriers quoted when none are configured: USPS (via Stamps.com) and UPS.
pub const DEFAULT_CARRIERS: [&str; 2] = ["stamps_com", "ups_walleted"];
/// Default origin postal code.
pub const DEFAULT_SHIP_FROM_ZIP: &str = "93065";
/// Default origin city.
pub const DEFAULT_SHIP_FROM_CITY: &str = "Simi Valley";
/// Default origin state.
pub const DEFAULT_SHIP_FROM_STATE: &str = "CA";

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A variable is present but unusable.
    #[error("invalid {key}: {message}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// A key/secret pair for an HTTP Basic or client-credentials API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    key: String,
    secret: String,
}

impl ApiCredentials {
    /// Creates credentials, or `None` unless both halves are non-blank.
    #[must_use]
    pub fn new(key: Option<String>, secret: Option<String>) -> Option<Self> {
        Some(Self {
            key: non_blank(key)?,
            secret: non_blank(secret)?,
        })
    }

    /// Returns the key (Basic user name).
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the secret (Basic password).
    #[inline]
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'compact' or 'json', got '{other}'")),
        }
    }
}

/// Shipping provider settings.
#[derive(Debug, Clone)]
pub struct ShippingConfig {
    /// Provider API key/secret; `None` when not configured.
    pub credentials: Option<ApiCredentials>,
    /// Provider base URL without trailing slash.
    pub base_url: String,
    /// Carrier codes quoted for every request.
    pub carriers: Vec<String>,
    /// Where parcels ship from.
    pub origin: Location,
}

/// Payment processor settings.
#[derive(Debug, Clone, Default)]
pub struct PaymentsConfig {
    /// Client id/secret pair.
    pub credentials: Option<ApiCredentials>,
    /// Whether the sandbox environment is used.
    pub sandbox: bool,
}

/// Managed database settings.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// Project URL.
    pub url: Option<String>,
    /// Service-role key.
    pub service_role_key: Option<String>,
}

impl DatabaseConfig {
    /// Returns true if both the URL and key are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.service_role_key.is_some()
    }
}

/// Mailing-list provider settings.
#[derive(Debug, Clone, Default)]
pub struct MailingListConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Data-center prefix (e.g. `us21`).
    pub server_prefix: Option<String>,
    /// Audience id.
    pub list_id: Option<String>,
}

impl MailingListConfig {
    /// Returns true if key, server and list are all set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.server_prefix.is_some() && self.list_id.is_some()
    }
}

/// Admin gate settings.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret used to verify auth-provider tokens.
    pub jwt_secret: Option<String>,
    /// Lower-cased admin email allow-list.
    pub admin_emails: Vec<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("admin_emails", &self.admin_emails)
            .finish()
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address.
    pub server_addr: SocketAddr,
    /// Shipping provider.
    pub shipping: ShippingConfig,
    /// Payment processor.
    pub payments: PaymentsConfig,
    /// Managed database.
    pub database: DatabaseConfig,
    /// Mailing list.
    pub mailing_list: MailingListConfig,
    /// Admin gate.
    pub auth: AuthConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

/// Variables as read from the environment, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    server_addr: Option<String>,
    shipstation_api_key: Option<String>,
    shipstation_api_secret: Option<String>,
    shipstation_base_url: Option<String>,
    shipstation_carriers: Option<String>,
    ship_from_zip: Option<String>,
    ship_from_city: Option<String>,
    ship_from_state: Option<String>,
    paypal_client_id: Option<String>,
    paypal_client_secret: Option<String>,
    paypal_sandbox: Option<String>,
    supabase_url: Option<String>,
    supabase_service_role_key: Option<String>,
    mailchimp_api_key: Option<String>,
    mailchimp_server_prefix: Option<String>,
    mailchimp_list_id: Option<String>,
    admin_emails: Option<String>,
    auth_jwt_secret: Option<String>,
    log_format: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the environment cannot be read or a variable
    /// holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    /// Loads configuration from explicit `NAME=value` pairs instead of the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(Environment::default().source(Some(map)))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let server_addr = non_blank(raw.server_addr)
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("SERVER_ADDR", e.to_string()))?;

        let origin = Location::new(
            non_blank(raw.ship_from_zip).unwrap_or_else(|| DEFAULT_SHIP_FROM_ZIP.to_string()),
            non_blank(raw.ship_from_city).unwrap_or_else(|| DEFAULT_SHIP_FROM_CITY.to_string()),
            non_blank(raw.ship_from_state).unwrap_or_else(|| DEFAULT_SHIP_FROM_STATE.to_string()),
            None,
        )
        .map_err(|e| ConfigError::invalid("SHIP_FROM_*", e.to_string()))?;

        let mut carriers = split_list(raw.shipstation_carriers.as_deref());
        if carriers.is_empty() {
            carriers = DEFAULT_CARRIERS.iter().map(|c| (*c).to_string()).collect();
        }

        let base_url = non_blank(raw.shipstation_base_url)
            .unwrap_or_else(|| DEFAULT_SHIPSTATION_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let sandbox = match non_blank(raw.paypal_sandbox) {
            None => true,
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::invalid("PAYPAL_SANDBOX", format!("not a boolean: '{value}'")))?,
        };

        let log_format = raw
            .log_format
            .as_deref()
            .unwrap_or_default()
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::invalid("LOG_FORMAT", e))?;

        let admin_emails = split_list(raw.admin_emails.as_deref())
            .into_iter()
            .map(|email| email.to_lowercase())
            .collect();

        Ok(Self {
            server_addr,
            shipping: ShippingConfig {
                credentials: ApiCredentials::new(
                    raw.shipstation_api_key,
                    raw.shipstation_api_secret,
                ),
                base_url,
                carriers,
                origin,
            },
            payments: PaymentsConfig {
                credentials: ApiCredentials::new(raw.paypal_client_id, raw.paypal_client_secret),
                sandbox,
            },
            database: DatabaseConfig {
                url: non_blank(raw.supabase_url),
                service_role_key: non_blank(raw.supabase_service_role_key),
            },
            mailing_list: MailingListConfig {
                api_key: non_blank(raw.mailchimp_api_key),
                server_prefix: non_blank(raw.mailchimp_server_prefix),
                list_id: non_blank(raw.mailchimp_list_id),
            },
            auth: AuthConfig {
                jwt_secret: non_blank(raw.auth_jwt_secret),
                admin_emails,
            },
            log_format,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
