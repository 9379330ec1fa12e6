//! # REST API
//!
//! JSON endpoints served with axum.
//!
//! # Endpoints
//!
//! - `POST /api/shipping/rates` - Quote a cart against the configured carriers
//! - `GET /api/health` - Liveness check
//! - `GET /api/admin/integrations` - Which integrations have credentials (admin)
//!
//! Unknown routes answer `404 {"error":"Not found"}`.
//!
//! # Usage
//!
//! ```no_run
//! use storefront_shipping::api::rest::{AppState, create_router};
//! use storefront_shipping::config::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! let router = create_router(Arc::new(AppState::from_config(&config)?));
//!
//! let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use auth::{AdminGate, AdminUser, Claims};
pub use dto::{
    CartItemDto, DimensionsDto, ErrorResponse, HealthResponse, IntegrationsResponse,
    RatesRequest, RatesResponse, ShippingAddressDto,
};
pub use handlers::AppState;
pub use routes::create_router;
