//! # REST Handlers
//!
//! Request handlers and the shared application state.

use crate::api::rest::auth::{AdminGate, AdminUser};
use crate::api::rest::dto::{HealthResponse, IntegrationsResponse, RatesRequest, RatesResponse};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::RateAggregationEngine;
use crate::application::use_cases::QuoteShippingRatesUseCase;
use crate::config::AppConfig;
use crate::infrastructure::carriers::{CarrierResult, ShipStationRateSource};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use std::sync::Arc;

/// State shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Rate quoting use case.
    pub quote_rates: QuoteShippingRatesUseCase,
    /// Admin token gate.
    pub admin_gate: AdminGate,
    /// Which integrations have credentials.
    pub integrations: IntegrationsResponse,
}

impl AppState {
    /// Builds the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError` if the outbound HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> CarrierResult<Self> {
        let sources = ShipStationRateSource::from_config(&config.shipping)?;
        let engine = (!sources.is_empty()).then(|| RateAggregationEngine::with_defaults(sources));
        let quote_rates = QuoteShippingRatesUseCase::new(engine, config.shipping.origin.clone());

        Ok(Self {
            integrations: IntegrationsResponse {
                shipping: quote_rates.is_configured(),
                payments: config.payments.credentials.is_some(),
                payments_sandbox: config.payments.sandbox,
                database: config.database.is_configured(),
                mailing_list: config.mailing_list.is_configured(),
            },
            quote_rates,
            admin_gate: AdminGate::from_config(&config.auth),
        })
    }
}

/// `POST /api/shipping/rates`
///
/// # Errors
///
/// Returns 400 for an invalid body or when no rate is available, and 500
/// when shipping is not configured.
pub async fn shipping_rates(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RatesRequest>, JsonRejection>,
) -> ApplicationResult<Json<RatesResponse>> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "unreadable rates request");
        ApplicationError::validation("Invalid request body")
    })?;

    let request = body.into_quote_request()?;
    tracing::info!(
        to = %request.destination(),
        weight = %request.package().weight(),
        dimensions = %request.package().dimensions(),
        "quoting shipping rates"
    );

    let quote = state.quote_rates.execute(request).await?;
    tracing::info!(
        rates = quote.rates.len(),
        warnings = quote.warnings.len(),
        "shipping rates quoted"
    );
    Ok(Json(quote.into()))
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /api/admin/integrations`
pub async fn integrations(
    admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Json<IntegrationsResponse> {
    tracing::info!(admin = %admin.email, "integration status requested");
    Json(state.integrations)
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApplicationError {
    ApplicationError::not_found(uri.path())
}
