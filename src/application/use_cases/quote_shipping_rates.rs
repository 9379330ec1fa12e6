//! # Quote Shipping Rates Use Case
//!
//! Quotes a validated shipment against every configured carrier.
//!
//! Carrier failures do not fail the request; they are returned as warnings
//! next to the rates that did arrive.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::rate_aggregation::RateAggregationEngine;
use crate::domain::entities::{Location, NormalizedRate, RateQuoteRequest};
use crate::domain::value_objects::Weight;

/// Outcome of a successful quote.
#[derive(Debug, Clone)]
pub struct ShippingQuote {
    /// Selected rates, cheapest first.
    pub rates: Vec<NormalizedRate>,
    /// Origin of the shipment.
    pub ship_from: Location,
    /// Destination of the shipment.
    pub ship_to: Location,
    /// Billable package weight.
    pub total_weight: Weight,
    /// Cart lines consolidated into the package.
    pub package_count: usize,
    /// Non-fatal problems, one per failed carrier.
    pub warnings: Vec<String>,
}

/// Use case behind `POST /api/shipping/rates`.
#[derive(Debug, Clone)]
pub struct QuoteShippingRatesUseCase {
    engine: Option<RateAggregationEngine>,
    origin: Location,
}

impl QuoteShippingRatesUseCase {
    /// Creates the use case. `engine` is `None` when shipping credentials are missing.
    #[must_use]
    pub fn new(engine: Option<RateAggregationEngine>, origin: Location) -> Self {
        Self { engine, origin }
    }

    /// Returns true if carrier credentials are configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.engine.is_some()
    }

    /// Returns the shipment origin.
    #[must_use]
    pub fn origin(&self) -> &Location {
        &self.origin
    }

    /// Quotes the shipment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotConfigured` if no carrier credentials are set,
    /// and `ApplicationError::NoRatesAvailable` if no carrier returned a usable rate.
    pub async fn execute(&self, request: RateQuoteRequest) -> ApplicationResult<ShippingQuote> {
        let engine = self.engine.as_ref().ok_or_else(|| {
            tracing::error!("shipping rate requested but carrier credentials are not configured");
            ApplicationError::not_configured("Shipping service")
        })?;

        let result = engine.collect_and_select(&request).await?;

        let warnings = result
            .failed_carriers
            .iter()
            .map(|carrier| format!("Rates from carrier '{carrier}' are currently unavailable"))
            .collect();

        let package = request.package();
        Ok(ShippingQuote {
            rates: result.rates,
            ship_from: self.origin.clone(),
            ship_to: request.destination().clone(),
            total_weight: package.weight(),
            package_count: package.item_count(),
            warnings,
        })
    }
}
