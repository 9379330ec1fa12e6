//! # Rate Aggregation Engine
//!
//! Orchestrates rate collection and selection.
//!
//! This module provides the [`RateAggregationEngine`] which quotes every
//! configured carrier concurrently, normalizes and filters the answers and
//! applies a selection strategy to the result.
//!
//! A carrier that fails contributes an empty rate list; the request only
//! fails when no valid rate survives from any carrier.

use crate::application::services::rate_selection::{
    CheapestPerServiceStrategy, RateSelectionStrategy, normalize_rates,
};
use crate::domain::entities::{NormalizedRate, RateQuoteRequest, RawCarrierRate};
use crate::infrastructure::carriers::traits::CarrierRateSource;
use std::fmt;
use std::sync::Arc;

/// Raw quotes returned by one carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierQuotes {
    /// Provider carrier code.
    pub carrier_code: String,
    /// Raw quotes; empty when the carrier call failed.
    pub rates: Vec<RawCarrierRate>,
}

/// Result of rate aggregation.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Selected rates, cheapest first.
    pub rates: Vec<NormalizedRate>,
    /// Raw quotes received across all carriers.
    pub total_collected: usize,
    /// Number of carriers queried.
    pub carriers_queried: usize,
    /// Carriers whose call failed.
    pub failed_carriers: Vec<String>,
    /// Raw quotes dropped as unsupported or unpriced.
    pub filtered_count: usize,
}

/// Error type for aggregation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// No carrier sources are configured.
    NoCarriersConfigured,
    /// No valid rate survived normalization and filtering.
    NoRatesAvailable {
        /// Raw quotes received before filtering.
        collected: usize,
        /// Carriers whose call failed.
        failed_carriers: Vec<String>,
    },
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCarriersConfigured => write!(f, "no carriers configured"),
            Self::NoRatesAvailable {
                collected,
                failed_carriers,
            } => {
                write!(f, "no valid rates among {} collected", collected)?;
                if !failed_carriers.is_empty() {
                    write!(f, " (failed carriers: {})", failed_carriers.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AggregationError {}

/// Result type for aggregation operations.
pub type AggregationResultType<T> = Result<T, AggregationError>;

/// Engine for collecting and selecting rates from multiple carriers.
#[derive(Debug, Clone)]
pub struct RateAggregationEngine {
    sources: Vec<Arc<dyn CarrierRateSource>>,
    selection_strategy: Arc<dyn RateSelectionStrategy>,
}

impl RateAggregationEngine {
    /// Creates a new RateAggregationEngine.
    #[must_use]
    pub fn new(
        sources: Vec<Arc<dyn CarrierRateSource>>,
        selection_strategy: Arc<dyn RateSelectionStrategy>,
    ) -> Self {
        Self {
            sources,
            selection_strategy,
        }
    }

    /// Creates an engine using [`CheapestPerServiceStrategy`].
    #[must_use]
    pub fn with_defaults(sources: Vec<Arc<dyn CarrierRateSource>>) -> Self {
        Self::new(sources, Arc::new(CheapestPerServiceStrategy::new()))
    }

    /// Collects rates from all carriers and selects the ones to display.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No carriers are configured
    /// - No valid rate remains after filtering
    pub async fn collect_and_select(
        &self,
        request: &RateQuoteRequest,
    ) -> AggregationResultType<AggregationResult> {
        if self.sources.is_empty() {
            return Err(AggregationError::NoCarriersConfigured);
        }
        let carriers_queried = self.sources.len();

        let (batches, failed_carriers) = self.collect_from_carriers(request).await;
        let total_collected: usize = batches.iter().map(|b| b.rates.len()).sum();

        let normalized: Vec<NormalizedRate> = batches
            .iter()
            .flat_map(|batch| normalize_rates(&batch.carrier_code, &batch.rates))
            .collect();
        let filtered_count = total_collected - normalized.len();

        if normalized.is_empty() {
            tracing::info!(
                total_collected,
                filtered_count,
                failed = failed_carriers.len(),
                "no valid shipping rates"
            );
            return Err(AggregationError::NoRatesAvailable {
                collected: total_collected,
                failed_carriers,
            });
        }

        let rates = self.selection_strategy.select(normalized);

        tracing::info!(
            carriers_queried,
            total_collected,
            filtered_count,
            selected = rates.len(),
            strategy = self.selection_strategy.name(),
            "shipping rates selected"
        );

        Ok(AggregationResult {
            rates,
            total_collected,
            carriers_queried,
            failed_carriers,
            filtered_count,
        })
    }

    /// Quotes every carrier concurrently.
    ///
    /// Returns one batch per carrier, in configuration order, plus the codes of
    /// carriers whose call failed (their batch is empty).
    async fn collect_from_carriers(
        &self,
        request: &RateQuoteRequest,
    ) -> (Vec<CarrierQuotes>, Vec<String>) {
        let mut handles = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let source = Arc::clone(source);
            let request = request.clone();
            let carrier_code = source.carrier_code().to_string();

            let handle = tokio::spawn(async move { source.fetch_rates(&request).await });
            handles.push((carrier_code, handle));
        }

        let mut batches = Vec::with_capacity(handles.len());
        let mut failed = Vec::new();

        for (carrier_code, handle) in handles {
            let rates = match handle.await {
                Ok(Ok(rates)) => rates,
                Ok(Err(e)) => {
                    tracing::warn!(
                        carrier = %carrier_code,
                        error = %e,
                        client_error = e.is_client_error(),
                        "carrier rate request failed"
                    );
                    failed.push(carrier_code.clone());
                    Vec::new()
                }
                Err(e) => {
                    tracing::warn!(carrier = %carrier_code, error = %e, "carrier rate task failed");
                    failed.push(carrier_code.clone());
                    Vec::new()
                }
            };
            batches.push(CarrierQuotes {
                carrier_code,
                rates,
            });
        }

        (batches, failed)
    }

    /// Returns the carrier codes this engine quotes.
    #[must_use]
    pub fn carriers(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.carrier_code()).collect()
    }

    /// Returns the selection strategy name.
    #[must_use]
    pub fn selection_strategy_name(&self) -> &'static str {
        self.selection_strategy.name()
    }
}
