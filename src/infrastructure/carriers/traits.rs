//! # Carrier Rate Source Trait
//!
//! Port definition for carrier rate integrations.
//!
//! Each [`CarrierRateSource`] quotes one carrier. Rate aggregation fans out to
//! every configured source and tolerates individual failures.
//!
//! # Examples
//!
//! ```ignore
//! use storefront_shipping::infrastructure::carriers::traits::CarrierRateSource;
//!
//! struct FixedRates { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl CarrierRateSource for FixedRates {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{RateQuoteRequest, RawCarrierRate};
use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use std::fmt;

/// A source of rate quotes for one carrier.
#[async_trait]
pub trait CarrierRateSource: Send + Sync + fmt::Debug {
    /// Returns the provider's code for this carrier (e.g. `stamps_com`).
    fn carrier_code(&self) -> &str;

    /// Requests every service quote the carrier offers for the shipment.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` if the provider call fails or its response
    /// cannot be parsed.
    async fn fetch_rates(&self, request: &RateQuoteRequest) -> CarrierResult<Vec<RawCarrierRate>>;
}
