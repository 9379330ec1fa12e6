//! # Use Cases
//!
//! - [`QuoteShippingRatesUseCase`]: quote a cart against every carrier

pub mod quote_shipping_rates;

pub use quote_shipping_rates::{QuoteShippingRatesUseCase, ShippingQuote};
