//! # Domain Entities
//!
//! - [`CartItem`], [`Package`]: what is being shipped
//! - [`Location`], [`RateQuoteRequest`]: where it goes
//! - [`RawCarrierRate`], [`NormalizedRate`]: what it costs

pub mod package;
pub mod rate;

pub use package::{CartItem, DEFAULT_COUNTRY, Location, Package, RateQuoteRequest};
pub use rate::{CURRENCY, NormalizedRate, RawCarrierRate};
