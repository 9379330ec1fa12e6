//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`RateAggregationEngine`]: concurrent rate collection and selection
//! - [`RateSelectionStrategy`]: strategies for choosing which rates to show

pub mod rate_aggregation;
pub mod rate_selection;

pub use rate_aggregation::{
    AggregationError, AggregationResult, CarrierQuotes, RateAggregationEngine,
};
pub use rate_selection::{CheapestPerServiceStrategy, RateSelectionStrategy, normalize_rates};
