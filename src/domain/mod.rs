//! # Domain Layer
//!
//! Shipping domain types with no I/O.
//!
//! - [`value_objects`]: service codes, carriers, weights and dimensions
//! - [`entities`]: cart items, packages, quote requests and rates
//! - [`errors`]: invariant violations

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
