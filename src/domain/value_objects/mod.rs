//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Carrier`], [`ServiceCode`]: the supported shipping services
//! - [`Weight`], [`Dimensions`]: package measures

pub mod measure;
pub mod service_code;

pub use measure::{Dimensions, Weight};
pub use service_code::{Carrier, ServiceCode, UnsupportedServiceCode, delivery_days_for};
