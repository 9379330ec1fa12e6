//! # Storefront Shipping
//!
//! Shipping-rate quoting backend for a small storefront.
//!
//! A cart and a destination address come in; the cart is consolidated into
//! one package, every configured carrier is quoted concurrently through
//! ShipStation, and the shopper gets back the cheapest rate per displayed
//! service, sorted by price.
//!
//! # Architecture
//!
//! - [`domain`]: packages, locations, rates and service codes
//! - [`application`]: rate aggregation, selection and the quote use case
//! - [`infrastructure`]: carrier adapters and logging
//! - [`api`]: axum REST surface
//! - [`config`]: environment-driven settings
//!
//! # Example
//!
//! ```
//! use storefront_shipping::domain::entities::{CartItem, Location, Package};
//! use storefront_shipping::domain::value_objects::Weight;
//!
//! let items = [CartItem::new("p-1", "Mug", 2)
//!     .unwrap()
//!     .with_weight(Weight::from_pounds(1.25).unwrap())];
//! let package = Package::from_items(&items).unwrap();
//! let to = Location::new("78701", "Austin", "tx", None).unwrap();
//!
//! assert_eq!(package.weight().pounds(), 2.5);
//! assert_eq!(to.state(), "TX");
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
