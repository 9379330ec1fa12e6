//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`carriers`]: shipping provider rate quoting
//! - [`logging`]: tracing subscriber setup

pub mod carriers;
pub mod logging;
