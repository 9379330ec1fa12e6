//! # Application Layer
//!
//! Use cases and the services they orchestrate.

pub mod error;
pub mod services;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult, FieldError};
