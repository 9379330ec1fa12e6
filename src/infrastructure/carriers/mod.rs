//! # Carrier Adapters
//!
//! Outbound integrations that quote shipping rates.
//!
//! - [`CarrierRateSource`]: the port every carrier integration implements
//! - [`ShipStationRateSource`]: quotes one carrier through ShipStation
//! - [`HttpClient`]: shared JSON/Basic-auth HTTP wrapper
//! - [`CarrierError`]: outbound failure taxonomy

pub mod error;
pub mod http_client;
pub mod shipstation;
pub mod traits;

pub use error::{CarrierError, CarrierResult};
pub use http_client::HttpClient;
pub use shipstation::ShipStationRateSource;
pub use traits::CarrierRateSource;
