//! # Carriers and Service Codes
//!
//! The closed set of shipping services the storefront sells.
//!
//! - [`Carrier`] - USPS or UPS
//! - [`ServiceCode`] - the six allow-listed service levels
//!
//! Any service code outside [`ServiceCode::ALL`] is rejected at parse time,
//! so a [`ServiceCode`] value is always a supported service.
//!
//! # Examples
//!
//! ```
//! use storefront_shipping::domain::value_objects::service_code::{Carrier, ServiceCode};
//!
//! let code: ServiceCode = "ups_ground".parse().unwrap();
//! assert_eq!(code.carrier(), Carrier::Ups);
//! assert_eq!(code.delivery_days(), "1-5");
//! assert!("fedex_ground".parse::<ServiceCode>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shipping carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Carrier {
    /// United States Postal Service.
    Usps,
    /// United Parcel Service.
    Ups,
}

impl Carrier {
    /// Returns the display name shown to shoppers.
    #[inline]
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Usps => "USPS",
            Self::Ups => "UPS",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a string is not one of the supported service codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported service code: {0}")]
pub struct UnsupportedServiceCode(pub String);

/// One of the six supported service levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCode {
    /// USPS Ground Advantage.
    #[serde(rename = "usps_ground_advantage")]
    UspsGroundAdvantage,
    /// USPS Priority Mail.
    #[serde(rename = "usps_priority_mail")]
    UspsPriorityMail,
    /// USPS Priority Mail Express.
    #[serde(rename = "usps_priority_mail_express")]
    UspsPriorityMailExpress,
    /// UPS Ground.
    #[serde(rename = "ups_ground")]
    UpsGround,
    /// UPS 2nd Day Air.
    #[serde(rename = "ups_2nd_day_air")]
    Ups2ndDayAir,
    /// UPS Next Day Air.
    #[serde(rename = "ups_next_day_air")]
    UpsNextDayAir,
}

impl ServiceCode {
    /// Every supported service code.
    pub const ALL: [Self; 6] = [
        Self::UspsGroundAdvantage,
        Self::UspsPriorityMail,
        Self::UspsPriorityMailExpress,
        Self::UpsGround,
        Self::Ups2ndDayAir,
        Self::UpsNextDayAir,
    ];

    /// Returns the provider's wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UspsGroundAdvantage => "usps_ground_advantage",
            Self::UspsPriorityMail => "usps_priority_mail",
            Self::UspsPriorityMailExpress => "usps_priority_mail_express",
            Self::UpsGround => "ups_ground",
            Self::Ups2ndDayAir => "ups_2nd_day_air",
            Self::UpsNextDayAir => "ups_next_day_air",
        }
    }

    /// Returns the carrier operating this service.
    #[must_use]
    pub const fn carrier(self) -> Carrier {
        match self {
            Self::UspsGroundAdvantage | Self::UspsPriorityMail | Self::UspsPriorityMailExpress => {
                Carrier::Usps
            }
            Self::UpsGround | Self::Ups2ndDayAir | Self::UpsNextDayAir => Carrier::Ups,
        }
    }

    /// Returns the service's standard display name.
    #[must_use]
    pub const fn service_name(self) -> &'static str {
        match self {
            Self::UspsGroundAdvantage => "USPS Ground Advantage",
            Self::UspsPriorityMail => "USPS Priority Mail",
            Self::UspsPriorityMailExpress => "USPS Priority Mail Express",
            Self::UpsGround => "UPS Ground",
            Self::Ups2ndDayAir => "UPS 2nd Day Air",
            Self::UpsNextDayAir => "UPS Next Day Air",
        }
    }

    /// Returns the static business-day delivery estimate.
    #[must_use]
    pub const fn delivery_days(self) -> &'static str {
        match self {
            Self::UspsGroundAdvantage => "2-5",
            Self::UspsPriorityMail => "1-3",
            Self::UspsPriorityMailExpress => "1-2",
            Self::UpsGround => "1-5",
            Self::Ups2ndDayAir => "2",
            Self::UpsNextDayAir => "1",
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCode {
    type Err = UnsupportedServiceCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnsupportedServiceCode(s.to_string()))
    }
}

/// Looks up the delivery estimate for a raw provider service code.
///
/// Unknown codes have no estimate.
#[must_use]
pub fn delivery_days_for(code: &str) -> Option<&'static str> {
    code.parse::<ServiceCode>().ok().map(ServiceCode::delivery_days)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_from_str() {
        for code in ServiceCode::ALL {
            assert_eq!(code.as_str().parse::<ServiceCode>().unwrap(), code);
        }
    }

    #[test]
    fn unsupported_codes_are_rejected() {
        let err = "fedex_ground".parse::<ServiceCode>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported service code: fedex_ground");
        assert!("UPS_GROUND".parse::<ServiceCode>().is_err());
        assert!("".parse::<ServiceCode>().is_err());
    }

    #[test]
    fn carriers_follow_code_prefix() {
        for code in ServiceCode::ALL {
            let prefix = code.as_str().split('_').next().unwrap();
            let expected = match prefix {
                "usps" => Carrier::Usps,
                _ => Carrier::Ups,
            };
            assert_eq!(code.carrier(), expected);
        }
    }

    #[test]
    fn service_names_start_with_carrier() {
        for code in ServiceCode::ALL {
            assert!(code.service_name().starts_with(code.carrier().display_name()));
        }
        assert_eq!(ServiceCode::Ups2ndDayAir.service_name(), "UPS 2nd Day Air");
    }

    #[test]
    fn delivery_estimate_lookup() {
        assert_eq!(delivery_days_for("usps_priority_mail"), Some("1-3"));
        assert_eq!(delivery_days_for("ups_next_day_air"), Some("1"));
        assert_eq!(delivery_days_for("usps_media_mail"), None);
    }

    #[test]
    fn serde_uses_wire_identifiers() {
        let json = serde_json::to_string(&ServiceCode::Ups2ndDayAir).unwrap();
        assert_eq!(json, "\"ups_2nd_day_air\"");

        let json = serde_json::to_string(&Carrier::Usps).unwrap();
        assert_eq!(json, "\"USPS\"");
    }
}
