//! # Shipping Rates
//!
//! Raw carrier quotes and the normalized rate shown to shoppers.
//!
//! A [`RawCarrierRate`] is whatever the shipping provider returned for one
//! carrier. [`NormalizedRate::from_raw`] turns it into a [`NormalizedRate`]
//! only when its service code is supported and its total cost is positive.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ServiceCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Currency every rate is quoted in.
pub const CURRENCY: &str = "USD";

/// One service quote as returned by the shipping provider.
///
/// Fields the carrier omits or sends as `null` default to empty/zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCarrierRate {
    /// Provider display name of the service (e.g. "UPS Ground").
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_name: String,
    /// Provider service code (e.g. `ups_ground`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_code: String,
    /// Base shipment cost.
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipment_cost: f64,
    /// Surcharges on top of the base cost.
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_cost: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RawCarrierRate {
    /// Creates a raw rate.
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        service_code: impl Into<String>,
        shipment_cost: f64,
        other_cost: f64,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_code: service_code.into(),
            shipment_cost,
            other_cost,
        }
    }

    /// Returns `shipment_cost + other_cost`.
    ///
    /// Non-finite costs count as zero.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        let shipment = Decimal::from_f64(self.shipment_cost).unwrap_or_default();
        let other = Decimal::from_f64(self.other_cost).unwrap_or_default();
        shipment + other
    }
}

/// A supported, positively priced shipping option.
///
/// # Invariants
///
/// - `service_code` is one of [`ServiceCode::ALL`]
/// - `amount > 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRate {
    id: String,
    carrier: String,
    service: String,
    service_code: ServiceCode,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: &'static str,
    delivery_days: Option<String>,
    tracking_available: bool,
}

impl NormalizedRate {
    /// Creates a rate for a supported service.
    ///
    /// The id is `"{carrier_code}_{service_code}"`; the carrier label comes
    /// from the service code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `amount` is not strictly positive.
    pub fn new(
        carrier_code: &str,
        service: impl Into<String>,
        service_code: ServiceCode,
        amount: Decimal,
    ) -> DomainResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount(format!(
                "{service_code} quoted at {amount}"
            )));
        }
        Ok(Self {
            id: format!("{carrier_code}_{service_code}"),
            carrier: service_code.carrier().display_name().to_string(),
            service: service.into(),
            service_code,
            amount,
            currency: CURRENCY,
            delivery_days: Some(service_code.delivery_days().to_string()),
            tracking_available: true,
        })
    }

    /// Normalizes a raw carrier quote.
    ///
    /// Returns `None` for unsupported service codes and non-positive totals.
    /// A blank provider service name falls back to [`ServiceCode::service_name`].
    #[must_use]
    pub fn from_raw(carrier_code: &str, raw: &RawCarrierRate) -> Option<Self> {
        let service_code = raw.service_code.parse::<ServiceCode>().ok()?;
        let service = match raw.service_name.trim() {
            "" => service_code.service_name(),
            name => name,
        };
        Self::new(
            carrier_code,
            service,
            service_code,
            raw.total_cost(),
        )
        .ok()
    }

    /// Returns the rate id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the carrier display name.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Returns the service display name.
    #[inline]
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service code.
    #[inline]
    #[must_use]
    pub fn service_code(&self) -> ServiceCode {
        self.service_code
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &'static str {
        self.currency
    }

    /// Returns the delivery estimate in business days.
    #[inline]
    #[must_use]
    pub fn delivery_days(&self) -> Option<&str> {
        self.delivery_days.as_deref()
    }

    /// Returns true if the carrier provides tracking.
    #[inline]
    #[must_use]
    pub fn tracking_available(&self) -> bool {
        self.tracking_available
    }

    /// Key under which two rates are considered the same offer.
    #[must_use]
    pub fn display_key(&self) -> String {
        format!("{}-{}", self.carrier, self.service)
    }
}

impl fmt::Display for NormalizedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) {} {}",
            self.carrier, self.service, self.service_code, self.amount, self.currency
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_adds_surcharges() {
        let raw = RawCarrierRate::new("UPS Ground", "ups_ground", 8.0, 0.5);
        assert_eq!(raw.total_cost(), Decimal::new(850, 2));
    }

    #[test]
    fn missing_cost_fields_default_to_zero() {
        let raw: RawCarrierRate =
            serde_json::from_str(r#"{"serviceName":"UPS Ground","serviceCode":"ups_ground","shipmentCost":9.1}"#)
                .unwrap();
        assert_eq!(raw.total_cost(), Decimal::new(910, 2));
        assert_eq!(raw.other_cost, 0.0);
    }

    #[test]
    fn from_raw_builds_supported_rate() {
        let raw = RawCarrierRate::new("USPS Priority Mail", "usps_priority_mail", 7.25, 0.0);
        let rate = NormalizedRate::from_raw("stamps_com", &raw).unwrap();

        assert_eq!(rate.id(), "stamps_com_usps_priority_mail");
        assert_eq!(rate.carrier(), "USPS");
        assert_eq!(rate.service(), "USPS Priority Mail");
        assert_eq!(rate.service_code(), ServiceCode::UspsPriorityMail);
        assert_eq!(rate.amount(), Decimal::new(725, 2));
        assert_eq!(rate.currency(), "USD");
        assert_eq!(rate.delivery_days(), Some("1-3"));
        assert!(rate.tracking_available());
        assert_eq!(rate.display_key(), "USPS-USPS Priority Mail");
    }

    #[test]
    fn from_raw_drops_unsupported_codes() {
        let raw = RawCarrierRate::new("USPS Media Mail", "usps_media_mail", 4.0, 0.0);
        assert!(NormalizedRate::from_raw("stamps_com", &raw).is_none());
    }

    #[test]
    fn from_raw_drops_non_positive_amounts() {
        let raw = RawCarrierRate::new("UPS Ground", "ups_ground", 0.0, 0.0);
        assert!(NormalizedRate::from_raw("ups_walleted", &raw).is_none());

        let raw = RawCarrierRate::new("UPS Ground", "ups_ground", 5.0, -6.0);
        assert!(NormalizedRate::from_raw("ups_walleted", &raw).is_none());

        let raw = RawCarrierRate::new("UPS Ground", "ups_ground", f64::NAN, 0.0);
        assert!(NormalizedRate::from_raw("ups_walleted", &raw).is_none());
    }

    #[test]
    fn new_rejects_zero_amount() {
        let err = NormalizedRate::new("ups", "UPS Ground", ServiceCode::UpsGround, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn serializes_to_wire_shape() {
        let rate = NormalizedRate::new(
            "ups_walleted",
            "UPS Ground",
            ServiceCode::UpsGround,
            Decimal::new(850, 2),
        )
        .unwrap();
        let json = serde_json::to_value(&rate).unwrap();

        assert_eq!(json["id"], "ups_walleted_ups_ground");
        assert_eq!(json["carrier"], "UPS");
        assert_eq!(json["serviceCode"], "ups_ground");
        assert_eq!(json["amount"], 8.5);
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["deliveryDays"], "1-5");
        assert_eq!(json["trackingAvailable"], true);
    }

    #[test]
    fn null_fields_default_like_missing_ones() {
        let raw: RawCarrierRate = serde_json::from_str(
            r#"{"serviceName":null,"serviceCode":"ups_next_day_air","shipmentCost":31.5,"otherCost":null}"#,
        )
        .unwrap();
        assert_eq!(raw.service_name, "");
        assert_eq!(raw.total_cost(), Decimal::new(315, 1));

        let batch: Vec<RawCarrierRate> = serde_json::from_str(
            r#"[{"serviceName":"UPS Ground","serviceCode":"ups_ground","shipmentCost":8.5,"otherCost":0},
                {"serviceName":"UPS Next Day Air","serviceCode":null,"shipmentCost":null,"otherCost":null}]"#,
        )
        .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].service_code, "");
    }

    #[test]
    fn blank_service_name_falls_back_to_code_name() {
        let ground = NormalizedRate::from_raw(
            "ups_walleted",
            &RawCarrierRate::new("", "ups_ground", 8.5, 0.0),
        )
        .unwrap();
        let next_day = NormalizedRate::from_raw(
            "ups_walleted",
            &RawCarrierRate::new("  ", "ups_next_day_air", 31.5, 0.0),
        )
        .unwrap();

        assert_eq!(ground.service(), "UPS Ground");
        assert_eq!(next_day.service(), "UPS Next Day Air");
        assert_ne!(ground.display_key(), next_day.display_key());
    }

    #[test]
    fn sub_cent_positive_total_is_kept() {
        let raw = RawCarrierRate::new("USPS Ground Advantage", "usps_ground_advantage", 0.004, 0.0);
        let rate = NormalizedRate::from_raw("stamps_com", &raw).unwrap();
        assert!(rate.amount() > Decimal::ZERO);
        assert_eq!(rate.amount(), Decimal::new(4, 3));
    }
}
