//! # ShipStation Rate Source
//!
//! Quotes one carrier through ShipStation's `POST /shipments/getrates`.
//!
//! Every request is a residential, no-signature parcel shipped from the
//! configured origin. The response is an array of service quotes that maps
//! directly onto [`RawCarrierRate`].

use crate::config::{ApiCredentials, ShippingConfig};
use crate::domain::entities::{Location, RateQuoteRequest, RawCarrierRate};
use crate::infrastructure::carriers::error::CarrierResult;
use crate::infrastructure::carriers::http_client::HttpClient;
use crate::infrastructure::carriers::traits::CarrierRateSource;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Path of the rate-quote endpoint, relative to the base URL.
pub const GET_RATES_PATH: &str = "/shipments/getrates";

#[derive(Debug, Serialize)]
struct WeightBody {
    value: f64,
    units: &'static str,
}

#[derive(Debug, Serialize)]
struct DimensionsBody {
    units: &'static str,
    length: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetRatesBody<'a> {
    carrier_code: &'a str,
    package_code: &'static str,
    from_postal_code: &'a str,
    to_state: &'a str,
    to_country: &'a str,
    to_postal_code: &'a str,
    to_city: &'a str,
    weight: WeightBody,
    dimensions: DimensionsBody,
    confirmation: &'static str,
    residential: bool,
}

impl<'a> GetRatesBody<'a> {
    fn new(carrier_code: &'a str, origin: &'a Location, request: &'a RateQuoteRequest) -> Self {
        let to = request.destination();
        let package = request.package();
        let dimensions = package.dimensions();
        Self {
            carrier_code,
            package_code: "package",
            from_postal_code: origin.postal_code(),
            to_state: to.state(),
            to_country: to.country(),
            to_postal_code: to.postal_code(),
            to_city: to.city(),
            weight: WeightBody {
                value: package.weight().pounds(),
                units: "pounds",
            },
            dimensions: DimensionsBody {
                units: "inches",
                length: dimensions.length,
                width: dimensions.width,
                height: dimensions.height,
            },
            confirmation: "none",
            residential: true,
        }
    }
}

/// Rate source for one ShipStation carrier.
#[derive(Debug, Clone)]
pub struct ShipStationRateSource {
    client: HttpClient,
    url: String,
    credentials: ApiCredentials,
    carrier_code: String,
    origin: Location,
}

impl ShipStationRateSource {
    /// Creates a source quoting `carrier_code`.
    #[must_use]
    pub fn new(
        client: HttpClient,
        base_url: &str,
        credentials: ApiCredentials,
        carrier_code: impl Into<String>,
        origin: Location,
    ) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), GET_RATES_PATH),
            credentials,
            carrier_code: carrier_code.into(),
            origin,
        }
    }

    /// Builds one source per configured carrier, all sharing one HTTP client.
    ///
    /// Returns an empty list when no credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the HTTP client cannot be created.
    pub fn from_config(config: &ShippingConfig) -> CarrierResult<Vec<Arc<dyn CarrierRateSource>>> {
        let Some(credentials) = config.credentials.as_ref() else {
            return Ok(Vec::new());
        };

        let client = HttpClient::new()?;
        Ok(config
            .carriers
            .iter()
            .map(|carrier_code| {
                Arc::new(Self::new(
                    client.clone(),
                    &config.base_url,
                    credentials.clone(),
                    carrier_code.as_str(),
                    config.origin.clone(),
                )) as Arc<dyn CarrierRateSource>
            })
            .collect())
    }
}

#[async_trait]
impl CarrierRateSource for ShipStationRateSource {
    fn carrier_code(&self) -> &str {
        &self.carrier_code
    }

    async fn fetch_rates(&self, request: &RateQuoteRequest) -> CarrierResult<Vec<RawCarrierRate>> {
        let body = GetRatesBody::new(&self.carrier_code, &self.origin, request);
        tracing::debug!(
            carrier = %self.carrier_code,
            to = %request.destination(),
            weight_lb = body.weight.value,
            "requesting carrier rates"
        );

        let rates: Vec<RawCarrierRate> = self
            .client
            .post_with_basic_auth(&self.url, &body, &self.credentials)
            .await?;

        tracing::debug!(carrier = %self.carrier_code, count = rates.len(), "carrier rates received");
        Ok(rates)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{CartItem, Package};
    use crate::domain::value_objects::Weight;

    fn request() -> RateQuoteRequest {
        let items = vec![
            CartItem::new("p-1", "Mug", 3)
                .unwrap()
                .with_weight(Weight::from_pounds(2.0).unwrap()),
        ];
        RateQuoteRequest::new(
            Location::new("10001", "New York", "NY", None).unwrap(),
            Package::from_items(&items).unwrap(),
        )
    }

    #[test]
    fn body_carries_shared_parameters_and_carrier_code() {
        let origin = Location::new("93065", "Simi Valley", "CA", None).unwrap();
        let request = request();
        let body = GetRatesBody::new("stamps_com", &origin, &request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["carrierCode"], "stamps_com");
        assert_eq!(json["packageCode"], "package");
        assert_eq!(json["fromPostalCode"], "93065");
        assert_eq!(json["toState"], "NY");
        assert_eq!(json["toCountry"], "US");
        assert_eq!(json["toPostalCode"], "10001");
        assert_eq!(json["toCity"], "New York");
        assert_eq!(json["weight"]["value"], 6.0);
        assert_eq!(json["weight"]["units"], "pounds");
        assert_eq!(json["dimensions"]["units"], "inches");
        assert_eq!(json["dimensions"]["length"], 12.0);
        assert_eq!(json["dimensions"]["width"], 12.0);
        assert_eq!(json["dimensions"]["height"], 6.0);
        assert_eq!(json["confirmation"], "none");
        assert_eq!(json["residential"], true);
    }

    #[test]
    fn url_joins_base_and_path() {
        let source = ShipStationRateSource::new(
            HttpClient::new().unwrap(),
            "http://localhost:9000/",
            ApiCredentials::new(Some("k".into()), Some("s".into())).unwrap(),
            "ups_walleted",
            Location::new("93065", "Simi Valley", "CA", None).unwrap(),
        );
        assert_eq!(source.url, "http://localhost:9000/shipments/getrates");
        assert_eq!(source.carrier_code(), "ups_walleted");
    }

    #[test]
    fn from_config_without_credentials_has_no_sources() {
        let config = crate::config::AppConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert!(ShipStationRateSource::from_config(&config.shipping).unwrap().is_empty());
    }

    #[test]
    fn from_config_builds_one_source_per_carrier() {
        let config = crate::config::AppConfig::from_vars([
            ("SHIPSTATION_API_KEY", "key"),
            ("SHIPSTATION_API_SECRET", "secret"),
        ])
        .unwrap();
        let sources = ShipStationRateSource::from_config(&config.shipping).unwrap();
        let codes: Vec<&str> = sources.iter().map(|s| s.carrier_code()).collect();
        assert_eq!(codes, vec!["stamps_com", "ups_walleted"]);
    }
}
