//! # REST Request and Response Types
//!
//! Wire shapes of the JSON API and their mapping to domain types.
//!
//! Inbound bodies are deserialized leniently (missing strings become empty)
//! and then validated field by field, so a bad request reports every problem
//! at once instead of the first serde error.

use crate::application::error::{ApplicationError, ApplicationResult, FieldError};
use crate::application::use_cases::ShippingQuote;
use crate::domain::entities::{CartItem, Location, NormalizedRate, Package, RateQuoteRequest};
use crate::domain::value_objects::{Dimensions, Weight};
use serde::{Deserialize, Serialize};

/// Item dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionsDto {
    /// Length in inches.
    pub length: f64,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    /// Product id.
    #[serde(default)]
    pub product_id: String,
    /// Product name.
    #[serde(default)]
    pub product_name: String,
    /// Units ordered.
    pub quantity: i64,
    /// Per-unit weight in pounds.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Per-unit box dimensions.
    #[serde(default)]
    pub dimensions: Option<DimensionsDto>,
}

/// Destination address.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddressDto {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// ZIP / postal code.
    pub zip_code: String,
    /// Country code; `US` when omitted.
    pub country: Option<String>,
}

/// Body of `POST /api/shipping/rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesRequest {
    /// Cart lines.
    #[serde(default)]
    pub items: Vec<CartItemDto>,
    /// Destination.
    #[serde(default)]
    pub shipping_address: ShippingAddressDto,
}

impl RatesRequest {
    /// Validates the body and builds the domain quote request.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRequest` listing every invalid field.
    pub fn into_quote_request(self) -> ApplicationResult<RateQuoteRequest> {
        let mut errors = Vec::new();

        if self.items.is_empty() {
            errors.push(FieldError::new("items", "at least one item is required"));
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (i, dto) in self.items.into_iter().enumerate() {
            if let Some(item) = validate_item(i, dto, &mut errors) {
                items.push(item);
            }
        }

        let address = self.shipping_address;
        if address.city.trim().is_empty() {
            errors.push(FieldError::new("shippingAddress.city", "city is required"));
        }
        if address.zip_code.trim().is_empty() {
            errors.push(FieldError::new(
                "shippingAddress.zipCode",
                "ZIP code is required",
            ));
        }
        let state = address.state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(FieldError::new(
                "shippingAddress.state",
                "state must be a two-letter code",
            ));
        }

        if !errors.is_empty() {
            return Err(ApplicationError::invalid_request(errors));
        }

        let destination = Location::new(
            address.zip_code,
            address.city,
            &address.state,
            address.country.as_deref(),
        )?;
        let package = Package::from_items(&items)?;
        Ok(RateQuoteRequest::new(destination, package))
    }
}

fn validate_item(index: usize, dto: CartItemDto, errors: &mut Vec<FieldError>) -> Option<CartItem> {
    let field = |name: &str| format!("items[{index}].{name}");
    let before = errors.len();

    let quantity = match u32::try_from(dto.quantity) {
        Ok(q) if q >= 1 => q,
        _ => {
            errors.push(FieldError::new(field("quantity"), "quantity must be at least 1"));
            0
        }
    };

    let weight = match dto.weight.map(Weight::from_pounds).transpose() {
        Ok(w) => w.unwrap_or_default(),
        Err(e) => {
            errors.push(FieldError::new(field("weight"), e.to_string()));
            Weight::default()
        }
    };

    let dimensions = match dto
        .dimensions
        .map(|d| Dimensions::new(d.length, d.width, d.height))
        .transpose()
    {
        Ok(d) => d,
        Err(e) => {
            errors.push(FieldError::new(field("dimensions"), e.to_string()));
            None
        }
    };

    if errors.len() > before {
        return None;
    }

    let item = CartItem::new(dto.product_id, dto.product_name, quantity)
        .ok()?
        .with_weight(weight);
    Some(match dimensions {
        Some(d) => item.with_dimensions(d),
        None => item,
    })
}

/// Body of a successful `POST /api/shipping/rates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    /// Always `true`.
    pub success: bool,
    /// Selected rates, cheapest first.
    pub rates: Vec<NormalizedRate>,
    /// Origin.
    pub ship_from: Location,
    /// Destination.
    pub ship_to: Location,
    /// Billable weight in pounds.
    pub total_weight: f64,
    /// Cart lines consolidated into the package.
    pub package_count: usize,
    /// Carriers that could not be quoted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl From<ShippingQuote> for RatesResponse {
    fn from(quote: ShippingQuote) -> Self {
        Self {
            success: true,
            rates: quote.rates,
            ship_from: quote.ship_from,
            ship_to: quote.ship_to,
            total_weight: quote.total_weight.pounds(),
            package_count: quote.package_count,
            warnings: quote.warnings,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Body of `GET /api/admin/integrations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationsResponse {
    /// Shipping provider credentials are set.
    pub shipping: bool,
    /// Payment processor credentials are set.
    pub payments: bool,
    /// Payment processor runs against its sandbox.
    pub payments_sandbox: bool,
    /// Managed database URL and key are set.
    pub database: bool,
    /// Mailing-list key, server and list are set.
    pub mailing_list: bool,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
    /// Field-level problems, when the request was invalid.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ErrorResponse {
    /// Creates an error body without details.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }

    /// Creates an error body with field details.
    #[must_use]
    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RatesRequest {
        serde_json::from_value(value).unwrap()
    }

    fn field_names(err: ApplicationError) -> Vec<String> {
        match err {
            ApplicationError::InvalidRequest(fields) => {
                fields.into_iter().map(|f| f.field).collect()
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn valid_request_builds_package() {
        let request = parse(json!({
            "items": [{ "productId": "p-1", "productName": "Mug", "quantity": 3, "weight": 2 }],
            "shippingAddress": { "address": "1 Main St", "city": "Austin", "state": "tx", "zipCode": "78701" }
        }))
        .into_quote_request()
        .unwrap();

        assert!((request.package().weight().pounds() - 6.0).abs() < f64::EPSILON);
        assert_eq!(request.package().dimensions(), Dimensions::DEFAULT_BOX);
        assert_eq!(request.destination().state(), "TX");
        assert_eq!(request.destination().country(), "US");
    }

    #[test]
    fn item_dimensions_are_used() {
        let request = parse(json!({
            "items": [
                { "productId": "p-1", "productName": "Print", "quantity": 1, "weight": 1.5,
                  "dimensions": { "length": 20, "width": 16, "height": 2 } }
            ],
            "shippingAddress": { "city": "Austin", "state": "TX", "zipCode": "78701", "country": "US" }
        }))
        .into_quote_request()
        .unwrap();

        assert_eq!(
            request.package().dimensions(),
            Dimensions::new(20.0, 16.0, 2.0).unwrap()
        );
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let err = parse(json!({
            "items": [
                { "productId": "p-1", "productName": "Mug", "quantity": 0, "weight": -1 },
                { "productId": "p-2", "productName": "Box", "quantity": 1,
                  "dimensions": { "length": 0, "width": 1, "height": 1 } }
            ],
            "shippingAddress": { "city": "", "state": "Texas", "zipCode": " " }
        }))
        .into_quote_request()
        .unwrap_err();

        assert_eq!(
            field_names(err),
            vec![
                "items[0].quantity",
                "items[0].weight",
                "items[1].dimensions",
                "shippingAddress.city",
                "shippingAddress.zipCode",
                "shippingAddress.state",
            ]
        );
    }

    #[test]
    fn empty_cart_is_rejected() {
        let err = parse(json!({
            "items": [],
            "shippingAddress": { "city": "Austin", "state": "TX", "zipCode": "78701" }
        }))
        .into_quote_request()
        .unwrap_err();

        assert_eq!(field_names(err), vec!["items"]);
    }

    #[test]
    fn rates_response_omits_empty_warnings() {
        let quote = ShippingQuote {
            rates: vec![],
            ship_from: Location::new("93065", "Simi Valley", "CA", None).unwrap(),
            ship_to: Location::new("78701", "Austin", "TX", None).unwrap(),
            total_weight: Weight::from_pounds(6.0).unwrap(),
            package_count: 1,
            warnings: vec![],
        };
        let json = serde_json::to_value(RatesResponse::from(quote)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["totalWeight"], 6.0);
        assert_eq!(json["packageCount"], 1);
        assert_eq!(json["shipFrom"]["postalCode"], "93065");
        assert_eq!(json["shipTo"]["state"], "TX");
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("Forbidden")).unwrap();
        assert_eq!(json, json!({ "error": "Forbidden" }));
    }
}
