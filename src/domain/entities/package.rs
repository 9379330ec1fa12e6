//! # Packages and Quote Requests
//!
//! Turns cart line items into the single package a carrier is asked to quote.
//!
//! # Examples
//!
//! ```
//! use storefront_shipping::domain::entities::package::{CartItem, Package};
//! use storefront_shipping::domain::value_objects::{Dimensions, Weight};
//!
//! let items = vec![
//!     CartItem::new("sku-1", "Mug", 3)
//!         .unwrap()
//!         .with_weight(Weight::from_pounds(2.0).unwrap()),
//! ];
//! let package = Package::from_items(&items).unwrap();
//!
//! assert_eq!(package.weight().pounds(), 6.0);
//! assert_eq!(package.dimensions(), Dimensions::DEFAULT_BOX);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Dimensions, Weight};
use serde::Serialize;
use std::fmt;

/// Country assumed when an address does not name one.
pub const DEFAULT_COUNTRY: &str = "US";

/// One cart line as it matters for shipping.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product_id: String,
    product_name: String,
    quantity: u32,
    weight: Weight,
    dimensions: Option<Dimensions>,
}

impl CartItem {
    /// Creates a weightless line item without dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if `quantity` is zero.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity(
                "quantity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            weight: Weight::default(),
            dimensions: None,
        })
    }

    /// Sets the per-unit weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the item's box dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Returns the product id.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Returns the product name.
    #[inline]
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the per-unit weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the item dimensions, if known.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    /// Weight of the whole line (unit weight x quantity), in pounds.
    #[must_use]
    pub fn line_weight_lb(&self) -> f64 {
        self.weight.pounds() * f64::from(self.quantity)
    }
}

/// A postal location, used for both the origin and the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    postal_code: String,
    city: String,
    state: String,
    country: String,
}

impl Location {
    /// Creates a validated location.
    ///
    /// `state` is upper-cased. A blank `country` becomes [`DEFAULT_COUNTRY`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAddress` if the postal code or city is blank,
    /// or the state is not a two-letter code.
    pub fn new(
        postal_code: impl Into<String>,
        city: impl Into<String>,
        state: impl AsRef<str>,
        country: Option<&str>,
    ) -> DomainResult<Self> {
        let postal_code = postal_code.into().trim().to_string();
        let city = city.into().trim().to_string();
        let state = state.as_ref().trim().to_ascii_uppercase();

        if postal_code.is_empty() {
            return Err(DomainError::InvalidAddress(
                "postal code is required".to_string(),
            ));
        }
        if city.is_empty() {
            return Err(DomainError::InvalidAddress("city is required".to_string()));
        }
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidAddress(format!(
                "state must be a two-letter code, got '{state}'"
            )));
        }

        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map_or_else(|| DEFAULT_COUNTRY.to_string(), str::to_ascii_uppercase);

        Ok(Self {
            postal_code,
            city,
            state,
            country,
        })
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the two-letter state code.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the country code.
    #[inline]
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {} {}",
            self.city, self.state, self.postal_code, self.country
        )
    }
}

/// All cart items consolidated into one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Package {
    weight: Weight,
    dimensions: Dimensions,
    item_count: usize,
}

impl Package {
    /// Builds the package for a set of cart items.
    ///
    /// Weight is the sum of line weights, raised to [`Weight::MIN_BILLABLE_LB`].
    /// Dimensions are the envelope of every item that carries dimensions, or
    /// [`Dimensions::DEFAULT_BOX`] when none do.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyPackage` if `items` is empty, or
    /// `DomainError::InvalidWeight` if the summed weight overflows to infinity.
    pub fn from_items(items: &[CartItem]) -> DomainResult<Self> {
        if items.is_empty() {
            return Err(DomainError::EmptyPackage);
        }

        let total_lb: f64 = items.iter().map(CartItem::line_weight_lb).sum();
        let weight = Weight::from_pounds(total_lb)?.billable();

        let dimensions = items
            .iter()
            .filter_map(CartItem::dimensions)
            .reduce(Dimensions::envelope)
            .unwrap_or(Dimensions::DEFAULT_BOX);

        Ok(Self {
            weight,
            dimensions,
            item_count: items.len(),
        })
    }

    /// Returns the billable weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the box dimensions.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns how many cart lines went into the package.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

/// Everything a carrier needs to quote one shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuoteRequest {
    destination: Location,
    package: Package,
}

impl RateQuoteRequest {
    /// Creates a quote request.
    #[must_use]
    pub fn new(destination: Location, package: Package) -> Self {
        Self {
            destination,
            package,
        }
    }

    /// Returns the destination.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &Location {
        &self.destination
    }

    /// Returns the package.
    #[inline]
    #[must_use]
    pub fn package(&self) -> &Package {
        &self.package
    }
}
