//! # Weights and Dimensions
//!
//! Physical measures of a package, in pounds and inches.

use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use std::fmt;

/// A package weight in pounds.
///
/// Billable weights are never lighter than [`Weight::MIN_BILLABLE_LB`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// Lightest weight a carrier will quote, in pounds.
    pub const MIN_BILLABLE_LB: f64 = 0.1;

    /// Creates a weight in pounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeight` if the value is negative or not finite.
    pub fn from_pounds(pounds: f64) -> DomainResult<Self> {
        if !pounds.is_finite() || pounds < 0.0 {
            return Err(DomainError::InvalidWeight(format!(
                "weight must be a non-negative number of pounds, got {pounds}"
            )));
        }
        Ok(Self(pounds))
    }

    /// Returns the weight in pounds.
    #[inline]
    #[must_use]
    pub fn pounds(self) -> f64 {
        self.0
    }

    /// Returns this weight raised to the billable minimum.
    #[must_use]
    pub fn billable(self) -> Self {
        Self(self.0.max(Self::MIN_BILLABLE_LB))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb", self.0)
    }
}

/// Package dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Length in inches.
    pub length: f64,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl Dimensions {
    /// Box used when no item carries its own dimensions: 12 x 12 x 6 in.
    pub const DEFAULT_BOX: Self = Self {
        length: 12.0,
        width: 12.0,
        height: 6.0,
    };

    /// Creates validated dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDimensions` if any side is non-positive or not finite.
    pub fn new(length: f64, width: f64, height: f64) -> DomainResult<Self> {
        for (name, value) in [("length", length), ("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::InvalidDimensions(format!(
                    "{name} must be a positive number of inches, got {value}"
                )));
            }
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    /// Returns the component-wise maximum of two boxes.
    #[must_use]
    pub fn envelope(self, other: Self) -> Self {
        Self {
            length: self.length.max(other.length),
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::DEFAULT_BOX
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} in", self.length, self.width, self.height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn weight_rejects_negative_and_nan() {
        assert!(Weight::from_pounds(-0.5).is_err());
        assert!(Weight::from_pounds(f64::NAN).is_err());
        assert!(Weight::from_pounds(f64::INFINITY).is_err());
        assert!(Weight::from_pounds(0.0).is_ok());
    }

    #[test]
    fn billable_weight_is_clamped() {
        let w = Weight::from_pounds(0.0).unwrap().billable();
        assert!((w.pounds() - 0.1).abs() < f64::EPSILON);

        let w = Weight::from_pounds(3.25).unwrap().billable();
        assert!((w.pounds() - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn dimensions_reject_non_positive_sides() {
        let err = Dimensions::new(10.0, 0.0, 4.0).unwrap_err();
        assert!(err.to_string().contains("width"));
        assert!(Dimensions::new(10.0, 5.0, -1.0).is_err());
        assert!(Dimensions::new(10.0, 5.0, 4.0).is_ok());
    }

    #[test]
    fn envelope_takes_largest_side() {
        let a = Dimensions::new(10.0, 2.0, 8.0).unwrap();
        let b = Dimensions::new(4.0, 9.0, 3.0).unwrap();
        assert_eq!(a.envelope(b), Dimensions::new(10.0, 9.0, 8.0).unwrap());
    }

    #[test]
    fn default_box_is_twelve_by_twelve_by_six() {
        let d = Dimensions::default();
        assert_eq!(d.to_string(), "12x12x6 in");
    }
}
