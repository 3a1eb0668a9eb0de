//! Core value types shared across the workspace.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Kilometres-to-miles factor used for display distances.
const KM_TO_MILES: f64 = 0.621_371;

/// A customer-supplied postal code, validated for shape only.
///
/// The lookup services accept anything between 5 and 9 characters; no
/// further format validation is applied (the geocoding service handles
/// ZIP+4 and non-US codes alike).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validates and wraps a raw postal code.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingPostalCode`] if `raw` is empty.
    /// - [`ValidationError::PostalCodeLength`] if the length is outside
    ///   `5..=9`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::MissingPostalCode);
        }
        let len = raw.chars().count();
        if !(5..=9).contains(&len) {
            return Err(ValidationError::PostalCodeLength { len });
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A geographic point resolved from a postal code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Formats the coordinate as `"<lat>,<lon>"` for the store-lookup
    /// `point` parameter.
    #[must_use]
    pub fn as_point(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A pickup-eligible retail store returned by the store locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Unique store code (the locator's `storeCode`, the inventory
    /// service's `facilityId`).
    pub code: String,
    /// Human-readable store name, shown to the cashier.
    pub name: String,
    /// Raw distance from the search coordinate, in kilometres, as
    /// reported by the locator.
    pub raw_distance: f64,
    /// Whole-mile display distance derived from [`Store::raw_distance`].
    pub distance_miles: u32,
}

impl Store {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, raw_distance: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            raw_distance,
            distance_miles: display_miles(raw_distance),
        }
    }
}

/// Converts a raw kilometre distance to the whole-mile display value:
/// round to two decimal places, convert, floor.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn display_miles(raw_km: f64) -> u32 {
    let rounded = (raw_km * 100.0).round() / 100.0;
    (rounded * KM_TO_MILES).floor().max(0.0) as u32
}

/// One line of demand: a SKU and the quantity a store must be able to
/// promise for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandLine {
    pub sku: String,
    pub quantity: u32,
}

impl DemandLine {
    #[must_use]
    pub fn new(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_code_accepts_five_to_nine_chars() {
        for raw in ["10001", "100011234", "SW1A1AA"] {
            assert!(PostalCode::parse(raw).is_ok(), "expected Ok for {raw:?}");
        }
    }

    #[test]
    fn postal_code_rejects_empty() {
        assert_eq!(
            PostalCode::parse(""),
            Err(ValidationError::MissingPostalCode)
        );
    }

    #[test]
    fn postal_code_rejects_out_of_range_lengths() {
        assert_eq!(
            PostalCode::parse("1234"),
            Err(ValidationError::PostalCodeLength { len: 4 })
        );
        assert_eq!(
            PostalCode::parse("1234567890"),
            Err(ValidationError::PostalCodeLength { len: 10 })
        );
    }

    #[test]
    fn display_miles_floors_after_conversion() {
        // 8.05 km -> 5.002... miles -> 5
        assert_eq!(display_miles(8.05), 5);
        // 1.60 km -> 0.994 miles -> 0
        assert_eq!(display_miles(1.60), 0);
        assert_eq!(display_miles(0.0), 0);
    }

    #[test]
    fn display_miles_rounds_raw_to_two_decimals_first() {
        // 1.609344 rounds to 1.61 before converting: 1.61 * 0.621371 = 1.0004 -> 1
        assert_eq!(display_miles(1.609_344), 1);
    }

    #[test]
    fn postal_code_serializes_as_a_bare_string() {
        let code = PostalCode::parse("10001").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""10001""#);

        let parsed: PostalCode = serde_json::from_str(r#""100011234""#).unwrap();
        assert_eq!(parsed.as_str(), "100011234");
    }

    #[test]
    fn coordinate_as_point_matches_lookup_format() {
        let c = Coordinate {
            latitude: 40.75,
            longitude: -73.99,
        };
        assert_eq!(c.as_point(), "40.75,-73.99");
    }
}
