//! Provides a safe, self-contained type for USD storefront prices.

use std::fmt;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Sub;

use num_traits::CheckedAdd;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

/// An error that can occur when parsing a string into a `UsdPrice`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseUsdPriceError {
    /// The string is not in a valid numeric format (e.g., "abc", "1.2.3").
    #[error("invalid price format")]
    InvalidFormat,
    /// The string has more than two decimal places (e.g., "1.234").
    #[error("too many decimal places")]
    TooManyDecimals,
}

/// A USD amount, such as the price of one million GP.
///
/// Internally the value is stored as signed 64-bit cents to keep display
/// math exact. On the wire it is a plain JSON number of dollars, matching
/// payloads like `{ "our_price": 10.5 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UsdPrice {
    cents: i64,
}

impl UsdPrice {
    // --- Getters ---

    /// Returns the raw amount in cents.
    pub fn as_cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as floating-point dollars, for ratio math only.
    pub fn as_dollars(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    // --- Constructors ---

    /// Creates a `UsdPrice` from a floating-point dollar value, typically
    /// one arriving from an API payload, rounding to the nearest cent.
    pub fn from_float(value: f64) -> Self {
        Self {
            cents: (value * 100.0).round() as i64,
        }
    }

    /// Creates a `UsdPrice` directly from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Parses a plain decimal string ("10.50", "-0.5", "12") into a price.
    pub fn from_str_exact(s: &str) -> Result<Self, ParseUsdPriceError> {
        let (is_negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let mut parts = s.split('.');
        let major_str = parts.next().unwrap_or("");
        let minor_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (major_str.is_empty() && minor_str.is_empty()) {
            return Err(ParseUsdPriceError::InvalidFormat);
        }
        if minor_str.len() > 2 {
            return Err(ParseUsdPriceError::TooManyDecimals);
        }

        let major = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse::<i64>()
                .map_err(|_| ParseUsdPriceError::InvalidFormat)?
        };
        let minor = if minor_str.is_empty() {
            0
        } else {
            minor_str
                .parse::<i64>()
                .map_err(|_| ParseUsdPriceError::InvalidFormat)?
        };
        let scaled_minor = minor * 10_i64.pow(2 - minor_str.len() as u32);

        let mut cents = major
            .checked_mul(100)
            .ok_or(ParseUsdPriceError::InvalidFormat)?
            .checked_add(scaled_minor)
            .ok_or(ParseUsdPriceError::InvalidFormat)?;
        if is_negative {
            cents = -cents;
        }

        Ok(Self::from_cents(cents))
    }

    // --- Arithmetic ---

    /// Scales the price by a whole quantity (e.g., millions of GP),
    /// saturating at the representable bounds.
    pub fn scale(self, quantity: u64) -> Self {
        let qty = i64::try_from(quantity).unwrap_or(i64::MAX);
        Self {
            cents: self.cents.saturating_mul(qty),
        }
    }

    // --- Display ---

    /// Formats the amount with a dollar sign (e.g., "$25.34").
    pub fn to_string_with_symbol(&self) -> String {
        format!("${}", self)
    }
}

/// Formats the price as a plain numeric string with exactly two decimals,
/// sign-correct for values between -1 and 0 (e.g., "-0.50").
impl fmt::Display for UsdPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for UsdPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for UsdPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Ok(Self::from_float(dollars))
    }
}

impl Add for UsdPrice {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            cents: self.cents + rhs.cents,
        }
    }
}

impl AddAssign for UsdPrice {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl Sub for UsdPrice {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            cents: self.cents - rhs.cents,
        }
    }
}

/// Implements checked addition. Returns `None` on overflow.
impl CheckedAdd for UsdPrice {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.cents.checked_add(v.cents).map(|cents| Self { cents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_float_rounds_to_nearest_cent() {
        assert_eq!(UsdPrice::from_float(123.456).as_cents(), 12346);
        assert_eq!(UsdPrice::from_float(0.204).as_cents(), 20);
        assert_eq!(UsdPrice::from_float(10.5).as_cents(), 1050);
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(UsdPrice::from_cents(1050).to_string(), "10.50");
        assert_eq!(UsdPrice::from_cents(5).to_string(), "0.05");
        assert_eq!(UsdPrice::default().to_string(), "0.00");
    }

    #[test]
    fn display_is_sign_correct_below_one_dollar() {
        assert_eq!(UsdPrice::from_cents(-50).to_string(), "-0.50");
        assert_eq!(UsdPrice::from_cents(-1050).to_string(), "-10.50");
    }

    #[test]
    fn symbol_form() {
        assert_eq!(UsdPrice::from_cents(2534).to_string_with_symbol(), "$25.34");
        assert_eq!(UsdPrice::from_cents(-500).to_string_with_symbol(), "$-5.00");
    }

    #[test]
    fn parses_exact_strings() {
        assert_eq!(
            UsdPrice::from_str_exact("10.50"),
            Ok(UsdPrice::from_cents(1050))
        );
        assert_eq!(UsdPrice::from_str_exact("-0.5"), Ok(UsdPrice::from_cents(-50)));
        assert_eq!(UsdPrice::from_str_exact("12"), Ok(UsdPrice::from_cents(1200)));
        assert_eq!(
            UsdPrice::from_str_exact("1.234"),
            Err(ParseUsdPriceError::TooManyDecimals)
        );
        assert_eq!(
            UsdPrice::from_str_exact("1.2.3"),
            Err(ParseUsdPriceError::InvalidFormat)
        );
        assert_eq!(
            UsdPrice::from_str_exact(""),
            Err(ParseUsdPriceError::InvalidFormat)
        );
    }

    #[test]
    fn scale_by_quantity() {
        assert_eq!(UsdPrice::from_cents(25).scale(100).as_cents(), 2500);
        assert_eq!(UsdPrice::from_cents(-5).scale(100).as_cents(), -500);
    }

    #[test]
    fn serde_round_trips_as_dollars() {
        let price = UsdPrice::from_cents(1050);
        assert_eq!(serde_json::to_string(&price).unwrap(), "10.5");
        let back: UsdPrice = serde_json::from_str("10.5").unwrap();
        assert_eq!(back, price);
    }
}
