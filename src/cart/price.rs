//! Exact money amounts.
//!
//! Prices are held in minor units so that `total == Σ price` holds exactly
//! after any sequence of additions and removals. On the wire they are plain
//! JSON numbers in major units (`10`, `19.99`).

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINOR_PER_MAJOR: u64 = 100;
// Largest major amount accepted from a float without losing cent precision.
const MAX_MAJOR: f64 = 1e13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price '{input}' is not a number")]
    NotANumber { input: String },

    #[error("price must not be negative")]
    Negative,

    #[error("price has more than two decimal places")]
    TooPrecise,

    #[error("price is too large")]
    TooLarge,
}

/// Non-negative amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_major(units: u64) -> Self {
        Self(units.saturating_mul(MINOR_PER_MAJOR))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Price) -> Price {
        Price(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse decimal text such as `10`, `10.5` or `$0.99`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let not_a_number = || PriceError::NotANumber {
            input: s.to_string(),
        };
        if text.starts_with('-') {
            return Err(PriceError::Negative);
        }
        let text = text.strip_prefix('$').unwrap_or(text);

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(not_a_number());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(not_a_number());
        }
        if fraction.len() > 2 {
            return Err(PriceError::TooPrecise);
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceError::TooLarge)?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| not_a_number())? * 10,
            _ => fraction.parse().map_err(|_| not_a_number())?,
        };

        whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Price)
            .ok_or(PriceError::TooLarge)
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber {
                input: value.to_string(),
            });
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        if value > MAX_MAJOR {
            return Err(PriceError::TooLarge);
        }
        let scaled = value * MINOR_PER_MAJOR as f64;
        let cents = scaled.round();
        if (scaled - cents).abs() > 1e-6 {
            return Err(PriceError::TooPrecise);
        }
        Ok(Price(cents as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0 as f64 / MINOR_PER_MAJOR as f64
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_text() {
        assert_eq!("10".parse::<Price>().unwrap(), Price::from_cents(1000));
        assert_eq!("10.5".parse::<Price>().unwrap(), Price::from_cents(1050));
        assert_eq!("$0.99".parse::<Price>().unwrap(), Price::from_cents(99));
        assert_eq!(".5".parse::<Price>().unwrap(), Price::from_cents(50));
    }

    #[test]
    fn rejects_bad_text() {
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
        assert_eq!("1.999".parse::<Price>(), Err(PriceError::TooPrecise));
        assert!(matches!(
            "ten".parse::<Price>(),
            Err(PriceError::NotANumber { .. })
        ));
        assert!(matches!(
            ".".parse::<Price>(),
            Err(PriceError::NotANumber { .. })
        ));
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Price::from_cents(2005).to_string(), "20.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }

    #[test]
    fn float_conversion() {
        assert_eq!(Price::try_from(19.99).unwrap(), Price::from_cents(1999));
        assert_eq!(Price::try_from(-0.5), Err(PriceError::Negative));
        assert_eq!(Price::try_from(0.001), Err(PriceError::TooPrecise));
        assert!(Price::try_from(f64::NAN).is_err());
        assert_eq!(f64::from(Price::from_cents(1050)), 10.5);
    }

    #[test]
    fn subtraction_saturates_at_zero() {
        let price = Price::from_major(1).saturating_sub(Price::from_major(2));
        assert_eq!(price, Price::ZERO);
    }
}
