//! Currency amounts.
//!
//! Prices are held as whole cents so that running totals never drift. The
//! backend speaks decimal strings ("5.00") and JSON numbers (5.0); both are
//! decoded leniently: anything unparseable, negative or non-finite becomes
//! zero rather than an error.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create an amount from whole cents.
    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Convert a floating point dollar amount, rounding to the nearest cent.
    ///
    /// Non-finite or negative values become zero.
    pub fn from_dollars(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Money::ZERO;
        }
        let cents = (value * 100.0).round();
        if cents >= u64::MAX as f64 {
            return Money::ZERO;
        }
        Money(cents as u64)
    }

    /// Parse price text such as `"5.00"`, `"$4.25"` or `" 6 "`.
    ///
    /// Returns `None` for text that is not a finite, non-negative number.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let value: f64 = trimmed.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Money::from_dollars(value))
    }

    /// Parse price text, degrading to zero on failure.
    pub fn parse_lenient(text: &str) -> Self {
        match Money::parse(text) {
            Some(money) => money,
            None => {
                tracing::warn!("unparseable price `{}`, treating as 0.00", text);
                Money::ZERO
            }
        }
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by a line quantity.
    pub fn times(self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    /// The given percentage of this amount, rounded half-up to the cent.
    pub fn percent(self, percent: u32) -> Self {
        Money((self.0.saturating_mul(u64::from(percent)) + 50) / 100)
    }

    /// Two-decimal text without a currency sign, as sent to the backend.
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_decimal_string())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a price as a number or numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Ok(Money::from_dollars(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Ok(Money::from_dollars(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Ok(Money::from_dollars(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Ok(Money::parse_lenient(v))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}
