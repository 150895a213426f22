//! # Money Module
//!
//! Provides the `Money` type for handling prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64 prices:                                                       │
//! │    2 × 4.99 = 9.98 (often printed as 9.9800000000000004)  ❌            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2 × 499 cents = 998 cents, exactly                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use scoop_core::money::Money;
//!
//! let price = Money::from_cents(499); // $4.99
//! let line_total = price.checked_multiply_quantity(2);
//! assert_eq!(line_total, Some(Money::from_cents(998)));
//!
//! let parsed: Money = "3.99".parse().unwrap();
//! assert_eq!(parsed, Money::from_cents(399));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that a caller can represent whatever the catalog holds; prices
/// are non-negative by convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// let price = Money::from_cents(399); // $3.99
    /// assert_eq!(price.cents(), 399);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(4, 99).cents(), 499);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts only the major unit carries the sign.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` if the product leaves i64.
    ///
    /// ## Example
    /// ```rust
    /// use scoop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(399); // Classic Vanilla
    /// assert_eq!(unit_price.checked_multiply_quantity(2), Some(Money::from_cents(798)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX / 100), None);
    /// ```
    ///
    /// ## Cart Workflow
    /// ```text
    /// Flavor: Classic Vanilla $3.99
    /// Cart quantity: 2
    ///      │
    ///      ▼
    /// checked_multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// total_price: $7.98
    /// ```
    ///
    /// Cart quantities are stored unchecked, so the product is checked here.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as "$3.99" (debugging and logs).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Parses a decimal amount such as "3.99", "4", "4.5" or "-1.25".
///
/// At most two fractional digits are accepted; nothing is rounded.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || CoreError::InvalidMoney(raw.to_string());

        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (major, minor) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid());
        }
        if minor.len() > 2
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(499);
        assert_eq!(money.cents(), 499);
        assert_eq!(money.dollars(), 4);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(399)), "$3.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(399);
        let b = Money::from_cents(499);

        assert_eq!((a + b).cents(), 898);

        let mut running = Money::zero();
        running += a;
        running += b;
        assert_eq!(running.cents(), 898);
    }

    /// 2 × 4.99 in f64 is not exactly 9.98; in cents it is.
    #[test]
    fn test_multiply_quantity_is_exact() {
        let strawberry = Money::from_cents(499);
        assert_eq!(strawberry.checked_multiply_quantity(2), Some(Money::from_cents(998)));
        assert_eq!(strawberry.checked_multiply_quantity(0), Some(Money::zero()));
        assert_eq!(
            strawberry.checked_multiply_quantity(-1),
            Some(Money::from_cents(-499))
        );
    }

    #[test]
    fn test_multiply_quantity_overflow_is_none() {
        let vanilla = Money::from_cents(399);
        assert_eq!(vanilla.checked_multiply_quantity(i64::MAX / 100), None);
        assert_eq!(vanilla.checked_multiply_quantity(i64::MIN), None);
        assert_eq!(
            Money::from_cents(1).checked_multiply_quantity(i64::MAX),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn test_parse_decimal_amounts() {
        assert_eq!("3.99".parse::<Money>().unwrap().cents(), 399);
        assert_eq!("4".parse::<Money>().unwrap().cents(), 400);
        assert_eq!("4.5".parse::<Money>().unwrap().cents(), 450);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
        assert_eq!(" 0.00 ".parse::<Money>().unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rejects_malformed_amounts() {
        for bad in ["", "-", ".", "3.999", "3.9x", "abc", "1.2.3", "$3.99"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
        assert_eq!(
            "3.999".parse::<Money>(),
            Err(CoreError::InvalidMoney("3.999".to_string()))
        );
    }

    #[test]
    fn test_parse_overflow() {
        assert!("92233720368547758.08".parse::<Money>().is_err());
    }
}
