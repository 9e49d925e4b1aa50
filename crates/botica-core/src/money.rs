//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing quotation lines as floats:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Wire value 10.5 ──► 1050 cents (rounded once, at the boundary)       │
//! │    Every subtotal and total is integer math from then on                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use botica_core::money::Money;
//!
//! let price = Money::from_major(10.5).unwrap(); // 10.50
//! assert_eq!(price.cents(), 1050);
//!
//! let line = price.multiply_quantity(2.0).unwrap();
//! assert_eq!(line.cents(), 2100);
//! assert_eq!(line.to_major(), 21.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.purchase_price_cents / sale_price_cents                       │
/// │                                                                         │
/// │  QuotationLine.unit_price ──► × quantity ──► subtotal ──► Σ total       │
/// │                                                                         │
/// │  HTTP wire format: decimal major units (10.5), converted at the edge   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` for
    /// NaN, infinities and amounts that do not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(10.5).unwrap().cents(), 1050);
    /// assert_eq!(Money::from_major(0.005).unwrap().cents(), 1);
    /// assert!(Money::from_major(f64::NAN).is_none());
    /// ```
    pub fn from_major(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        Self::from_cents_f64((amount * 100.0).round())
    }

    /// `i64::MAX as f64` rounds up to 2^63, which is already out of range,
    /// hence the `>=`.
    fn from_cents_f64(cents: f64) -> Option<Self> {
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units, for the JSON wire format only.
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a (possibly fractional) quantity.
    ///
    /// The product is rounded half away from zero to the nearest cent, so
    /// 2.5 liters at 3.33 is 8.33 (832.5 cents → 833). Returns `None` when
    /// the result does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3.0).unwrap().cents(), 897);
    /// assert_eq!(Money::from_cents(333).multiply_quantity(2.5).unwrap().cents(), 833);
    /// assert!(Money::from_cents(100_000).multiply_quantity(1e17).is_none());
    /// ```
    pub fn multiply_quantity(&self, qty: f64) -> Option<Money> {
        Self::from_cents_f64((self.0 as f64 * qty).round())
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal amount ("21.00"); currency symbols are a
/// frontend concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_rounds_to_cents() {
        assert_eq!(Money::from_major(10.5).unwrap().cents(), 1050);
        assert_eq!(Money::from_major(0.1).unwrap().cents(), 10);
        assert_eq!(Money::from_major(19.999).unwrap().cents(), 2000);
        assert_eq!(Money::from_major(-2.5).unwrap().cents(), -250);
        assert_eq!(Money::from_major(0.0).unwrap(), Money::zero());
    }

    #[test]
    fn test_from_major_rejects_non_finite() {
        assert!(Money::from_major(f64::NAN).is_none());
        assert!(Money::from_major(f64::INFINITY).is_none());
        assert!(Money::from_major(1e300).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    /// 0.1 + 0.2 must be exactly 0.30 once it goes through cents.
    #[test]
    fn test_no_float_drift() {
        let total = Money::from_major(0.1)
            .zip(Money::from_major(0.2))
            .and_then(|(a, b)| a.checked_add(b))
            .unwrap();
        assert_eq!(total.cents(), 30);
        assert_eq!(total.to_major(), 0.3);
    }

    #[test]
    fn test_multiply_fractional_quantity() {
        assert_eq!(Money::from_cents(1050).multiply_quantity(2.0).unwrap().cents(), 2100);
        assert_eq!(Money::from_cents(100).multiply_quantity(0.25).unwrap().cents(), 25);
        assert_eq!(Money::zero().multiply_quantity(12.0), Some(Money::zero()));
    }

    #[test]
    fn test_multiply_out_of_range() {
        assert!(Money::from_cents(100_000).multiply_quantity(1e17).is_none());
        assert!(Money::from_cents(1).multiply_quantity(f64::MAX).is_none());
        // Zero price never overflows, whatever the quantity
        assert_eq!(Money::zero().multiply_quantity(1e300), Some(Money::zero()));
    }
}
