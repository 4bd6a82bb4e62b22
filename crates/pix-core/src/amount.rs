//! # Amount Module
//!
//! Provides the `Amount` type for the transaction amount (EMV tag `54`).
//!
//! ## Why Integer Centavos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  1.005 as f64 is really 1.00499999999999989...                         │
//! │  Rounding that binary value to 2 places gives 1.00  ❌                 │
//! │                                                                         │
//! │  OUR SOLUTION: read the input as an exact decimal, round once,         │
//! │  keep integer centavos from then on                                    │
//! │    "1.005" → 1.005 → round half away from zero → 101 centavos          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Inputs are rounded to 2 fraction digits with **round half away from
//! zero**. Only non-negative amounts are accepted, so this is the familiar
//! "half up": `1.004 → 1.00`, `1.005 → 1.01`. Floats are first rendered with
//! their shortest round-trip decimal form, so `1.005_f64` rounds like `"1.005"`.
//!
//! ## Usage
//! ```rust
//! use pix_core::amount::Amount;
//!
//! let amount = Amount::parse("10.5").unwrap();
//! assert_eq!(amount.centavos(), 1050);
//! assert_eq!(amount.to_string(), "10.50");
//!
//! assert_eq!(Amount::from_f64(1.005).unwrap().to_string(), "1.01");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PayloadError, PayloadResult};

/// Fraction digits carried by tag `54`.
pub const AMOUNT_SCALE: u32 = 2;

// =============================================================================
// Amount Type
// =============================================================================

/// A non-negative BRL amount in centavos.
///
/// Formats as fixed-point with exactly two fraction digits, `.` as separator
/// and no thousands separator, which is the shape tag `54` requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u64);

impl Amount {
    /// Creates an amount from centavos.
    ///
    /// ```rust
    /// use pix_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_centavos(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: u64) -> Self {
        Amount(centavos)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> u64 {
        self.0
    }

    /// Returns the whole-reais portion.
    #[inline]
    pub const fn reais(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> u64 {
        self.0 % 100
    }

    /// Zero reais.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses a plain decimal string such as `"1"`, `"1.0"` or `"1234.567"`.
    ///
    /// Leading and trailing whitespace is ignored. Signs, exponents and
    /// thousands separators are rejected.
    ///
    /// ```rust
    /// use pix_core::amount::Amount;
    ///
    /// assert_eq!(Amount::parse("1").unwrap().to_string(), "1.00");
    /// assert!(Amount::parse("1,000.00").is_err());
    /// assert!(Amount::parse("-5").is_err());
    /// ```
    pub fn parse(input: &str) -> PayloadResult<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(invalid(input, "must not be empty"));
        }

        if trimmed.starts_with('-') {
            return Err(invalid(input, "must not be negative"));
        }

        if trimmed.contains(',') {
            return Err(invalid(
                input,
                "use '.' as decimal separator and no thousands separator",
            ));
        }

        let well_formed = trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            && trimmed.bytes().filter(|&b| b == b'.').count() <= 1
            && trimmed.bytes().any(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(invalid(input, "is not a decimal number"));
        }

        let value = Decimal::from_str(trimmed).map_err(|e| invalid(input, &e.to_string()))?;
        Self::round(value, input)
    }

    /// Converts a float using its shortest round-trip decimal rendering.
    pub fn from_f64(value: f64) -> PayloadResult<Self> {
        let rendered = value.to_string();
        if !value.is_finite() {
            return Err(invalid(&rendered, "must be a finite number"));
        }
        Self::parse(&rendered)
    }

    /// Converts an exact decimal, rounding to centavos.
    pub fn from_decimal(value: Decimal) -> PayloadResult<Self> {
        Self::round(value, &value.to_string())
    }

    /// Converts a whole number of reais.
    pub fn from_reais(reais: i128) -> PayloadResult<Self> {
        if reais < 0 {
            return Err(invalid(&reais.to_string(), "must not be negative"));
        }
        u64::try_from(reais)
            .ok()
            .and_then(|r| r.checked_mul(100))
            .map(Amount)
            .ok_or_else(|| invalid(&reais.to_string(), "is too large"))
    }

    fn round(value: Decimal, input: &str) -> PayloadResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid(input, "must not be negative"));
        }

        let rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);

        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|centavos| centavos.to_u64())
            .map(Amount)
            .ok_or_else(|| invalid(input, "is too large"))
    }
}

fn invalid(input: &str, reason: &str) -> PayloadError {
    PayloadError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Tag `54` rendering: `"10.50"`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.reais(), self.centavos_part())
    }
}

impl FromStr for Amount {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = PayloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

// =============================================================================
// Amount Input
// =============================================================================

/// Raw amount as handed to the builder's setter.
///
/// Normalization is deferred to `build()` so that setters stay infallible
/// and every error surfaces in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Text(String),
    Float(f64),
    Integer(i128),
    Decimal(Decimal),
    Exact(Amount),
}

impl AmountInput {
    /// Applies the rounding policy and returns the amount in centavos.
    pub fn normalize(&self) -> PayloadResult<Amount> {
        match self {
            AmountInput::Text(text) => Amount::parse(text),
            AmountInput::Float(value) => Amount::from_f64(*value),
            AmountInput::Integer(reais) => Amount::from_reais(*reais),
            AmountInput::Decimal(value) => Amount::from_decimal(*value),
            AmountInput::Exact(amount) => Ok(*amount),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

/// Widening `f32` to `f64` adds binary noise (`1.005f32` becomes
/// `1.00499999523...`), so the `f32` rendering is kept as text instead.
impl From<f32> for AmountInput {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            AmountInput::Text(value.to_string())
        } else {
            AmountInput::Float(f64::from(value))
        }
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        AmountInput::Integer(i128::from(value))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Integer(i128::from(value))
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        AmountInput::Integer(i128::from(value))
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Integer(i128::from(value))
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Decimal(value)
    }
}

impl From<Amount> for AmountInput {
    fn from(value: Amount) -> Self {
        AmountInput::Exact(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
