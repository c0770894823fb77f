// 💰 Money - Exact decimal amounts
//
// Every balance, tranche and interest figure in the bank flows through this
// type. It wraps `rust_decimal::Decimal`, so rate × principal × time-fraction
// chains stay exact until a payout is explicitly rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

// ============================================================================
// MONEY
// ============================================================================

/// An exact decimal amount of money (single currency).
///
/// Negative values are representable so that callers can validate input;
/// accounts and deposits refuse to store them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Build from an integer number of currency units (e.g. `Money::from_units(100)` = 100.00)
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn add(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    /// Subtract without any floor; the caller guards against going below zero.
    pub fn subtract(&self, other: Money) -> Money {
        Money(self.0 - other.0)
    }

    /// Multiply by a plain decimal factor. The result is exact, not rounded.
    pub fn multiply_by_rate(&self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round according to a rounding policy.
    pub fn round(&self, policy: &RoundingPolicy) -> Money {
        Money(self.0.round_dp_with_strategy(policy.scale, policy.mode.strategy()))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ROUNDING POLICY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Banker's rounding: ties go to the even digit (207.625 → 207.62)
    HalfEven,

    /// Ties go away from zero (207.625 → 207.63)
    HalfUp,

    /// Drop extra digits
    Truncate,
}

impl RoundingMode {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Truncate => RoundingStrategy::ToZero,
        }
    }
}

/// How deposit payouts are rounded before they land on an account.
///
/// Interest is accumulated exactly across all tranches and the rounding is
/// applied once, to the total payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    #[serde(default = "default_scale")]
    pub scale: u32,

    #[serde(default = "default_mode")]
    pub mode: RoundingMode,
}

fn default_scale() -> u32 {
    2
}

fn default_mode() -> RoundingMode {
    RoundingMode::HalfEven
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        RoundingPolicy {
            scale: default_scale(),
            mode: default_mode(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
