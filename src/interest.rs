// 📈 Interest Policy - principal, yearly rate, elapsed months → interest
//
// Duration arithmetic is month-granular: a deposit term is a whole number
// of months and interest accrues per whole month elapsed.
//
// interest = principal × rate × months / 1200, multiplied out first and
// divided once at the end.

use crate::money::Money;
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Percent base × months per year
const PERCENT_MONTHS_PER_YEAR: u32 = 100 * MONTHS_PER_YEAR;

// ============================================================================
// INTEREST POLICY
// ============================================================================

/// Yearly interest rate, as a percentage (`10.5` means 10.5% per year).
///
/// Immutable value: a deposit tranche keeps the policy that was in effect
/// when it was funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterestPolicy {
    yearly_rate: Decimal,
}

impl InterestPolicy {
    pub fn new(yearly_rate: Decimal) -> Self {
        InterestPolicy { yearly_rate }
    }

    pub fn yearly_rate(&self) -> Decimal {
        self.yearly_rate
    }

    /// (principal × yearly_rate × elapsed_months) / 1200, unrounded
    pub fn accrued_interest(&self, principal: Money, elapsed_months: u32) -> Money {
        total_accrued_interest([(*self, principal, elapsed_months)])
    }

    fn percent_months(&self, principal: Money, elapsed_months: u32) -> Decimal {
        principal
            .multiply_by_rate(self.yearly_rate * Decimal::from(elapsed_months))
            .amount()
    }
}

/// Interest over several `(policy, principal, elapsed_months)` accruals.
///
/// The products are summed first and the sum is divided once, so the total
/// is exact whenever it has a finite decimal form.
pub fn total_accrued_interest<I>(accruals: I) -> Money
where
    I: IntoIterator<Item = (InterestPolicy, Money, u32)>,
{
    let percent_months: Decimal = accruals
        .into_iter()
        .map(|(policy, principal, months)| policy.percent_months(principal, months))
        .sum();
    Money::new(percent_months / Decimal::from(PERCENT_MONTHS_PER_YEAR))
}

// ============================================================================
// DURATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationUnit {
    Months,
}

/// Total term of a deposit, counted from its open date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurationDetails {
    pub length: u32,

    #[serde(default = "default_unit")]
    pub unit: DurationUnit,
}

fn default_unit() -> DurationUnit {
    DurationUnit::Months
}

impl DurationDetails {
    pub fn months(length: u32) -> Self {
        DurationDetails {
            length,
            unit: DurationUnit::Months,
        }
    }

    /// Date the term ends when started on `start`.
    ///
    /// Month-end dates clamp (Jan 31 + 1 month = Feb 28/29), as chrono does.
    pub fn end_date(&self, start: NaiveDate) -> NaiveDate {
        match self.unit {
            DurationUnit::Months => add_months(start, self.length),
        }
    }
}

/// `date` + `months`, saturating at chrono's maximum date.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole months from `from` to `to` (0 when `to` is not after `from`).
///
/// A month counts once `add_months(from, n) <= to`, so this is the inverse
/// of the term arithmetic used for close dates.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let rough = (year_months(to) - year_months(from)).max(0) as u32;
    if add_months(from, rough) > to {
        rough.saturating_sub(1)
    } else {
        rough
    }
}

fn year_months(date: NaiveDate) -> i64 {
    i64::from(date.year()) * i64::from(MONTHS_PER_YEAR) + i64::from(date.month0())
}

// ============================================================================
// TESTS
// ============================================================================
