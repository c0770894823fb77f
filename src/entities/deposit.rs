// 🏦 Deposit Entity - time-bound, multi-tranche, interest-bearing
//
// Lifecycle: OPEN ──close_deposit(date ≥ close_date)──▶ CLOSED (terminal)
//
// - Opening withdraws the first tranche from the connected account
// - Extra tranches may be added while open, each with its own rate
// - The term is fixed at open time; later tranches accrue only for the
//   part of the term their funds actually sat in the deposit
// - Closing pays principal + interest back to the connected account once

use crate::entities::account::AccountHandle;
use crate::entities::customer::CustomerId;
use crate::error::{BankError, Result};
use crate::interest::{
    total_accrued_interest, whole_months_between, DurationDetails, InterestPolicy,
};
use crate::money::{Money, RoundingPolicy};
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

// ============================================================================
// DEPOSIT ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositId(Uuid);

impl DepositId {
    pub fn new() -> Self {
        DepositId(Uuid::new_v4())
    }
}

impl Default for DepositId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DepositId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// TRANCHE
// ============================================================================

/// One funding contribution, frozen with the policy in effect when it came in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tranche {
    amount: Money,
    contributed_on: NaiveDate,
    policy: InterestPolicy,
}

impl Tranche {
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn contributed_on(&self) -> NaiveDate {
        self.contributed_on
    }

    pub fn policy(&self) -> InterestPolicy {
        self.policy
    }
}

// ============================================================================
// DEPOSIT STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositState {
    Open,

    Closed {
        closed_on: NaiveDate,
        /// Amount credited to the connected account
        payout: Money,
    },
}

// ============================================================================
// DEPOSIT ENTITY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Deposit {
    id: DepositId,

    /// Where the funds came from and where the payout goes (not owned)
    connected_account: AccountHandle,

    open_date: NaiveDate,
    duration: DurationDetails,

    /// Insertion order matters for `interest_rates`
    tranches: Vec<Tranche>,

    state: DepositState,
    rounding: RoundingPolicy,
}

impl Deposit {
    /// Open a deposit by withdrawing `amount` from `account`.
    ///
    /// Any funding failure comes back as `CannotOpenDeposit` with the
    /// original error attached, and the account is left untouched.
    pub fn open(
        account: &AccountHandle,
        amount: Money,
        open_date: NaiveDate,
        duration: DurationDetails,
        policy: InterestPolicy,
    ) -> Result<Deposit> {
        let funding = if amount.is_zero() {
            Err(BankError::InvalidAmount(amount))
        } else {
            account.withdraw(amount)
        };

        if let Err(cause) = funding {
            return Err(BankError::CannotOpenDeposit {
                amount,
                source: Box::new(cause),
            });
        }

        let deposit = Deposit {
            id: DepositId::new(),
            connected_account: account.clone(),
            open_date,
            duration,
            tranches: vec![Tranche {
                amount,
                contributed_on: open_date,
                policy,
            }],
            state: DepositState::Open,
            rounding: RoundingPolicy::default(),
        };

        info!(
            deposit = %deposit.id,
            account = %account.id(),
            %amount,
            rate = %policy.yearly_rate(),
            months = duration.length,
            "deposit opened"
        );
        Ok(deposit)
    }

    /// Use a different rounding policy for the payout
    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn id(&self) -> DepositId {
        self.id
    }

    pub fn connected_account(&self) -> &AccountHandle {
        &self.connected_account
    }

    /// Owner of the deposit is the owner of its connected account
    pub fn owner(&self) -> CustomerId {
        self.connected_account.owner()
    }

    pub fn open_date(&self) -> NaiveDate {
        self.open_date
    }

    pub fn duration(&self) -> DurationDetails {
        self.duration
    }

    pub fn state(&self) -> DepositState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DepositState::Open
    }

    pub fn tranches(&self) -> &[Tranche] {
        &self.tranches
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Sum of tranche amounts while open, zero once closed
    pub fn balance(&self) -> Money {
        match self.state {
            DepositState::Open => self.tranches.iter().map(Tranche::amount).sum(),
            DepositState::Closed { .. } => Money::ZERO,
        }
    }

    /// End of the term: open date + duration, fixed at open time
    pub fn close_date(&self) -> NaiveDate {
        self.duration.end_date(self.open_date)
    }

    /// Yearly rate of every tranche, in the order the tranches were added
    pub fn interest_rates(&self) -> Vec<Decimal> {
        self.tranches.iter().map(|t| t.policy.yearly_rate()).collect()
    }

    /// Add new funds to an open deposit.
    ///
    /// The funds are supplied directly; nothing is withdrawn from the
    /// connected account. No proration happens here.
    pub fn add_payment(
        &mut self,
        amount: Money,
        contributed_on: NaiveDate,
        policy: InterestPolicy,
    ) -> Result<()> {
        if !self.is_open() {
            return Err(BankError::DepositClosed(self.id));
        }
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }

        self.tranches.push(Tranche {
            amount,
            contributed_on,
            policy,
        });

        debug!(
            deposit = %self.id,
            %amount,
            %contributed_on,
            rate = %policy.yearly_rate(),
            tranches = self.tranches.len(),
            "tranche added"
        );
        Ok(())
    }

    /// Whole months a tranche accrues for.
    ///
    /// The window starts when the funds arrived (never before the open date)
    /// and ends at the deposit's original close date.
    pub fn accrual_months(&self, tranche: &Tranche) -> u32 {
        let start = tranche.contributed_on.max(self.open_date);
        whole_months_between(start, self.close_date())
    }

    /// Exact interest across all tranches, unrounded
    pub fn accrued_interest(&self) -> Money {
        total_accrued_interest(
            self.tranches
                .iter()
                .map(|t| (t.policy, t.amount, self.accrual_months(t))),
        )
    }

    /// What a successful close would credit: principal + interest, rounded
    /// once with the deposit's rounding policy
    pub fn payout(&self) -> Money {
        (self.balance() + self.accrued_interest()).round(&self.rounding)
    }

    /// Close the deposit on `date` and credit the payout to the connected
    /// account. Returns the amount credited.
    pub fn close_deposit(&mut self, date: NaiveDate) -> Result<Money> {
        if !self.is_open() {
            return Err(BankError::AlreadyClosed(self.id));
        }

        let close_date = self.close_date();
        if date < close_date {
            return Err(BankError::TooEarly {
                deposit: self.id,
                date,
                close_date,
            });
        }

        let payout = self.payout();
        self.connected_account.deposit(payout)?;
        self.state = DepositState::Closed {
            closed_on: date,
            payout,
        };

        info!(
            deposit = %self.id,
            account = %self.connected_account.id(),
            %payout,
            %date,
            "deposit closed"
        );
        Ok(payout)
    }
}

impl PartialEq for Deposit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Deposit {}

impl Hash for Deposit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// DEPOSIT HANDLE
// ============================================================================

/// Shared, lockable reference to a registered deposit.
///
/// Lock order is deposit first, then its account; nothing locks an account
/// and then a deposit.
#[derive(Clone)]
pub struct DepositHandle {
    id: DepositId,
    owner: CustomerId,
    inner: Arc<Mutex<Deposit>>,
}

impl DepositHandle {
    pub fn new(deposit: Deposit) -> Self {
        DepositHandle {
            id: deposit.id,
            owner: deposit.owner(),
            inner: Arc::new(Mutex::new(deposit)),
        }
    }

    pub fn id(&self) -> DepositId {
        self.id
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn balance(&self) -> Money {
        self.inner.lock().balance()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open()
    }

    pub fn close_date(&self) -> NaiveDate {
        self.inner.lock().close_date()
    }

    pub fn interest_rates(&self) -> Vec<Decimal> {
        self.inner.lock().interest_rates()
    }

    pub fn snapshot(&self) -> Deposit {
        self.inner.lock().clone()
    }

    pub fn add_payment(
        &self,
        amount: Money,
        contributed_on: NaiveDate,
        policy: InterestPolicy,
    ) -> Result<()> {
        self.inner.lock().add_payment(amount, contributed_on, policy)
    }

    pub fn close_deposit(&self, date: NaiveDate) -> Result<Money> {
        self.inner.lock().close_deposit(date)
    }
}

impl PartialEq for DepositHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DepositHandle {}

impl Hash for DepositHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for DepositHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepositHandle")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
