// 💳 Account Entity - customer-owned balance
//
// "Balance is a VALUE (changes), Account id is IDENTITY (never changes)"
//
// - Equality and hashing use the id only, never the balance
// - withdraw is the single guard against negative balances
// - Accounts are shared through `AccountHandle` so a deposit can pay back
//   into the very account it was funded from

use crate::entities::customer::{Customer, CustomerId};
use crate::error::{BankError, Result};
use crate::money::Money;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

// ============================================================================
// ACCOUNT ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        AccountId(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable identity - NEVER changes
    id: AccountId,

    owner: CustomerId,

    /// Never negative
    balance: Money,
}

impl Account {
    /// Open a new, empty account for `owner`
    pub fn new(owner: &Customer) -> Self {
        Account {
            id: AccountId::new(),
            owner: owner.id(),
            balance: Money::ZERO,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        self.balance = self.balance.add(amount);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        if amount.is_negative() {
            return Err(BankError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance = self.balance.subtract(amount);
        Ok(())
    }

    /// Move `amount` to `target`. Nothing is deposited unless the withdrawal
    /// succeeded.
    pub fn transfer(&mut self, target: &mut Account, amount: Money) -> Result<()> {
        self.withdraw(amount)?;
        target.deposit(amount)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// ACCOUNT HANDLE
// ============================================================================

/// Shared, lockable reference to an account held by the registry.
///
/// Cloning the handle clones the reference, not the account. Id and owner
/// never change, so they are readable without taking the lock.
#[derive(Clone)]
pub struct AccountHandle {
    id: AccountId,
    owner: CustomerId,
    inner: Arc<Mutex<Account>>,
}

impl AccountHandle {
    pub fn new(account: Account) -> Self {
        AccountHandle {
            id: account.id,
            owner: account.owner,
            inner: Arc::new(Mutex::new(account)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    pub fn balance(&self) -> Money {
        self.inner.lock().balance
    }

    /// Copy of the account as it is right now
    pub fn snapshot(&self) -> Account {
        self.inner.lock().clone()
    }

    pub fn deposit(&self, amount: Money) -> Result<()> {
        self.inner.lock().deposit(amount)
    }

    pub fn withdraw(&self, amount: Money) -> Result<()> {
        self.inner.lock().withdraw(amount)
    }

    /// Transfer to another account, holding both locks for the whole move.
    ///
    /// Locks are taken in account-id order so two opposite transfers cannot
    /// deadlock.
    pub fn transfer(&self, target: &AccountHandle, amount: Money) -> Result<()> {
        if self.id == target.id {
            let mut account = self.inner.lock();
            account.withdraw(amount)?;
            return account.deposit(amount);
        }

        let (mut source, mut destination) = if self.id < target.id {
            let source = self.inner.lock();
            (source, target.inner.lock())
        } else {
            let destination = target.inner.lock();
            (self.inner.lock(), destination)
        };

        source.transfer(&mut destination, amount)?;
        debug!(from = %self.id, to = %target.id, %amount, "transfer completed");
        Ok(())
    }
}

impl PartialEq for AccountHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AccountHandle {}

impl Hash for AccountHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountHandle")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
