// ⚠️ Bank Errors - one enum for every way a banking operation can be refused
//
// Every failure aborts the triggering operation before any state changes.

use crate::entities::{AccountId, DepositId};
use crate::money::Money;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Negative amount passed to deposit/withdraw/open/add-tranche
    #[error("invalid amount: {0} (amounts must not be negative)")]
    InvalidAmount(Money),

    /// Withdrawal or deposit funding exceeds the available balance
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// The funding withdrawal for a new deposit failed
    #[error("cannot open deposit with initial balance {amount}")]
    CannotOpenDeposit {
        amount: Money,
        #[source]
        source: Box<BankError>,
    },

    #[error("account {0} is not owned by the acting customer")]
    UnauthorizedAccount(AccountId),

    #[error("deposit {0} is not owned by the acting customer")]
    UnauthorizedDeposit(DepositId),

    /// Mutation attempted on a closed deposit
    #[error("deposit {0} is closed")]
    DepositClosed(DepositId),

    #[error("deposit {0} is already closed")]
    AlreadyClosed(DepositId),

    #[error("cannot close deposit {deposit} on {date}: term ends on {close_date}")]
    TooEarly {
        deposit: DepositId,
        date: NaiveDate,
        close_date: NaiveDate,
    },

    #[error("no deposit product named {0:?}")]
    UnknownProduct(String),
}

impl BankError {
    /// The funding failure behind a `CannotOpenDeposit`, if any.
    pub fn cause(&self) -> Option<&BankError> {
        match self {
            BankError::CannotOpenDeposit { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BankError>;
