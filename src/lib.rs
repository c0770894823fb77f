// Kata Bank - Core Library
// Accounts, time-bound deposits and their interest accrual.
// Exposes all modules for use in the CLI and tests.

pub mod money;
pub mod error;
pub mod interest;
pub mod entities;
pub mod repository;
pub mod products;
pub mod config;
pub mod bank;

// Re-export commonly used types
pub use money::{Money, RoundingMode, RoundingPolicy};
pub use error::{BankError, Result};
pub use interest::{total_accrued_interest, DurationDetails, DurationUnit, InterestPolicy};
pub use entities::{
    Account, AccountHandle, AccountId,
    Customer, CustomerId,
    Deposit, DepositHandle, DepositId, DepositState, Tranche,
};
pub use repository::{BankProductsRepository, InMemoryBankProductsRepository};
pub use products::{DepositProduct, ProductCatalog};
pub use config::BankConfig;
pub use bank::Bank;
