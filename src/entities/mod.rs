// Entity Models
// "Identity persists, values change"
//
// Each entity has:
// - Stable identity (UUID) that NEVER changes
// - Mutable values (balances, tranches) behind that identity
// - A shared handle so the registry and other entities can point at it

pub mod customer;
pub mod account;
pub mod deposit;

pub use customer::{Customer, CustomerId};
pub use account::{Account, AccountHandle, AccountId};
pub use deposit::{Deposit, DepositHandle, DepositId, DepositState, Tranche};
