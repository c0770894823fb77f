// 🗂️ Bank Products Repository - who owns which account and deposit
//
// The bank core never stores entities itself; it asks this collaborator.
// Only set semantics are required: no duplicates, every earlier addition
// visible to later lookups.

use crate::entities::{AccountHandle, AccountId, Customer, DepositHandle, DepositId};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

// ============================================================================
// REPOSITORY CONTRACT
// ============================================================================

pub trait BankProductsRepository {
    fn find_accounts_for_customer(&self, customer: &Customer) -> HashSet<AccountHandle>;

    fn find_deposits_for_customer(&self, customer: &Customer) -> HashSet<DepositHandle>;

    /// Register an account; adding the same account twice is a no-op
    fn add_account(&self, account: AccountHandle);

    /// Register a deposit; adding the same deposit twice is a no-op
    fn add_deposit(&self, deposit: DepositHandle);

    fn owns_account(&self, customer: &Customer, account: &AccountHandle) -> bool {
        self.find_accounts_for_customer(customer).contains(account)
    }

    fn owns_deposit(&self, customer: &Customer, deposit: &DepositHandle) -> bool {
        self.find_deposits_for_customer(customer).contains(deposit)
    }
}

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

/// Registry of all accounts and deposits, kept in memory.
///
/// Cloning shares the same storage.
#[derive(Clone, Default)]
pub struct InMemoryBankProductsRepository {
    accounts: Arc<RwLock<Vec<AccountHandle>>>,
    deposits: Arc<RwLock<Vec<DepositHandle>>>,
}

impl InMemoryBankProductsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_account(&self, id: AccountId) -> Option<AccountHandle> {
        self.accounts.read().iter().find(|a| a.id() == id).cloned()
    }

    pub fn find_deposit(&self, id: DepositId) -> Option<DepositHandle> {
        self.deposits.read().iter().find(|d| d.id() == id).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn deposit_count(&self) -> usize {
        self.deposits.read().len()
    }
}

impl BankProductsRepository for InMemoryBankProductsRepository {
    fn find_accounts_for_customer(&self, customer: &Customer) -> HashSet<AccountHandle> {
        self.accounts
            .read()
            .iter()
            .filter(|a| a.owner() == customer.id())
            .cloned()
            .collect()
    }

    fn find_deposits_for_customer(&self, customer: &Customer) -> HashSet<DepositHandle> {
        self.deposits
            .read()
            .iter()
            .filter(|d| d.owner() == customer.id())
            .cloned()
            .collect()
    }

    fn add_account(&self, account: AccountHandle) {
        let mut accounts = self.accounts.write();
        if !accounts.contains(&account) {
            accounts.push(account);
        }
    }

    fn add_deposit(&self, deposit: DepositHandle) {
        let mut deposits = self.deposits.write();
        if !deposits.contains(&deposit) {
            deposits.push(deposit);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Account, Deposit};
    use crate::interest::{DurationDetails, InterestPolicy};
    use crate::money::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accounts_listed_per_customer() {
        let repository = InMemoryBankProductsRepository::new();
        let alice = Customer::new();
        let bob = Customer::new();

        let first = AccountHandle::new(Account::new(&alice));
        let second = AccountHandle::new(Account::new(&alice));
        let other = AccountHandle::new(Account::new(&bob));
        repository.add_account(first.clone());
        repository.add_account(second.clone());
        repository.add_account(other.clone());

        let accounts = repository.find_accounts_for_customer(&alice);
        assert_eq!(accounts.len(), 2);
        assert!(accounts.contains(&first));
        assert!(accounts.contains(&second));
        assert!(!accounts.contains(&other));

        assert!(repository.owns_account(&bob, &other));
        assert!(!repository.owns_account(&bob, &first));
    }

    #[test]
    fn test_duplicate_adds_are_ignored() {
        let repository = InMemoryBankProductsRepository::new();
        let customer = Customer::new();
        let account = AccountHandle::new(Account::new(&customer));

        repository.add_account(account.clone());
        repository.add_account(account.clone());

        assert_eq!(repository.account_count(), 1);
        assert_eq!(repository.find_account(account.id()), Some(account));
    }

    #[test]
    fn test_unregistered_account_is_not_owned() {
        let repository = InMemoryBankProductsRepository::new();
        let customer = Customer::new();
        let account = AccountHandle::new(Account::new(&customer));

        assert!(repository.find_accounts_for_customer(&customer).is_empty());
        assert!(!repository.owns_account(&customer, &account));
    }

    #[test]
    fn test_deposits_follow_account_owner() {
        let repository = InMemoryBankProductsRepository::new();
        let customer = Customer::new();
        let account = AccountHandle::new(Account::new(&customer));
        account.deposit(Money::from_units(10)).unwrap();

        let deposit = DepositHandle::new(
            Deposit::open(
                &account,
                Money::from_units(10),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                DurationDetails::months(12),
                InterestPolicy::new(dec!(10)),
            )
            .unwrap(),
        );
        repository.add_deposit(deposit.clone());
        repository.add_deposit(deposit.clone());

        assert_eq!(repository.deposit_count(), 1);
        assert!(repository.owns_deposit(&customer, &deposit));
        assert!(!repository.owns_deposit(&Customer::new(), &deposit));
        assert_eq!(repository.find_deposit(deposit.id()), Some(deposit));
    }

    #[test]
    fn test_clones_share_storage() {
        let repository = InMemoryBankProductsRepository::new();
        let view = repository.clone();
        let customer = Customer::new();

        repository.add_account(AccountHandle::new(Account::new(&customer)));
        assert_eq!(view.find_accounts_for_customer(&customer).len(), 1);
    }
}
