// 🏛️ Bank - ownership checks in front of Account and Deposit
//
// The bank keeps no entity state of its own. Each operation asks the
// repository whether the acting customer owns the target, then hands the
// mutation to the account or deposit, which guard their own invariants.

use crate::config::BankConfig;
use crate::entities::{Account, AccountHandle, Customer, Deposit, DepositHandle};
use crate::error::{BankError, Result};
use crate::interest::{DurationDetails, InterestPolicy};
use crate::money::{Money, RoundingPolicy};
use crate::products::ProductCatalog;
use crate::repository::BankProductsRepository;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

pub struct Bank<R: BankProductsRepository> {
    repository: R,
    rounding: RoundingPolicy,
    catalog: ProductCatalog,
}

impl<R: BankProductsRepository> Bank<R> {
    /// Bank with the default configuration
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, &BankConfig::default())
    }

    pub fn with_config(repository: R, config: &BankConfig) -> Self {
        Bank {
            repository,
            rounding: config.rounding,
            catalog: config.catalog(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn products(&self) -> &ProductCatalog {
        &self.catalog
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    pub fn get_accounts_for_customer(&self, customer: &Customer) -> HashSet<AccountHandle> {
        self.repository.find_accounts_for_customer(customer)
    }

    pub fn get_deposits_for_customer(&self, customer: &Customer) -> HashSet<DepositHandle> {
        self.repository.find_deposits_for_customer(customer)
    }

    // ========================================================================
    // ACCOUNT OPERATIONS
    // ========================================================================

    /// Open an empty account for `customer` and register it
    #[instrument(skip_all, fields(customer = %customer.id()))]
    pub fn open_account(&self, customer: &Customer) -> AccountHandle {
        let account = AccountHandle::new(Account::new(customer));
        self.repository.add_account(account.clone());
        info!(account = %account.id(), "account opened");
        account
    }

    #[instrument(skip_all, fields(customer = %customer.id(), account = %account.id(), amount = %amount))]
    pub fn deposit(&self, customer: &Customer, account: &AccountHandle, amount: Money) -> Result<()> {
        self.check_account_owner(customer, account)?;
        account.deposit(amount)
    }

    #[instrument(skip_all, fields(customer = %customer.id(), account = %account.id(), amount = %amount))]
    pub fn withdraw(&self, customer: &Customer, account: &AccountHandle, amount: Money) -> Result<()> {
        self.check_account_owner(customer, account)?;
        account.withdraw(amount)
    }

    /// Only the source account has to belong to `customer`
    #[instrument(skip_all, fields(customer = %customer.id(), from = %from.id(), to = %to.id(), amount = %amount))]
    pub fn transfer(
        &self,
        customer: &Customer,
        from: &AccountHandle,
        to: &AccountHandle,
        amount: Money,
    ) -> Result<()> {
        self.check_account_owner(customer, from)?;
        from.transfer(to, amount)
    }

    // ========================================================================
    // DEPOSIT OPERATIONS
    // ========================================================================

    /// Open a deposit funded from `account` and register it for the customer
    #[instrument(skip_all, fields(customer = %customer.id(), account = %account.id(), amount = %amount, open_date = %open_date))]
    pub fn open_deposit(
        &self,
        customer: &Customer,
        account: &AccountHandle,
        amount: Money,
        open_date: NaiveDate,
        duration: DurationDetails,
        policy: InterestPolicy,
    ) -> Result<DepositHandle> {
        self.check_account_owner(customer, account)?;

        let deposit = Deposit::open(account, amount, open_date, duration, policy)
            .map_err(|err| {
                warn!(error = %err, "deposit funding failed");
                err
            })?
            .with_rounding(self.rounding);

        let handle = DepositHandle::new(deposit);
        self.repository.add_deposit(handle.clone());
        Ok(handle)
    }

    /// Open a deposit on the terms of a named catalog product
    pub fn open_deposit_for_product(
        &self,
        customer: &Customer,
        account: &AccountHandle,
        amount: Money,
        open_date: NaiveDate,
        product_name: &str,
    ) -> Result<DepositHandle> {
        let product = self.catalog.find(product_name)?;
        self.open_deposit(
            customer,
            account,
            amount,
            open_date,
            product.duration,
            product.interest_policy(),
        )
    }

    #[instrument(skip_all, fields(customer = %customer.id(), deposit = %deposit.id(), amount = %amount, contributed_on = %contributed_on))]
    pub fn add_payment(
        &self,
        customer: &Customer,
        deposit: &DepositHandle,
        amount: Money,
        contributed_on: NaiveDate,
        policy: InterestPolicy,
    ) -> Result<()> {
        self.check_deposit_owner(customer, deposit)?;
        deposit.add_payment(amount, contributed_on, policy)
    }

    #[instrument(skip_all, fields(customer = %customer.id(), deposit = %deposit.id(), date = %date))]
    pub fn close_deposit(
        &self,
        customer: &Customer,
        deposit: &DepositHandle,
        date: NaiveDate,
    ) -> Result<Money> {
        self.check_deposit_owner(customer, deposit)?;
        deposit.close_deposit(date)
    }

    // ========================================================================
    // OWNERSHIP CHECKS
    // ========================================================================

    fn check_account_owner(&self, customer: &Customer, account: &AccountHandle) -> Result<()> {
        if self.repository.owns_account(customer, account) {
            Ok(())
        } else {
            warn!(customer = %customer.id(), account = %account.id(), "account not owned by customer");
            Err(BankError::UnauthorizedAccount(account.id()))
        }
    }

    fn check_deposit_owner(&self, customer: &Customer, deposit: &DepositHandle) -> Result<()> {
        if self.repository.owns_deposit(customer, deposit) {
            Ok(())
        } else {
            warn!(customer = %customer.id(), deposit = %deposit.id(), "deposit not owned by customer");
            Err(BankError::UnauthorizedDeposit(deposit.id()))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
