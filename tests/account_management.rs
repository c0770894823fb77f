use katabank::{
    Bank, BankError, BankProductsRepository, Customer, DurationDetails, InMemoryBankProductsRepository,
    InterestPolicy, Money,
};
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;

struct World {
    bank: Bank<InMemoryBankProductsRepository>,
    customer: Customer,
}

#[fixture]
fn world() -> World {
    World {
        bank: Bank::new(InMemoryBankProductsRepository::new()),
        customer: Customer::new(),
    }
}

#[rstest]
fn customer_lists_only_their_accounts(world: World) {
    let first = world.bank.open_account(&world.customer);
    let second = world.bank.open_account(&world.customer);
    world.bank.open_account(&Customer::new());

    let accounts = world.bank.get_accounts_for_customer(&world.customer);

    assert_eq!(accounts.len(), 2);
    assert!(accounts.contains(&first) && accounts.contains(&second));
}

#[rstest]
fn new_account_starts_empty(world: World) {
    let account = world.bank.open_account(&world.customer);

    assert!(world.bank.get_accounts_for_customer(&world.customer).contains(&account));
    assert!(account.balance().is_zero());
}

#[rstest]
#[case(100, 40, 60)]
#[case(100, 100, 0)]
#[case(100, 0, 100)]
fn withdraw_reduces_balance(world: World, #[case] initial: i64, #[case] withdrawn: i64, #[case] expected: i64) {
    let account = world.bank.open_account(&world.customer);
    world.bank.deposit(&world.customer, &account, Money::from_units(initial)).unwrap();

    world.bank.withdraw(&world.customer, &account, Money::from_units(withdrawn)).unwrap();

    assert_eq!(account.balance(), Money::from_units(expected));
}

#[rstest]
fn overdraft_is_refused(world: World) {
    let account = world.bank.open_account(&world.customer);
    world.bank.deposit(&world.customer, &account, Money::from_units(100)).unwrap();

    let err = world
        .bank
        .withdraw(&world.customer, &account, Money::from_units(200))
        .unwrap_err();

    assert!(matches!(err, BankError::InsufficientFunds { .. }));
    assert_eq!(account.balance(), Money::from_units(100));
}

#[rstest]
#[case("30", "70", "80")]
#[case("0.01", "99.99", "50.01")]
#[case("100", "0", "150")]
fn transfer_between_accounts(world: World, #[case] amount: &str, #[case] after_a: &str, #[case] after_b: &str) {
    let a = world.bank.open_account(&world.customer);
    let b = world.bank.open_account(&Customer::new());
    world.bank.deposit(&world.customer, &a, Money::from_units(100)).unwrap();
    b.deposit(Money::from_units(50)).unwrap();

    world
        .bank
        .transfer(&world.customer, &a, &b, amount.parse().unwrap())
        .unwrap();

    assert_eq!(a.balance(), after_a.parse::<Money>().unwrap());
    assert_eq!(b.balance(), after_b.parse::<Money>().unwrap());
}

#[rstest]
fn failed_transfer_changes_nothing(world: World) {
    let a = world.bank.open_account(&world.customer);
    let b = world.bank.open_account(&world.customer);
    world.bank.deposit(&world.customer, &a, Money::from_units(10)).unwrap();

    assert!(world.bank.transfer(&world.customer, &a, &b, Money::from_units(11)).is_err());
    assert!(world.bank.transfer(&world.customer, &a, &b, Money::from_units(-1)).is_err());

    assert_eq!(a.balance(), Money::from_units(10));
    assert!(b.balance().is_zero());
}

#[rstest]
fn customer_cannot_touch_foreign_account(world: World) {
    let owner = Customer::new();
    let account = world.bank.open_account(&owner);
    world.bank.deposit(&owner, &account, Money::from_units(100)).unwrap();

    let err = world
        .bank
        .withdraw(&world.customer, &account, Money::from_units(50))
        .unwrap_err();

    assert_eq!(err, BankError::UnauthorizedAccount(account.id()));
    assert_eq!(account.balance(), Money::from_units(100));
}

#[rstest]
fn opening_deposit_moves_funds(world: World) {
    let account = world.bank.open_account(&world.customer);
    world.bank.deposit(&world.customer, &account, Money::from_units(100)).unwrap();

    let deposit = world
        .bank
        .open_deposit(
            &world.customer,
            &account,
            Money::from_units(40),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            DurationDetails::months(12),
            InterestPolicy::new(dec!(12)),
        )
        .unwrap();

    assert!(world.bank.get_deposits_for_customer(&world.customer).contains(&deposit));
    assert_eq!(deposit.balance(), Money::from_units(40));
    assert_eq!(account.balance(), Money::from_units(60));
    assert_eq!(world.bank.repository().deposit_count(), 1);
    assert!(world.bank.repository().owns_deposit(&world.customer, &deposit));
}
