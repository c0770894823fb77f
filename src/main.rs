use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use katabank::{Bank, BankConfig, Customer, InMemoryBankProductsRepository, Money};

const USAGE: &str = "\
Usage:
  katabank products
  katabank simulate <amount> <product> <open-date YYYY-MM-DD> [close-date YYYY-MM-DD]";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,katabank=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let config = BankConfig::load()?;

    match args.get(1).map(String::as_str) {
        Some("products") => run_products(&config),
        Some("simulate") => run_simulate(&config, &args[2..]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_products(config: &BankConfig) -> Result<()> {
    println!("🏷️  Deposit products");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let catalog = config.catalog();
    for product in catalog.products() {
        println!(
            "{:<16} {:>3} months  {:>6}% / year  {}",
            product.name,
            product.duration.length,
            product.yearly_rate,
            product.description.as_deref().unwrap_or("")
        );
    }
    println!("\n✓ {} products", catalog.product_count());

    Ok(())
}

fn run_simulate(config: &BankConfig, args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("simulate needs <amount> <product> <open-date>\n{}", USAGE);
    }

    let amount: Money = args[0]
        .parse()
        .with_context(|| format!("Invalid amount: {}", args[0]))?;
    let product = &args[1];
    let open_date = parse_date(&args[2])?;
    let close_date = args.get(3).map(|s| parse_date(s)).transpose()?;

    let bank = Bank::with_config(InMemoryBankProductsRepository::new(), config);
    let customer = Customer::new();
    let account = bank.open_account(&customer);
    bank.deposit(&customer, &account, amount)?;

    println!("💰 Simulating deposit of {} in {:?}", amount, product);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let deposit = bank.open_deposit_for_product(&customer, &account, amount, open_date, product)?;
    let term_end = deposit.close_date();
    println!("📅 Opened {} → term ends {}", open_date, term_end);

    let close_on = close_date.unwrap_or(term_end);
    let payout = bank.close_deposit(&customer, &deposit, close_on)?;

    println!("✓ Closed on {}", close_on);
    println!("✓ Payout:          {}", payout);
    println!("✓ Interest earned: {}", payout - amount);
    println!("✓ Account balance: {}", account.balance());

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {}", s))
}
