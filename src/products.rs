// 🏷️ Deposit Products - offers as data
// "The bank offers a deposit for N months with yearly interest rate X%"

use crate::error::{BankError, Result as BankResult};
use crate::interest::{DurationDetails, InterestPolicy};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// PRODUCT DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositProduct {
    /// Name customers pick the product by (matched case-insensitively)
    pub name: String,

    pub duration: DurationDetails,

    /// Yearly rate in percent
    pub yearly_rate: Decimal,

    #[serde(default)]
    pub description: Option<String>,
}

impl DepositProduct {
    pub fn new(name: impl Into<String>, months: u32, yearly_rate: Decimal) -> Self {
        DepositProduct {
            name: name.into(),
            duration: DurationDetails::months(months),
            yearly_rate,
            description: None,
        }
    }

    /// Policy for funds placed in this product today
    pub fn interest_policy(&self) -> InterestPolicy {
        InterestPolicy::new(self.yearly_rate)
    }
}

// ============================================================================
// PRODUCT CATALOG
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<DepositProduct>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        ProductCatalog { products: Vec::new() }
    }

    /// Load products from a JSON array file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read products file: {:?}", path.as_ref()))?;

        let products: Vec<DepositProduct> = serde_json::from_str(&content)
            .context("Failed to parse products JSON")?;

        Ok(ProductCatalog::from_products(products))
    }

    /// Later duplicates of a name replace earlier ones
    pub fn from_products(products: Vec<DepositProduct>) -> Self {
        let mut catalog = ProductCatalog::new();
        for product in products {
            catalog.add_product(product);
        }
        catalog
    }

    pub fn add_product(&mut self, product: DepositProduct) {
        self.products.retain(|p| !p.name.eq_ignore_ascii_case(&product.name));
        self.products.push(product);
    }

    pub fn find(&self, name: &str) -> BankResult<&DepositProduct> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| BankError::UnknownProduct(name.to_string()))
    }

    pub fn products(&self) -> &[DepositProduct] {
        &self.products
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
