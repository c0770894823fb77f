// ⚙️ Bank Configuration
//
// JSON file, pointed at by KATABANK_CONFIG:
// {
//   "rounding": { "scale": 2, "mode": "half_even" },
//   "products": [ { "name": "Annual", "duration": { "length": 12 }, "yearly_rate": "12" } ]
// }
//
// Every field is optional; missing ones take the defaults below.

use crate::money::RoundingPolicy;
use crate::products::{DepositProduct, ProductCatalog};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "KATABANK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    #[serde(default)]
    pub rounding: RoundingPolicy,

    #[serde(default = "default_products")]
    pub products: Vec<DepositProduct>,
}

fn default_products() -> Vec<DepositProduct> {
    vec![DepositProduct::new("Annual", 12, Decimal::from(12))]
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            rounding: RoundingPolicy::default(),
            products: default_products(),
        }
    }
}

impl BankConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: BankConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", path.as_ref()))?;

        debug!(
            path = ?path.as_ref(),
            products = config.products.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load from `$KATABANK_CONFIG` if set, defaults otherwise
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(path),
            None => {
                info!("{} not set, using default configuration", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    pub fn catalog(&self) -> ProductCatalog {
        ProductCatalog::from_products(self.products.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::RoundingMode;
    use rust_decimal_macros::dec;

    fn write_temp(content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("katabank-config-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = BankConfig::default();

        assert_eq!(config.rounding, RoundingPolicy::default());
        let catalog = config.catalog();
        assert_eq!(catalog.find("annual").unwrap().yearly_rate, dec!(12));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let path = write_temp("{}");
        let config = BankConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config, BankConfig::default());
    }

    #[test]
    fn test_full_config() {
        let path = write_temp(
            r#"{
                "rounding": {"scale": 3, "mode": "truncate"},
                "products": [{"name": "Half-Year", "duration": {"length": 6}, "yearly_rate": "10"}]
            }"#,
        );
        let config = BankConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.rounding, RoundingPolicy { scale: 3, mode: RoundingMode::Truncate });
        assert_eq!(config.products.len(), 1);
        assert!(config.catalog().find("annual").is_err());
    }

    #[test]
    fn test_invalid_json() {
        let path = write_temp("{ not json");
        let err = BankConfig::from_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("Failed to parse config JSON"));
    }
}
