// 👤 Customer - opaque identity
//
// The customer registry lives outside the core; all the bank needs is a
// stable identity to compare owners by.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bank customer. Equality is identity equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
}

impl Customer {
    /// Create a customer with a fresh identity
    pub fn new() -> Self {
        Customer {
            id: CustomerId(Uuid::new_v4()),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }
}

impl Default for Customer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customers_are_distinct() {
        let alice = Customer::new();
        let bob = Customer::new();

        assert_ne!(alice, bob);
        let same = alice;
        assert_eq!(alice, same);
        assert_ne!(alice.id(), bob.id());
    }
}
