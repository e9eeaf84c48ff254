//! Fixed reference data: party names and item unit prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

const BUILTIN_PARTIES: [&str; 6] = [
    "Aman Traders",
    "Ratan Agency",
    "Om Distributors",
    "Sai Traders",
    "MUKESH WHOLSALER",
    "VU AGENCY",
];

const BUILTIN_ITEMS: [(&str, i64); 8] = [
    ("CORN", 5),
    ("KURKURE", 20),
    ("KITKAT", 10),
    ("BISCUIT", 8),
    ("SOFT DRINK", 25),
    ("CADBURY", 7),
    ("WHEAT", 45),
    ("HAIROIL", 30),
];

/// An item and its default unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: Decimal,
}

/// Parties and items offered by the entry form. Display order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub parties: Vec<String>,
    pub items: Vec<CatalogItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        Self {
            parties: BUILTIN_PARTIES.iter().map(|p| p.to_string()).collect(),
            items: BUILTIN_ITEMS
                .iter()
                .map(|(name, price)| CatalogItem {
                    name: name.to_string(),
                    price: Decimal::from(*price),
                })
                .collect(),
        }
    }

    /// Default unit price of `item`.
    pub fn price_of(&self, item: &str) -> Result<Decimal, DeskError> {
        self.items
            .iter()
            .find(|i| i.name == item)
            .map(|i| i.price)
            .ok_or_else(|| DeskError::UnknownItem(item.to_string()))
    }

    pub fn parties(&self) -> impl Iterator<Item = &str> {
        self.parties.iter().map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }

    pub fn is_party(&self, party: &str) -> bool {
        self.parties.iter().any(|p| p == party)
    }

    pub fn is_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i.name == item)
    }

    pub fn party_index(&self, party: &str) -> Option<usize> {
        self.parties.iter().position(|p| p == party)
    }

    pub fn item_index(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i.name == item)
    }
}
