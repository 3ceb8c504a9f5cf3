//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐                                               │
//! │  │       Product        │                                               │
//! │  │  ──────────────────  │                                               │
//! │  │  id: Option<i64>     │ ◄── None until the store assigns a row id    │
//! │  │  name                │                                               │
//! │  │  description (opt)   │                                               │
//! │  │  price_cents         │ ◄── exact decimal as integer cents           │
//! │  │  quantity            │                                               │
//! │  │  category            │ ◄── free-form label, not a foreign key       │
//! │  └──────────────────────┘                                               │
//! │                                                                         │
//! │  Lifecycle:                                                             │
//! │    Product::new(...)  →  insert  →  id = Some(rowid)                   │
//! │                          update  →  full replacement keyed on id       │
//! │                          delete  →  row gone, permanently              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// `id` is absent until the store assigns one on insert; callers never pick
/// ids themselves. The optional `sqlx` feature derives `FromRow` so catalog
/// rows map straight onto this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned row id. `None` for a product not yet inserted.
    pub id: Option<i64>,

    /// Display name. Required, at most [`crate::MAX_NAME_LEN`] characters.
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Category label. Required, at most [`crate::MAX_CATEGORY_LEN`] characters.
    pub category: String,
}

impl Product {
    /// Creates an unsaved product (`id = None`).
    ///
    /// ## Example
    /// ```rust
    /// use stockbook_core::{Money, Product};
    ///
    /// let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
    /// assert_eq!(pen.id, None);
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Money,
        quantity: i64,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            description,
            price_cents: price.cents(),
            quantity,
            category: category.into(),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the value of the units on hand (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price() * self.quantity
    }

    /// Whether this product has been written to the store.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_no_id() {
        let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
        assert_eq!(pen.id, None);
        assert!(!pen.is_persisted());
        assert_eq!(pen.name, "Pen");
        assert_eq!(pen.description, None);
        assert_eq!(pen.price_cents, 150);
        assert_eq!(pen.quantity, 10);
        assert_eq!(pen.category, "Office");
    }

    #[test]
    fn test_price_accessor() {
        let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
        assert_eq!(pen.price(), Money::from_cents(150));
    }

    #[test]
    fn test_stock_value() {
        let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
        assert_eq!(pen.stock_value(), Money::from_cents(1500));
    }

    #[test]
    fn test_description_is_preserved() {
        let stapler = Product::new(
            "Stapler",
            Some("Full strip, metal body".to_string()),
            Money::from_cents(899),
            3,
            "Office",
        );
        assert_eq!(stapler.description.as_deref(), Some("Full strip, metal body"));
    }
}
