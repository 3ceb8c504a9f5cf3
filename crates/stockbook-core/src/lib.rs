//! # stockbook-core: Pure Domain Logic for Stockbook
//!
//! This crate contains the domain types and rules of the Stockbook catalog
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Form layer (external consumer)                     │   │
//! │  │     field entry ──► validation ──► repository calls            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌───────────┐            │   │
//! │  │   │   types   │     │   money   │     │ validation│            │   │
//! │  │   │  Product  │     │   Money   │     │   rules   │            │   │
//! │  │   └───────────┘     └───────────┘     └───────────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockbook-db (Persistence Layer)                 │   │
//! │  │         connection manager, product repository, schema          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Field and entity rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::{Money, Product};
//! use stockbook_core::validation::validate_product;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(150); // 1.50
//!
//! let pen = Product::new("Pen", None, price, 10, "Office");
//! assert!(validate_product(&pen).is_ok());
//! assert_eq!(pen.stock_value().cents(), 1500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Money` instead of
// `use stockbook_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::Product;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
///
/// ## Business Reason
/// Names longer than this overflow receipts and list views; in practice
/// they are almost always paste errors.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a category label, in characters.
///
/// ## Business Reason
/// Categories are short grouping labels ("Office", "Tools"). A long one is
/// a description typed into the wrong field.
pub const MAX_CATEGORY_LEN: usize = 50;
